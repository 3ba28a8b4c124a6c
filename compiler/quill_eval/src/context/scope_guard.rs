//! RAII scope guard for the context's scope stack.
//!
//! The guard holds `&mut Context` and derefs to it, so code inside a scoped
//! region uses the context as usual. Dropping the guard pops the scope,
//! including when a render fails part way and `?` unwinds the region.

use std::ops::{Deref, DerefMut};

use super::Context;

/// Pops the scope pushed by [`Context::scoped`] on drop.
pub struct ScopedContext<'ctx> {
    context: &'ctx mut Context,
}

impl<'ctx> ScopedContext<'ctx> {
    pub(super) fn new(context: &'ctx mut Context) -> Self {
        ScopedContext { context }
    }
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        self.context.pop();
    }
}

impl Deref for ScopedContext<'_> {
    type Target = Context;

    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}
