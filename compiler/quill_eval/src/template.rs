//! The render-side view of a parsed template node.

use std::fmt;

use futures::future::LocalBoxFuture;
use quill_ir::{Span, ValueToken};

use crate::context::Context;
use crate::emitter::Emitter;
use crate::errors::EvalResult;

/// A parsed template node: text, an output, or a tag.
pub trait Template: fmt::Debug {
    /// Render into `emitter`. May suspend on pending values.
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>>;

    fn span(&self) -> Span;

    /// Nested templates, for static analysis.
    fn children(&self) -> Vec<&dyn Template> {
        Vec::new()
    }

    /// Value expressions this node evaluates, for static analysis.
    fn arguments(&self) -> Vec<&ValueToken> {
        Vec::new()
    }

    /// Names bound while this node evaluates its own arguments.
    fn argument_scope(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Names this node binds for its children.
    fn block_scope(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Names this node binds for the nodes after it.
    fn declarations(&self) -> Vec<&str> {
        Vec::new()
    }
}

pub type TemplateRef = Box<dyn Template>;

/// Render `templates` in order.
///
/// The render limiter is checked before each node. Rendering stops after
/// the node that sets `break_called` or `continue_called`; the enclosing
/// loop decides what the flag means.
pub async fn render_templates(
    templates: &[TemplateRef],
    ctx: &mut Context,
    emitter: &mut Emitter,
) -> EvalResult<()> {
    for template in templates {
        ctx.render_limit().check()?;
        template.render(ctx, emitter).await?;
        if ctx.break_called || ctx.continue_called {
            break;
        }
    }
    Ok(())
}
