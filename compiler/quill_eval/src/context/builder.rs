//! `ContextBuilder` for assembling a `Context`.
//!
//! Limiters and the register bag default to fresh, unbounded instances.
//! Pass existing ones to make several renders draw from one budget or share
//! loop continuation state.

use std::rc::Rc;

use quill_ir::{Object, Scope};

use super::Context;
use crate::limiter::{self, Limiter};
use crate::registers::Registers;

/// Builder for `Context` instances.
#[derive(Debug)]
pub struct ContextBuilder {
    environments: Object,
    globals: Option<Rc<Object>>,
    registers: Option<Registers>,
    memory_limit: Option<Rc<Limiter>>,
    render_limit: Option<Rc<Limiter>>,
    strict_variables: bool,
    own_property_only: bool,
    sync: bool,
}

impl ContextBuilder {
    pub fn new(environments: Object) -> Self {
        ContextBuilder {
            environments,
            globals: None,
            registers: None,
            memory_limit: None,
            render_limit: None,
            strict_variables: false,
            own_property_only: false,
            sync: false,
        }
    }

    /// Fallback bindings consulted after the environments.
    #[must_use]
    pub fn globals(mut self, globals: Rc<Object>) -> Self {
        self.globals = Some(globals);
        self
    }

    /// Share an existing register bag.
    #[must_use]
    pub fn registers(mut self, registers: Registers) -> Self {
        self.registers = Some(registers);
        self
    }

    #[must_use]
    pub fn memory_limit(mut self, limiter: Rc<Limiter>) -> Self {
        self.memory_limit = Some(limiter);
        self
    }

    #[must_use]
    pub fn render_limit(mut self, limiter: Rc<Limiter>) -> Self {
        self.render_limit = Some(limiter);
        self
    }

    /// Fail on undefined path segments instead of yielding `Undefined`.
    #[must_use]
    pub fn strict_variables(mut self, strict: bool) -> Self {
        self.strict_variables = strict;
        self
    }

    /// Ignore inherited entries of non-drop values.
    #[must_use]
    pub fn own_property_only(mut self, own_only: bool) -> Self {
        self.own_property_only = own_only;
        self
    }

    #[must_use]
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn build(self) -> Context {
        Context {
            scopes: vec![Scope::new()],
            environments: self.environments,
            globals: self.globals.unwrap_or_default(),
            registers: self.registers.unwrap_or_default(),
            memory_limit: self
                .memory_limit
                .unwrap_or_else(|| Rc::new(Limiter::unbounded(limiter::MEMORY))),
            render_limit: self
                .render_limit
                .unwrap_or_else(|| Rc::new(Limiter::unbounded(limiter::RENDER))),
            strict_variables: self.strict_variables,
            own_property_only: self.own_property_only,
            sync: self.sync,
            break_called: false,
            continue_called: false,
        }
    }
}
