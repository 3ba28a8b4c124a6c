//! The render context: scope stack, environments, globals and shared state.
//!
//! # Resolution
//!
//! The first segment of a path is looked up in the innermost scope that owns
//! it, then in `environments` (inherited entries count), then in `globals`.
//! Each further segment is a property read on the previous result. In strict
//! mode the first undefined intermediate result fails the read with the path
//! walked so far.
//!
//! # Sharing
//!
//! `spawn` gives a child a fresh scope stack over a new environment while
//! sharing globals, mode flags, both limiters and the register bag by
//! reference, so a sub-render counts against the parent's budgets and sees
//! the parent's loop continuation state.

mod builder;
mod scope_guard;

use std::cell::RefCell;
use std::rc::Rc;

use quill_ir::{Object, Scope, Value};

pub use builder::ContextBuilder;
pub use scope_guard::ScopedContext;

use crate::drive::{drive_sync, to_liquid, to_value};
use crate::errors::{undefined_variable, EvalResult};
use crate::limiter::Limiter;
use crate::property::{read_object, read_property};
use crate::registers::{RegisterSnapshot, Registers};

/// State for one render tree.
#[derive(Debug)]
pub struct Context {
    /// Innermost last. Never empty: index 0 is the operating scope.
    scopes: Vec<Scope>,
    /// Caller-supplied data. Counter tags write to it directly.
    pub environments: Object,
    globals: Rc<Object>,
    registers: Registers,
    memory_limit: Rc<Limiter>,
    render_limit: Rc<Limiter>,
    strict_variables: bool,
    own_property_only: bool,
    sync: bool,
    /// Set by `break`; cleared by looping tags between iterations.
    pub break_called: bool,
    /// Set by `continue`; cleared by looping tags between iterations.
    pub continue_called: bool,
}

impl Context {
    /// A context over `environments` with default settings.
    pub fn new(environments: Object) -> Self {
        ContextBuilder::new(environments).build()
    }

    // Mode flags and shared state

    #[inline]
    pub fn strict_variables(&self) -> bool {
        self.strict_variables
    }

    #[inline]
    pub fn own_property_only(&self) -> bool {
        self.own_property_only
    }

    /// Whether this render is driven synchronously.
    #[inline]
    pub fn sync(&self) -> bool {
        self.sync
    }

    pub fn globals(&self) -> &Rc<Object> {
        &self.globals
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory_limit(&self) -> &Rc<Limiter> {
        &self.memory_limit
    }

    pub fn render_limit(&self) -> &Rc<Limiter> {
        &self.render_limit
    }

    // Registers

    /// The register `key`, created empty on first access.
    pub fn get_register<T: Default + 'static>(&self, key: &str) -> Rc<RefCell<T>> {
        self.registers.get(key)
    }

    pub fn set_register<T: 'static>(&self, key: &str, value: T) -> Rc<RefCell<T>> {
        self.registers.set(key, value)
    }

    pub fn save_register(&self, keys: &[&str]) -> RegisterSnapshot {
        self.registers.save(keys)
    }

    pub fn restore_register(&self, snapshot: RegisterSnapshot) {
        self.registers.restore(snapshot);
    }

    // Scope stack

    pub fn push(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    /// Pop the innermost scope. The operating scope is never popped.
    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() > 1 {
            self.scopes.pop()
        } else {
            None
        }
    }

    /// Number of scopes on the stack, operating scope included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The operating scope.
    pub fn bottom(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn bottom_mut(&mut self) -> &mut Scope {
        &mut self.scopes[0]
    }

    /// The innermost scope.
    pub fn top_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    /// Push `scope` and pop it again when the guard drops.
    pub fn scoped(&mut self, scope: Scope) -> ScopedContext<'_> {
        self.push(scope);
        ScopedContext::new(self)
    }

    /// A child context over `environments` for an isolated sub-render.
    pub fn spawn(&self, environments: Object) -> Context {
        ContextBuilder::new(environments)
            .globals(Rc::clone(&self.globals))
            .strict_variables(self.strict_variables)
            .own_property_only(self.own_property_only)
            .sync(self.sync)
            .memory_limit(Rc::clone(&self.memory_limit))
            .render_limit(Rc::clone(&self.render_limit))
            .registers(self.registers.clone())
            .build()
    }

    /// Every visible binding flattened into one object, inner over outer.
    pub fn get_all(&self) -> Object {
        let mut all = Object::new();
        all.assign(&self.globals);
        all.assign(&self.environments);
        for scope in &self.scopes {
            all.assign(scope);
        }
        all
    }

    // Resolution

    fn find_scope(&self, key: &str) -> &Object {
        if let Some(scope) = self.scopes.iter().rev().find(|scope| scope.has_own(key)) {
            return scope;
        }
        if self.environments.contains(key) {
            return &self.environments;
        }
        self.globals.as_ref()
    }

    /// Resolve a path of keys. A suspension point.
    pub async fn get(&self, paths: &[Value]) -> EvalResult {
        let Some((first, rest)) = paths.split_first() else {
            return Ok(Value::Undefined);
        };
        let key = to_value(first.clone()).await.to_key_string();
        let scope = self.find_scope(&key);
        let mut value = to_liquid(read_object(scope, &key, self.own_property_only)).await;
        self.check_defined(&value, paths, 0)?;

        for (i, key) in rest.iter().enumerate() {
            value = read_property(value, key.clone(), self.own_property_only).await;
            value = to_liquid(value).await;
            self.check_defined(&value, paths, i + 1)?;
        }
        Ok(value)
    }

    /// `get` with a path of plain names.
    pub async fn get_path(&self, names: &[&str]) -> EvalResult {
        let keys: Vec<Value> = names.iter().map(|name| Value::string(name)).collect();
        self.get(&keys).await
    }

    /// `get` driven synchronously: fails if any read is still pending.
    pub fn get_sync(&self, paths: &[Value]) -> EvalResult {
        drive_sync(self.get(paths))
    }

    /// Resolve a path against `scope` alone, bypassing the stack.
    pub async fn get_from_scope(&self, scope: Value, paths: &[Value]) -> EvalResult {
        let mut value = scope;
        for (i, key) in paths.iter().enumerate() {
            value = to_liquid(read_property(value, key.clone(), self.own_property_only).await).await;
            self.check_defined(&value, paths, i)?;
        }
        Ok(value)
    }

    fn check_defined(&self, value: &Value, paths: &[Value], index: usize) -> EvalResult<()> {
        if self.strict_variables && value.is_undefined() {
            let walked: Vec<String> = paths[..=index].iter().map(Value::to_key_string).collect();
            return Err(undefined_variable(walked.join(".")));
        }
        Ok(())
    }
}
