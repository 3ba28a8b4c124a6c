//! Quill IR - values, expressions and spans.
//!
//! This crate holds the data the rest of the engine agrees on:
//! - `Span` for source locations
//! - `Value`, the runtime value model (including deferred values and drops)
//! - `Object`/`Scope`, ordered mappings with prototype-based inheritance
//! - `Expr`/`ValueToken`/`HashArgs`, the expression AST produced by the lexer
//!
//! # Design Philosophy
//!
//! - **Cheap clones**: heap-backed values are `Rc`, so passing values through
//!   scopes and registers never deep-copies.
//! - **Single-threaded**: a render tree is owned by one cooperative task.

mod drop_object;
mod expr;
mod json;
mod object;
mod span;
mod value;

pub use drop_object::DropObject;
pub use expr::{Expr, HashArgs, HashEntry, Literal, PathSegment, ValueToken, VariablePath};
pub use object::{Object, Scope};
pub use span::Span;
pub use value::{Callable, Deferred, Value};
