//! Quill evaluation core.
//!
//! - [`Context`]: scope stack, environments, globals, registers, limiters
//! - [`read_property`]: one step of path resolution, drops included
//! - [`drive_sync`] / [`drive_async`]: the two ways to run a render
//! - [`Template`] and [`render_templates`]: the renderer contract tags use
//! - [`ForloopDrop`], [`Limiter`], [`Registers`], [`Emitter`]
//!
//! # Suspension
//!
//! Reads are `async`: each may meet a `Deferred` value and wait on it. The
//! same code serves synchronous renders because the synchronous driver polls
//! once and treats `Pending` as a usage error instead of waiting.

pub mod context;
mod drive;
mod emitter;
mod enumerable;
pub mod errors;
mod evaluate;
mod forloop;
pub mod limiter;
mod property;
mod registers;
mod template;

pub use context::{Context, ContextBuilder, ScopedContext};
pub use drive::{drive_async, drive_sync, is_sync_misuse, to_liquid, to_value, to_value_sync};
pub use emitter::Emitter;
pub use enumerable::to_enumerable;
pub use errors::{EvalError, EvalResult};
pub use evaluate::{evaluate, evaluate_token, render_hash};
pub use forloop::ForloopDrop;
pub use limiter::Limiter;
pub use property::{read_object, read_property, read_resolved};
pub use registers::{RegisterSnapshot, Registers};
pub use template::{render_templates, Template, TemplateRef};
