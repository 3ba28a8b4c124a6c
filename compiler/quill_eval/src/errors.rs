//! Render-time errors.
//!
//! `EvalError` variants are constructed through the factory functions below
//! so call sites read as intent (`undefined_variable(path)`) rather than as
//! struct literals.

use quill_ir::Value;
use thiserror::Error;

/// Result of a render-time operation. Defaults to producing a `Value`.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// A render-time failure. Every variant is terminal for the render.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Strict mode met an undefined path segment.
    #[error("undefined variable: {path}")]
    UndefinedVariable {
        /// Dotted path up to and including the failing segment.
        path: String,
    },
    /// A `Limiter` ran out.
    #[error("{resource} limit exceeded")]
    ResourceExceeded { resource: &'static str },
    /// The synchronous driver met a value that is still pending.
    #[error("cannot resolve a pending value in synchronous mode")]
    SyncMisuse,
    #[error("{message}")]
    Custom { message: String },
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        EvalError::Custom {
            message: message.into(),
        }
    }
}

// Factories

pub fn undefined_variable(path: impl Into<String>) -> EvalError {
    EvalError::UndefinedVariable { path: path.into() }
}

pub fn resource_exceeded(resource: &'static str) -> EvalError {
    EvalError::ResourceExceeded { resource }
}

pub fn sync_misuse() -> EvalError {
    EvalError::SyncMisuse
}
