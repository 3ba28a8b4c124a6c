//! Lexer error types.
//!
//! A `LexError` pairs WHERE (`span`) with WHAT (`kind`). Both the template
//! splitter and the argument tokenizer report through it.

use quill_ir::Span;
use thiserror::Error;

/// A lexing failure located in the template source.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { span, kind }
    }
}

/// What went wrong while lexing.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LexErrorKind {
    // === Splitter ===
    #[error("output not closed, expected `}}}}`")]
    UnterminatedOutput,
    #[error("tag not closed, expected `%}}`")]
    UnterminatedTag,
    #[error("tag has no name")]
    MissingTagName,

    // === Arguments ===
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("range not closed, expected `)`")]
    UnterminatedRange,
    #[error("expected `]`")]
    ExpectedCloseBracket,
    #[error("expected a property name after `.`")]
    ExpectedProperty,
    #[error("expected a value")]
    ExpectedValue,
    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String },
    #[error("unexpected character `{found}`")]
    UnexpectedCharacter { found: char },
}
