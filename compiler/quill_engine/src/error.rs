//! Compile-time errors and the combined error for one-shot helpers.

use quill_eval::EvalError;
use quill_ir::Span;
use quill_lexer::LexError;
use thiserror::Error;

/// A template failed to compile. No partial template is produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A tag header does not match the tag's grammar.
    #[error("illegal tag: {text}")]
    IllegalTag { text: String, span: Span },
    /// An output holds more than one value expression.
    #[error("illegal output: {text}")]
    IllegalOutput { text: String, span: Span },
    /// A block tag reached the end of input without its closing tag.
    #[error("tag {text} not closed")]
    NotClosed { text: String, span: Span },
    /// A tag that takes no arguments was given some.
    #[error("tag `{tag}` takes no arguments")]
    UnexpectedArguments { tag: String, span: Span },
    /// No tag of this name is registered.
    #[error("tag `{name}` not found")]
    UnknownTag { name: String, span: Span },
    /// A closing or branch tag appeared outside its block.
    #[error("unexpected tag `{name}`")]
    UnexpectedTag { name: String, span: Span },
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Where in the source the error points.
    pub fn span(&self) -> Span {
        match self {
            ParseError::IllegalTag { span, .. }
            | ParseError::IllegalOutput { span, .. }
            | ParseError::NotClosed { span, .. }
            | ParseError::UnexpectedArguments { span, .. }
            | ParseError::UnknownTag { span, .. }
            | ParseError::UnexpectedTag { span, .. } => *span,
            ParseError::Lex(err) => err.span,
        }
    }
}

/// Either stage of `parse_and_render`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}
