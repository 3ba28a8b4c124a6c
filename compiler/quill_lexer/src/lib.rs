//! Quill lexer.
//!
//! Two layers:
//! - [`split`] cuts a template source into text, output and tag tokens,
//!   applying whitespace-trim markers (`{{-`, `-%}`) and trim options.
//! - [`Tokenizer`] reads tag arguments on demand: identifiers, value
//!   expressions, operators and `key: value` hashes. Tags drive it
//!   themselves, so each tag decides its own argument grammar.

mod lex_error;
mod splitter;
mod token;
mod tokenizer;

pub use lex_error::{LexError, LexErrorKind};
pub use splitter::{split, LexOptions};
pub use token::{HtmlToken, OutputToken, TagToken, TopLevelToken};
pub use tokenizer::Tokenizer;
