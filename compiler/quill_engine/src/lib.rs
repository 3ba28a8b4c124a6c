//! Quill template engine.
//!
//! Parsing turns a source into [`TemplateRef`] nodes using the registered
//! tags; rendering runs them against a [`Context`] with either driver.
//!
//! ```text
//! let engine = Quill::default();
//! let templates = engine.parse("{% for x in xs %}{{ x }}{% endfor %}")?;
//! let out = engine.render_sync(&templates, data)?;
//! ```
//!
//! Built-in tags: `for`, `break`, `continue`, `if`, `assign`, `increment`,
//! `decrement`. More can be added with [`Quill::register_tag`].

pub mod analysis;
mod engine;
mod error;
mod nodes;
mod options;
pub mod parser;
mod registry;
pub mod tags;

pub use engine::Quill;
pub use error::{Error, ParseError};
pub use nodes::{HtmlNode, OutputNode};
pub use options::{QuillOptions, RenderOptions};
pub use parser::{ParseEvent, ParseStream, Parser};
pub use registry::{TagFactory, TagRegistry};

pub use quill_eval::{Context, Emitter, EvalError, EvalResult, Template, TemplateRef};
