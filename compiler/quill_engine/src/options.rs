//! Engine and per-render configuration.

use std::rc::Rc;

use quill_eval::{Limiter, Registers};
use quill_ir::Object;
use quill_lexer::LexOptions;
use serde::Deserialize;

/// Engine-wide options. Deserializable from JSON; missing fields take
/// their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuillOptions {
    /// Fail on undefined path segments.
    pub strict_variables: bool,
    /// Ignore inherited entries of non-drop values.
    pub own_property_only: bool,
    /// Apply `for` modifiers in the order written instead of
    /// offset, limit, reversed.
    pub ordered_hash_arguments: bool,
    /// Separator between a hash key and its value.
    pub key_value_separator: char,
    /// Allocation units per render; unbounded when absent.
    pub memory_limit: Option<u64>,
    /// Wall-clock budget per render in milliseconds; unbounded when absent.
    pub render_limit_ms: Option<u64>,
    /// Bindings consulted after the render data.
    pub globals: serde_json::Map<String, serde_json::Value>,
    pub trim_tag_left: bool,
    pub trim_tag_right: bool,
    pub trim_output_left: bool,
    pub trim_output_right: bool,
}

impl Default for QuillOptions {
    fn default() -> Self {
        QuillOptions {
            strict_variables: false,
            own_property_only: false,
            ordered_hash_arguments: false,
            key_value_separator: ':',
            memory_limit: None,
            render_limit_ms: None,
            globals: serde_json::Map::new(),
            trim_tag_left: false,
            trim_tag_right: false,
            trim_output_left: false,
            trim_output_right: false,
        }
    }
}

impl QuillOptions {
    pub fn lex_options(&self) -> LexOptions {
        LexOptions {
            trim_tag_left: self.trim_tag_left,
            trim_tag_right: self.trim_tag_right,
            trim_output_left: self.trim_output_left,
            trim_output_right: self.trim_output_right,
        }
    }
}

/// Per-render overrides. `None` falls back to the engine options.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Drive the render synchronously.
    pub sync: Option<bool>,
    pub globals: Option<Rc<Object>>,
    pub strict_variables: Option<bool>,
    pub own_property_only: Option<bool>,
    /// Share a memory budget with other renders.
    pub memory_limit: Option<Rc<Limiter>>,
    /// Share a render-time budget with other renders.
    pub render_limit: Option<Rc<Limiter>>,
    /// Share loop continuation state with other renders.
    pub registers: Option<Registers>,
}

impl RenderOptions {
    pub fn sync() -> Self {
        RenderOptions {
            sync: Some(true),
            ..RenderOptions::default()
        }
    }
}
