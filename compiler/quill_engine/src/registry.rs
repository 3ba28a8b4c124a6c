//! Tag registry: tag name to parse function.

use std::fmt;

use quill_eval::TemplateRef;
use quill_lexer::TagToken;
use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::parser::ParseStream;
use crate::tags;

/// Builds a tag node from its opening token, pulling any body from the
/// stream.
pub type TagFactory = fn(TagToken, &mut ParseStream<'_>) -> Result<TemplateRef, ParseError>;

#[derive(Clone)]
pub struct TagRegistry {
    factories: FxHashMap<String, TagFactory>,
}

impl TagRegistry {
    /// A registry with no tags.
    pub fn empty() -> Self {
        TagRegistry {
            factories: FxHashMap::default(),
        }
    }

    /// A registry with the built-in tags.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for (name, factory) in tags::builtins() {
            registry.register(name, factory);
        }
        registry
    }

    /// Register `factory` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, factory: TagFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn get(&self, name: &str) -> Option<TagFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_set().entries(names).finish()
    }
}
