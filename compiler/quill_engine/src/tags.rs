//! Built-in tags.

mod assign;
mod conditional;
mod control;
mod counter;
pub mod for_loop;

use crate::registry::TagFactory;

pub use assign::AssignTag;
pub use conditional::IfTag;
pub use control::{BreakTag, ContinueTag};
pub use counter::{DecrementTag, IncrementTag};
pub use for_loop::ForTag;

/// Name and parse function of every built-in tag.
pub fn builtins() -> [(&'static str, TagFactory); 7] {
    [
        ("for", for_loop::parse),
        ("break", control::parse_break),
        ("continue", control::parse_continue),
        ("if", conditional::parse),
        ("assign", assign::parse),
        ("increment", counter::parse_increment),
        ("decrement", counter::parse_decrement),
    ]
}
