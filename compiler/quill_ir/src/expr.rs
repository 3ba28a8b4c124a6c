//! Value expressions appearing in outputs and tag arguments.
//!
//! Expressions are deliberately small: literals, variable paths and ranges.
//! Every expression handed to a tag is wrapped in a `ValueToken`, which keeps
//! the literal source text; tags use that text as an identity (for example the
//! loop continuation key is derived from it).

use std::rc::Rc;

use crate::span::Span;
use crate::value::Value;

/// A literal constant.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(Rc::clone(s)),
        }
    }
}

/// One step after the root of a variable path.
#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    /// `.name`
    Name(String),
    /// `[expr]`
    Index(Expr),
}

/// `root.seg[expr].seg`, resolved through the context scope chain.
#[derive(Clone, Debug, PartialEq)]
pub struct VariablePath {
    pub root: String,
    pub segments: Vec<PathSegment>,
}

/// A value expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Path(VariablePath),
    /// `(low..high)`, inclusive on both ends.
    Range(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Root names of every variable path in this expression, including
    /// paths nested in index brackets and range bounds.
    pub fn variable_roots(&self) -> Vec<&str> {
        let mut roots = Vec::new();
        self.collect_roots(&mut roots);
        roots
    }

    fn collect_roots<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Path(path) => {
                out.push(&path.root);
                for segment in &path.segments {
                    if let PathSegment::Index(index) = segment {
                        index.collect_roots(out);
                    }
                }
            }
            Expr::Range(low, high) => {
                low.collect_roots(out);
                high.collect_roots(out);
            }
        }
    }
}

/// An expression together with its exact source text.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueToken {
    pub expr: Expr,
    text: String,
    pub span: Span,
}

impl ValueToken {
    pub fn new(expr: Expr, text: impl Into<String>, span: Span) -> Self {
        ValueToken {
            expr,
            text: text.into(),
            span,
        }
    }

    /// The source text this expression was parsed from.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// `key: value`. A bare `key` has no value and evaluates to `true`.
#[derive(Clone, Debug, PartialEq)]
pub struct HashEntry {
    pub key: String,
    pub value: Option<ValueToken>,
    pub span: Span,
}

/// Named tag arguments in the order the author wrote them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HashArgs {
    entries: Vec<HashEntry>,
}

impl HashArgs {
    pub fn new(entries: Vec<HashEntry>) -> Self {
        HashArgs { entries }
    }

    pub fn entries(&self) -> &[HashEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first entry named `key`.
    pub fn get(&self, key: &str) -> Option<&HashEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Every value-bearing entry's expression.
    pub fn value_tokens(&self) -> impl Iterator<Item = &ValueToken> {
        self.entries.iter().filter_map(|entry| entry.value.as_ref())
    }
}
