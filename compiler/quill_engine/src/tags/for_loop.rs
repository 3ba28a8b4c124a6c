//! `{% for variable in collection [modifiers] %}...{% else %}...{% endfor %}`
//!
//! Modifiers are hash arguments: `offset: n`, `limit: n`, `reversed`. By
//! default they compose as offset, then limit, then reversed; with ordered
//! hash arguments they apply in the order written.
//!
//! Each run records `offset + visited` in the `for` register under a key
//! built from the loop variable and the collection's source text. A later
//! loop with the same header reads it back as `continue`, so
//! `offset: continue` resumes where the previous loop stopped. Before any
//! run, `continue` is 0. An undefined `offset` or `limit` is ignored.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use indexmap::IndexMap;
use quill_eval::{
    evaluate_token, render_hash, render_templates, to_enumerable, to_value, Context, Emitter,
    EvalResult, ForloopDrop, Template, TemplateRef,
};
use quill_ir::{DropObject, HashArgs, Scope, Span, Value, ValueToken};
use quill_lexer::TagToken;
use rustc_hash::FxHashMap;

use crate::error::ParseError;
use crate::parser::{expect_no_args, illegal_tag, not_closed, ParseEvent, ParseStream};

/// Register holding loop continuation offsets.
pub const REGISTER: &str = "for";

/// Continuation offsets by continuation key.
pub type ContinueOffsets = FxHashMap<String, i64>;

const MODIFIERS: [&str; 3] = ["offset", "limit", "reversed"];

#[derive(Debug)]
pub struct ForTag {
    variable: String,
    collection: ValueToken,
    hash: HashArgs,
    templates: Vec<TemplateRef>,
    else_templates: Vec<TemplateRef>,
    ordered_modifiers: bool,
    span: Span,
}

pub fn parse(token: TagToken, stream: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    let mut tokenizer = token.tokenizer();
    let variable = tokenizer.read_identifier().map(str::to_owned);
    let keyword = tokenizer.read_identifier();
    let collection = tokenizer.read_value()?;
    let (Some(variable), Some("in"), Some(collection)) = (variable, keyword, collection) else {
        return Err(illegal_tag(&token));
    };
    let hash = tokenizer.read_hash(stream.options().key_value_separator)?;

    let mut templates = Vec::new();
    let mut else_templates = Vec::new();
    let mut in_else = false;
    loop {
        match stream.next_event(&["else", "endfor"])? {
            ParseEvent::Template(template) if in_else => else_templates.push(template),
            ParseEvent::Template(template) => templates.push(template),
            ParseEvent::Marker(marker) => {
                expect_no_args(&marker)?;
                if marker.name == "endfor" {
                    break;
                }
                in_else = true;
            }
            ParseEvent::End => return Err(not_closed(&token)),
        }
    }

    Ok(Box::new(ForTag {
        variable,
        collection,
        hash,
        templates,
        else_templates,
        ordered_modifiers: stream.options().ordered_hash_arguments,
        span: token.span,
    }))
}

impl ForTag {
    /// Register key shared by every loop with this variable and collection
    /// source text.
    pub fn continue_key(&self) -> String {
        format!("continue-{}-{}", self.variable, self.collection.text())
    }

    async fn run(&self, ctx: &mut Context, emitter: &mut Emitter) -> EvalResult<()> {
        let collection = to_value(evaluate_token(&self.collection, ctx).await?).await;
        let items = to_enumerable(&collection);
        if items.is_empty() {
            return render_templates(&self.else_templates, ctx, emitter).await;
        }

        let continue_key = self.continue_key();
        let offsets = ctx.get_register::<ContinueOffsets>(REGISTER);
        let previous = offsets
            .borrow()
            .get(&continue_key)
            .map_or(Value::Int(0), |n| Value::Int(*n));
        let hash = {
            let scoped = ctx.scoped(Scope::from_iter([("continue", previous)]));
            render_hash(&self.hash, &scoped).await?
        };

        let items = self.apply_modifiers(items, &hash);
        let offset = hash.get("offset").and_then(Value::to_integer).unwrap_or(0);
        let resume_at = offset.saturating_add(items.len() as i64);
        offsets.borrow_mut().insert(continue_key, resume_at);
        tracing::debug!(
            variable = %self.variable,
            length = items.len(),
            resume_at,
            "entering for loop"
        );

        let forloop = Rc::new(ForloopDrop::new(
            items.len(),
            self.collection.text(),
            &self.variable,
        ));
        let drop: Rc<dyn DropObject> = Rc::clone(&forloop) as Rc<dyn DropObject>;
        let scope = Scope::from_iter([("forloop", Value::Drop(drop))]);
        let mut scoped = ctx.scoped(scope);
        for item in items {
            scoped.top_mut().insert(self.variable.as_str(), item);
            scoped.break_called = false;
            scoped.continue_called = false;
            render_templates(&self.templates, &mut scoped, emitter).await?;
            if scoped.break_called {
                break;
            }
            forloop.next();
        }
        scoped.break_called = false;
        scoped.continue_called = false;
        Ok(())
    }

    fn apply_modifiers(&self, items: Vec<Value>, hash: &IndexMap<String, Value>) -> Vec<Value> {
        let modifiers: Vec<&str> = if self.ordered_modifiers {
            hash.keys()
                .map(String::as_str)
                .filter(|key| MODIFIERS.contains(key))
                .collect()
        } else {
            MODIFIERS
                .into_iter()
                .filter(|key| hash.get(*key).is_some_and(|v| !v.is_undefined()))
                .collect()
        };

        modifiers.into_iter().fold(items, |items, modifier| match modifier {
            "offset" => match count(hash, "offset") {
                Some(n) => offset(items, n),
                None => items,
            },
            "limit" => match count(hash, "limit") {
                Some(n) => limit(items, n),
                None => items,
            },
            _ => items.into_iter().rev().collect(),
        })
    }
}

/// The modifier's count. `None` for an undefined value, which leaves the
/// sequence as it is.
fn count(hash: &IndexMap<String, Value>, key: &str) -> Option<i64> {
    hash.get(key)
        .filter(|value| !value.is_undefined())
        .map(|value| value.to_integer().unwrap_or(0))
}

/// Position `n` clamped into `0..=len`, negative counting from the end.
fn clamp_index(n: i64, len: usize) -> usize {
    let len_i = len as i64;
    if n < 0 {
        len_i.saturating_add(n).max(0) as usize
    } else {
        n.min(len_i) as usize
    }
}

/// Drop the first `n` elements.
pub fn offset(mut items: Vec<Value>, n: i64) -> Vec<Value> {
    let start = clamp_index(n, items.len());
    items.drain(..start);
    items
}

/// Keep at most the first `n` elements.
pub fn limit(mut items: Vec<Value>, n: i64) -> Vec<Value> {
    let end = clamp_index(n, items.len());
    items.truncate(end);
    items
}

impl Template for ForTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        self.run(ctx, emitter).boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn children(&self) -> Vec<&dyn Template> {
        self.templates
            .iter()
            .chain(&self.else_templates)
            .map(|template| &**template)
            .collect()
    }

    fn arguments(&self) -> Vec<&ValueToken> {
        std::iter::once(&self.collection)
            .chain(self.hash.value_tokens())
            .collect()
    }

    fn argument_scope(&self) -> Vec<&str> {
        vec!["continue"]
    }

    fn block_scope(&self) -> Vec<&str> {
        vec![self.variable.as_str(), "forloop"]
    }
}
