//! `{% increment name %}` and `{% decrement name %}`.
//!
//! Counters live in the environments, not in a scope, so they are shared
//! with the caller's data and independent of `assign`. A missing or
//! non-numeric counter starts at zero. `increment` outputs the value before
//! the change, `decrement` the value after it.

use futures::future::{FutureExt, LocalBoxFuture};
use quill_eval::{Context, Emitter, EvalResult, Template, TemplateRef};
use quill_ir::{Span, Value};
use quill_lexer::TagToken;

use crate::error::ParseError;
use crate::parser::{illegal_tag, ParseStream};

#[derive(Debug)]
pub struct IncrementTag {
    variable: String,
    span: Span,
}

#[derive(Debug)]
pub struct DecrementTag {
    variable: String,
    span: Span,
}

fn read_variable(token: &TagToken) -> Result<String, ParseError> {
    let mut tokenizer = token.tokenizer();
    match tokenizer.read_identifier() {
        Some(name) if tokenizer.end() => Ok(name.to_owned()),
        _ => Err(illegal_tag(token)),
    }
}

pub fn parse_increment(token: TagToken, _: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    Ok(Box::new(IncrementTag {
        variable: read_variable(&token)?,
        span: token.span,
    }))
}

pub fn parse_decrement(token: TagToken, _: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    Ok(Box::new(DecrementTag {
        variable: read_variable(&token)?,
        span: token.span,
    }))
}

/// Add `delta` to the counter, returning `(before, after)`.
fn step(ctx: &mut Context, variable: &str, delta: i64) -> (Value, Value) {
    let before = match ctx.environments.get_own(variable) {
        Some(n @ (Value::Int(_) | Value::Float(_))) => n.clone(),
        _ => Value::Int(0),
    };
    let after = match before {
        Value::Float(x) => Value::Float(x + delta as f64),
        ref other => Value::Int(other.to_integer().unwrap_or(0).saturating_add(delta)),
    };
    ctx.environments.insert(variable, after.clone());
    (before, after)
}

impl Template for IncrementTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            let (before, _) = step(ctx, &self.variable, 1);
            emitter.write(&before.to_string());
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl Template for DecrementTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            let (_, after) = step(ctx, &self.variable, -1);
            emitter.write(&after.to_string());
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }
}
