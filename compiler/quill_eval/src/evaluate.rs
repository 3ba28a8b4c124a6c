//! Expression and hash-argument evaluation.

use futures::future::{FutureExt, LocalBoxFuture};
use indexmap::IndexMap;
use quill_ir::{Expr, HashArgs, PathSegment, Value, ValueToken};

use crate::context::Context;
use crate::drive::to_value;
use crate::errors::EvalResult;

/// Evaluate `expr` against `ctx`. A suspension point.
///
/// Boxed because index expressions recurse.
pub fn evaluate<'a>(expr: &'a Expr, ctx: &'a Context) -> LocalBoxFuture<'a, EvalResult> {
    async move {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Path(path) => {
                let mut keys = Vec::with_capacity(path.segments.len() + 1);
                keys.push(Value::string(&path.root));
                for segment in &path.segments {
                    match segment {
                        PathSegment::Name(name) => keys.push(Value::string(name)),
                        PathSegment::Index(index) => keys.push(evaluate(index, ctx).await?),
                    }
                }
                ctx.get(&keys).await
            }
            Expr::Range(low, high) => {
                let low = bound(low, ctx).await?;
                let high = bound(high, ctx).await?;
                let count = high.saturating_sub(low).saturating_add(1).max(0);
                ctx.memory_limit().use_units(count as u64)?;
                Ok(Value::array((low..=high).map(Value::Int).collect()))
            }
        }
    }
    .boxed_local()
}

async fn bound(expr: &Expr, ctx: &Context) -> EvalResult<i64> {
    let value = to_value(evaluate(expr, ctx).await?).await;
    Ok(value.to_integer().unwrap_or(0))
}

/// Evaluate a value token.
pub async fn evaluate_token(token: &ValueToken, ctx: &Context) -> EvalResult {
    evaluate(&token.expr, ctx).await
}

/// Evaluate every hash entry, keeping author order. A bare key renders as
/// `true`; a repeated key keeps its first position and its last value.
pub async fn render_hash(hash: &HashArgs, ctx: &Context) -> EvalResult<IndexMap<String, Value>> {
    let mut rendered = IndexMap::with_capacity(hash.entries().len());
    for entry in hash.entries() {
        let value = match &entry.value {
            Some(token) => evaluate_token(token, ctx).await?,
            None => Value::Bool(true),
        };
        rendered.insert(entry.key.clone(), value);
    }
    Ok(rendered)
}
