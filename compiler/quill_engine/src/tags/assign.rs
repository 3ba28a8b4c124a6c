//! `{% assign name = value %}`: bind in the operating scope.

use futures::future::{FutureExt, LocalBoxFuture};
use quill_eval::{evaluate_token, Context, Emitter, EvalResult, Template, TemplateRef};
use quill_ir::{Span, ValueToken};
use quill_lexer::TagToken;

use crate::error::ParseError;
use crate::parser::{illegal_tag, ParseStream};

#[derive(Debug)]
pub struct AssignTag {
    name: String,
    value: ValueToken,
    span: Span,
}

pub fn parse(token: TagToken, _: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    let mut tokenizer = token.tokenizer();
    let name = tokenizer.read_identifier().map(str::to_owned);
    let has_equals = tokenizer.consume("=");
    let value = tokenizer.read_value()?;
    match (name, has_equals, value) {
        (Some(name), true, Some(value)) if tokenizer.end() => Ok(Box::new(AssignTag {
            name,
            value,
            span: token.span,
        })),
        _ => Err(illegal_tag(&token)),
    }
}

impl Template for AssignTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        _emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            let value = evaluate_token(&self.value, ctx).await?;
            ctx.bottom_mut().insert(self.name.as_str(), value);
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn arguments(&self) -> Vec<&ValueToken> {
        vec![&self.value]
    }

    fn declarations(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
