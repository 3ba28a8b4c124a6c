//! Text and output nodes.

use futures::future::{FutureExt, LocalBoxFuture};
use quill_eval::{evaluate_token, to_value, Context, Emitter, EvalResult, Template};
use quill_ir::{Span, ValueToken};
use quill_lexer::{HtmlToken, OutputToken};

use crate::error::ParseError;

/// Literal text.
#[derive(Debug)]
pub struct HtmlNode {
    text: String,
    span: Span,
}

impl HtmlNode {
    pub fn new(token: HtmlToken) -> Self {
        HtmlNode {
            text: token.text,
            span: token.span,
        }
    }
}

impl Template for HtmlNode {
    fn render<'a>(
        &'a self,
        _ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            emitter.write(&self.text);
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }
}

/// `{{ value }}`. An empty output renders nothing.
#[derive(Debug)]
pub struct OutputNode {
    value: Option<ValueToken>,
    span: Span,
}

impl OutputNode {
    pub fn parse(token: OutputToken) -> Result<Self, ParseError> {
        let mut tokenizer = token.tokenizer();
        let value = tokenizer.read_value()?;
        if !tokenizer.end() {
            return Err(ParseError::IllegalOutput {
                text: format!("{{{{{}}}}}", token.content),
                span: token.span,
            });
        }
        Ok(OutputNode {
            value,
            span: token.span,
        })
    }
}

impl Template for OutputNode {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            if let Some(token) = &self.value {
                let value = to_value(evaluate_token(token, ctx).await?).await;
                emitter.write(&value.to_string());
            }
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }

    fn arguments(&self) -> Vec<&ValueToken> {
        self.value.iter().collect()
    }
}
