//! `{% break %}` and `{% continue %}`.
//!
//! Both only raise a flag on the context. The renderer stops the current
//! body after the flagged node; the enclosing loop reads and clears the
//! flags between iterations.

use futures::future::{FutureExt, LocalBoxFuture};
use quill_eval::{Context, Emitter, EvalResult, Template, TemplateRef};
use quill_ir::Span;
use quill_lexer::TagToken;

use crate::error::ParseError;
use crate::parser::{expect_no_args, ParseStream};

#[derive(Debug)]
pub struct BreakTag {
    span: Span,
}

#[derive(Debug)]
pub struct ContinueTag {
    span: Span,
}

pub fn parse_break(token: TagToken, _: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    expect_no_args(&token)?;
    Ok(Box::new(BreakTag { span: token.span }))
}

pub fn parse_continue(token: TagToken, _: &mut ParseStream<'_>) -> Result<TemplateRef, ParseError> {
    expect_no_args(&token)?;
    Ok(Box::new(ContinueTag { span: token.span }))
}

impl Template for BreakTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        _emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            ctx.break_called = true;
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }
}

impl Template for ContinueTag {
    fn render<'a>(
        &'a self,
        ctx: &'a mut Context,
        _emitter: &'a mut Emitter,
    ) -> LocalBoxFuture<'a, EvalResult<()>> {
        async move {
            ctx.continue_called = true;
            Ok(())
        }
        .boxed_local()
    }

    fn span(&self) -> Span {
        self.span
    }
}
