//! Template splitter: source text to top-level tokens.
//!
//! Markup opens with `{{` (output) or `{%` (tag). A `-` directly inside a
//! delimiter trims the whitespace on that side: `{{-` trims the text before,
//! `-}}` the text after. `LexOptions` applies the same trimming everywhere.

use quill_ir::Span;

use crate::lex_error::{LexError, LexErrorKind};
use crate::token::{HtmlToken, OutputToken, TagToken, TopLevelToken};

/// Global whitespace-control options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexOptions {
    pub trim_tag_left: bool,
    pub trim_tag_right: bool,
    pub trim_output_left: bool,
    pub trim_output_right: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Markup {
    Output,
    Tag,
}

impl Markup {
    fn close(self) -> &'static str {
        match self {
            Markup::Output => "}}",
            Markup::Tag => "%}",
        }
    }
}

/// Split `source` into top-level tokens.
pub fn split(source: &str, options: &LexOptions) -> Result<Vec<TopLevelToken>, LexError> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut trim_next = false;

    while pos < source.len() {
        let Some((open, markup)) = find_open(source, pos) else {
            push_html(&mut tokens, source, pos, source.len(), trim_next);
            break;
        };
        if open > pos {
            push_html(&mut tokens, source, pos, open, trim_next);
        }

        let mut inner_start = open + 2;
        let trim_left = if source[inner_start..].starts_with('-') {
            inner_start += 1;
            true
        } else {
            match markup {
                Markup::Output => options.trim_output_left,
                Markup::Tag => options.trim_tag_left,
            }
        };
        if trim_left {
            trim_last_html(&mut tokens);
        }

        let Some(close_rel) = source[inner_start..].find(markup.close()) else {
            let kind = match markup {
                Markup::Output => LexErrorKind::UnterminatedOutput,
                Markup::Tag => LexErrorKind::UnterminatedTag,
            };
            return Err(LexError::new(kind, Span::from_range(open..source.len())));
        };
        let close = inner_start + close_rel;
        let end = close + 2;
        let (inner_end, trim_right) = if close > inner_start && source[..close].ends_with('-') {
            (close - 1, true)
        } else {
            let trim = match markup {
                Markup::Output => options.trim_output_right,
                Markup::Tag => options.trim_tag_right,
            };
            (close, trim)
        };
        trim_next = trim_right;

        let span = Span::from_range(open..end);
        let inner = &source[inner_start..inner_end];
        match markup {
            Markup::Output => tokens.push(TopLevelToken::Output(OutputToken {
                content: inner.to_owned(),
                content_offset: offset(inner_start),
                span,
            })),
            Markup::Tag => tokens.push(TopLevelToken::Tag(tag_token(
                inner,
                inner_start,
                span,
                &source[open..end],
            )?)),
        }
        pos = end;
    }

    Ok(tokens)
}

fn find_open(source: &str, from: usize) -> Option<(usize, Markup)> {
    let bytes = source.as_bytes();
    let mut i = from;
    while let Some(rel) = source[i..].find('{') {
        let at = i + rel;
        match bytes.get(at + 1) {
            Some(b'{') => return Some((at, Markup::Output)),
            Some(b'%') => return Some((at, Markup::Tag)),
            _ => i = at + 1,
        }
    }
    None
}

fn tag_token(inner: &str, inner_start: usize, span: Span, text: &str) -> Result<TagToken, LexError> {
    let lead = inner.len() - inner.trim_start().len();
    let body = &inner[lead..];
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    if name_len == 0 {
        return Err(LexError::new(LexErrorKind::MissingTagName, span));
    }
    let args_start = inner_start + lead + name_len;
    Ok(TagToken {
        name: body[..name_len].to_owned(),
        args: body[name_len..].to_owned(),
        args_offset: offset(args_start),
        span,
        text: text.to_owned(),
    })
}

fn push_html(tokens: &mut Vec<TopLevelToken>, source: &str, start: usize, end: usize, trim: bool) {
    let raw = &source[start..end];
    let text = if trim { raw.trim_start() } else { raw };
    if text.is_empty() {
        return;
    }
    let start = end - text.len();
    tokens.push(TopLevelToken::Html(HtmlToken {
        text: text.to_owned(),
        span: Span::from_range(start..end),
    }));
}

fn trim_last_html(tokens: &mut Vec<TopLevelToken>) {
    if let Some(TopLevelToken::Html(html)) = tokens.last_mut() {
        let kept = html.text.trim_end().len();
        html.text.truncate(kept);
        html.span = Span::new(html.span.start, html.span.start + offset(kept));
        if html.text.is_empty() {
            tokens.pop();
        }
    }
}

#[inline]
fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
