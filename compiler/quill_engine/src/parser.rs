//! Template parser.
//!
//! The parser turns top-level tokens into template nodes. Text and outputs
//! are handled here; each tag is handed to the factory registered for its
//! name together with the shared [`ParseStream`], so block tags pull their
//! own bodies from the stream and stop at the markers they care about
//! (`else`, `endfor`, ...). Nesting falls out of this: an inner block
//! consumes its own closing tag before the outer block sees the stream again.

use std::vec;

use quill_eval::TemplateRef;
use quill_lexer::{split, TagToken, TopLevelToken};

use crate::error::ParseError;
use crate::nodes::{HtmlNode, OutputNode};
use crate::options::QuillOptions;
use crate::registry::TagRegistry;

/// What a block tag sees when it pulls from the stream.
#[derive(Debug)]
pub enum ParseEvent {
    /// A tag named in the requested markers. Not parsed.
    Marker(TagToken),
    /// A fully parsed node, nested blocks included.
    Template(TemplateRef),
    /// The input is exhausted.
    End,
}

/// Parses template sources with a fixed tag set and options.
#[derive(Debug)]
pub struct Parser<'e> {
    tags: &'e TagRegistry,
    options: &'e QuillOptions,
}

impl<'e> Parser<'e> {
    pub fn new(tags: &'e TagRegistry, options: &'e QuillOptions) -> Self {
        Parser { tags, options }
    }

    #[inline]
    pub fn options(&self) -> &'e QuillOptions {
        self.options
    }

    /// Parse a whole template.
    pub fn parse(&self, source: &str) -> Result<Vec<TemplateRef>, ParseError> {
        let tokens = split(source, &self.options.lex_options())?;
        let mut stream = ParseStream::new(tokens, self);
        let mut templates = Vec::new();
        loop {
            match stream.next_event(&[])? {
                ParseEvent::Template(template) => templates.push(template),
                ParseEvent::End => break,
                ParseEvent::Marker(tag) => return Err(unexpected_tag(tag)),
            }
        }
        Ok(templates)
    }

    fn parse_token(
        &self,
        token: TopLevelToken,
        stream: &mut ParseStream<'_>,
    ) -> Result<TemplateRef, ParseError> {
        match token {
            TopLevelToken::Html(html) => Ok(Box::new(HtmlNode::new(html))),
            TopLevelToken::Output(output) => Ok(Box::new(OutputNode::parse(output)?)),
            TopLevelToken::Tag(tag) => {
                let Some(factory) = self.tags.get(&tag.name) else {
                    return Err(if is_branch_or_closer(&tag.name) {
                        unexpected_tag(tag)
                    } else {
                        ParseError::UnknownTag {
                            name: tag.name,
                            span: tag.span,
                        }
                    });
                };
                tracing::trace!(tag = %tag.name, span = ?tag.span, "parsing tag");
                factory(tag, stream)
            }
        }
    }
}

fn is_branch_or_closer(name: &str) -> bool {
    name.starts_with("end") || matches!(name, "else" | "elsif")
}

fn unexpected_tag(tag: TagToken) -> ParseError {
    ParseError::UnexpectedTag {
        name: tag.name,
        span: tag.span,
    }
}

/// The remaining tokens of one parse, shared by every tag factory.
pub struct ParseStream<'p> {
    tokens: vec::IntoIter<TopLevelToken>,
    parser: &'p Parser<'p>,
}

impl<'p> ParseStream<'p> {
    fn new(tokens: Vec<TopLevelToken>, parser: &'p Parser<'p>) -> Self {
        ParseStream {
            tokens: tokens.into_iter(),
            parser,
        }
    }

    pub fn options(&self) -> &'p QuillOptions {
        self.parser.options()
    }

    /// Pull the next event. Tags named in `markers` come back unparsed;
    /// anything else is parsed in full.
    pub fn next_event(&mut self, markers: &[&str]) -> Result<ParseEvent, ParseError> {
        let Some(token) = self.tokens.next() else {
            return Ok(ParseEvent::End);
        };
        match token {
            TopLevelToken::Tag(tag) if markers.contains(&tag.name.as_str()) => {
                Ok(ParseEvent::Marker(tag))
            }
            token => {
                let parser = self.parser;
                parser.parse_token(token, self).map(ParseEvent::Template)
            }
        }
    }

    /// Collect templates until one of `markers`. `None` means the input
    /// ended first.
    pub fn parse_until(
        &mut self,
        markers: &[&str],
    ) -> Result<(Vec<TemplateRef>, Option<TagToken>), ParseError> {
        let mut templates = Vec::new();
        loop {
            match self.next_event(markers)? {
                ParseEvent::Template(template) => templates.push(template),
                ParseEvent::Marker(tag) => return Ok((templates, Some(tag))),
                ParseEvent::End => return Ok((templates, None)),
            }
        }
    }
}

/// Reject arguments on a tag that takes none.
pub fn expect_no_args(tag: &TagToken) -> Result<(), ParseError> {
    if tag.has_args() {
        return Err(ParseError::UnexpectedArguments {
            tag: tag.name.clone(),
            span: tag.span,
        });
    }
    Ok(())
}

/// The standard error for a malformed tag header.
pub fn illegal_tag(tag: &TagToken) -> ParseError {
    ParseError::IllegalTag {
        text: tag.text.clone(),
        span: tag.span,
    }
}

/// The standard error for a block that was never closed.
pub fn not_closed(tag: &TagToken) -> ParseError {
    ParseError::NotClosed {
        text: tag.text.clone(),
        span: tag.span,
    }
}
