//! Top-level template tokens produced by the splitter.

use quill_ir::Span;

use crate::tokenizer::Tokenizer;

/// One piece of a template source.
#[derive(Clone, Debug, PartialEq)]
pub enum TopLevelToken {
    /// Literal text between markup.
    Html(HtmlToken),
    /// `{{ expression }}`
    Output(OutputToken),
    /// `{% name args %}`
    Tag(TagToken),
}

impl TopLevelToken {
    pub fn span(&self) -> Span {
        match self {
            TopLevelToken::Html(t) => t.span,
            TopLevelToken::Output(t) => t.span,
            TopLevelToken::Tag(t) => t.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HtmlToken {
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutputToken {
    /// The expression between the delimiters, untrimmed.
    pub content: String,
    /// Absolute source offset of `content`.
    pub content_offset: u32,
    pub span: Span,
}

impl OutputToken {
    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.content, self.content_offset)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TagToken {
    pub name: String,
    /// Everything after the name, untrimmed.
    pub args: String,
    /// Absolute source offset of `args`.
    pub args_offset: u32,
    pub span: Span,
    /// Full source text of the tag, delimiters included.
    pub text: String,
}

impl TagToken {
    /// A tokenizer over the tag arguments.
    pub fn tokenizer(&self) -> Tokenizer<'_> {
        Tokenizer::new(&self.args, self.args_offset)
    }

    /// Whether the tag carries any non-blank arguments.
    pub fn has_args(&self) -> bool {
        !self.args.trim().is_empty()
    }
}
