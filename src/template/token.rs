/*!
 * Document model for tokenized templates.
 */

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TemplateError;

/// Regex for extracting a tag name: optional '/', then either the HTML
/// comment marker or a run of name characters immediately after '<'
static TAG_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^</?\s*(!--|[\w\-.]+)").expect("Invalid tag name regex")
});

/// Kind of a template token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A templating-language block: `{{ ... }}`, `{% ... %}` or `{# ... #}`
    Expression,

    /// An HTML tag, including closing tags and comment markers
    Tag,

    /// Everything else: human-readable content and inter-tag whitespace
    Text,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Expression => "expression",
            TokenKind::Tag => "tag",
            TokenKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// A single token of a template document.
///
/// `content` is the exact substring of the source document this token
/// covers; concatenating all tokens of a document in order reconstructs
/// the document byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Kind of this token
    pub kind: TokenKind,

    /// The exact source substring this token covers
    pub content: String,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, content: impl Into<String>) -> Self {
        Token {
            kind,
            content: content.into(),
        }
    }

    /// Extract the tag name from a `Tag` token.
    ///
    /// The tokenizer never produces a tag this fails for, but tokens may
    /// also come from external callers.
    pub fn tag_name(&self) -> Result<&str, TemplateError> {
        TAG_NAME_REGEX
            .captures(&self.content)
            .and_then(|captures| captures.get(1))
            .map(|name| name.as_str())
            .ok_or_else(|| TemplateError::MalformedTag {
                tag: self.content.clone(),
            })
    }

    /// The opening delimiter of an `Expression` token (`{{`, `{%` or `{#`).
    ///
    /// Falls back to the whole content for tokens shorter than the
    /// delimiter width.
    pub fn opening_delimiter(&self) -> &str {
        self.content.get(..2).unwrap_or(&self.content)
    }
}
