/*!
 * Lossless template tokenizer.
 *
 * Splits a template document into an ordered sequence of typed tokens.
 * Tokenization is total: every character of the input belongs to exactly
 * one token, so concatenating the tokens' contents in order reconstructs
 * the document byte for byte.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::{Token, TokenKind};

/// Regex for templating expressions: `{{ ... }}`, `{% ... %}` and
/// `{# ... #}` blocks, non-greedy, spanning newlines
static EXPRESSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{.*?\}\}|\{%.*?%\}|\{#.*?#\}").expect("Invalid expression regex")
});

/// Regex for HTML tags (opening, closing and self-closing)
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("Invalid tag regex"));

/// Tokenize a template document into expression, tag and text tokens.
///
/// At each position the scanner tries, in priority order: a templating
/// expression, an HTML tag, and otherwise text running up to the next
/// position where either would match. Whitespace-only text spans are kept
/// as their own tokens since consecutive structural tokens with and
/// without separating whitespace differ structurally.
pub fn tokenize(document: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < document.len() {
        let expression = EXPRESSION_REGEX.find_at(document, pos);
        if let Some(found) = expression {
            if found.start() == pos {
                tokens.push(Token::new(TokenKind::Expression, found.as_str()));
                pos = found.end();
                continue;
            }
        }

        let tag = TAG_REGEX.find_at(document, pos);
        if let Some(found) = tag {
            if found.start() == pos {
                tokens.push(Token::new(TokenKind::Tag, found.as_str()));
                pos = found.end();
                continue;
            }
        }

        // Everything up to the next structural match is text
        let mut end = document.len();
        if let Some(found) = expression {
            end = end.min(found.start());
        }
        if let Some(found) = tag {
            end = end.min(found.start());
        }

        // The scan must always advance, even on input no rule matches
        if end <= pos {
            end = next_char_boundary(document, pos);
        }

        tokens.push(Token::new(TokenKind::Text, &document[pos..end]));
        pos = end;
    }

    tokens
}

/// Position one character past `pos`, respecting UTF-8 boundaries
fn next_char_boundary(document: &str, pos: usize) -> usize {
    document[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(document.len())
}
