/*!
 * Shape equivalence check for templates.
 *
 * Answers whether two templates are structurally the same without
 * producing a merged result: identical tag and expression tokens in the
 * same positions, with text content free to differ. Used to validate a
 * candidate translation, or a stored original against a freshly read
 * file, without rewriting either.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::{Token, TokenKind};
use super::tokenizer::tokenize;

/// Maximum characters of token content quoted in a failure reason
const REASON_SNIPPET_CHARS: usize = 50;

/// Regex for runs of whitespace, collapsed to single spaces when
/// normalizing text tokens
static WHITESPACE_RUN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Outcome of an equivalence check.
///
/// Always a value, never an error: this is a query, not a mutation.
#[derive(Debug, Clone)]
pub struct EquivalenceReport {
    /// Whether the two templates are structurally equivalent
    pub equivalent: bool,

    /// Description of the result, or of the first difference found
    pub reason: String,
}

impl EquivalenceReport {
    fn pass() -> Self {
        Self {
            equivalent: true,
            reason: "templates are structurally identical".to_string(),
        }
    }

    fn fail(reason: String) -> Self {
        Self {
            equivalent: false,
            reason,
        }
    }
}

/// Check whether two templates are structurally equivalent.
///
/// With `strict_whitespace` false (the usual mode), text tokens are
/// whitespace-normalized first: runs of whitespace collapse to a single
/// space, leading/trailing whitespace is trimmed, and tokens left empty
/// are dropped. Text wording is never compared in that mode; only text
/// presence and position matter. With `strict_whitespace` true, text
/// tokens must match exactly, whitespace included.
///
/// Tag and expression tokens are always compared byte for byte.
///
/// The first difference found decides the reason; this is not an
/// exhaustive diff.
pub fn are_equivalent(
    template_a: &str,
    template_b: &str,
    strict_whitespace: bool,
) -> EquivalenceReport {
    let mut tokens_a = tokenize(template_a);
    let mut tokens_b = tokenize(template_b);

    if !strict_whitespace {
        tokens_a = normalize_text_tokens(tokens_a);
        tokens_b = normalize_text_tokens(tokens_b);
    }

    if tokens_a.len() != tokens_b.len() {
        return EquivalenceReport::fail(format!(
            "different token counts: {} vs {}",
            tokens_a.len(),
            tokens_b.len()
        ));
    }

    for (index, (token_a, token_b)) in tokens_a.iter().zip(&tokens_b).enumerate() {
        if token_a.kind != token_b.kind {
            return EquivalenceReport::fail(format!(
                "token kind mismatch at position {}: '{}' vs '{}'",
                index, token_a.kind, token_b.kind
            ));
        }

        let compare_content = match token_a.kind {
            TokenKind::Tag | TokenKind::Expression => true,
            TokenKind::Text => strict_whitespace,
        };

        if compare_content && token_a.content != token_b.content {
            return EquivalenceReport::fail(format!(
                "{} mismatch at position {}:\n  first:  {}\n  second: {}",
                token_a.kind,
                index,
                snippet(&token_a.content),
                snippet(&token_b.content)
            ));
        }
    }

    EquivalenceReport::pass()
}

/// Whitespace-normalize text tokens, dropping those left empty.
/// Tag and expression tokens pass through untouched.
fn normalize_text_tokens(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter_map(|token| {
            if token.kind != TokenKind::Text {
                return Some(token);
            }

            let normalized = WHITESPACE_RUN_REGEX
                .replace_all(token.content.trim(), " ")
                .into_owned();

            if normalized.is_empty() {
                None
            } else {
                Some(Token::new(TokenKind::Text, normalized))
            }
        })
        .collect()
}

/// Truncate content for inclusion in a failure reason
fn snippet(content: &str) -> String {
    if content.chars().count() > REASON_SNIPPET_CHARS {
        let truncated: String = content.chars().take(REASON_SNIPPET_CHARS).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areEquivalent_withTranslatedText_shouldPass() {
        let report = are_equivalent("<h1>Hello</h1>", "<h1>Bonjour</h1>", false);

        assert!(report.equivalent);
    }

    #[test]
    fn test_areEquivalent_withWhitespaceDifference_shouldPassByDefault() {
        let report = are_equivalent("<p>Hi  there</p>", "<p>Hi\nthere</p>", false);

        assert!(report.equivalent);
    }

    #[test]
    fn test_areEquivalent_withWhitespaceDifference_shouldFailInStrictMode() {
        let report = are_equivalent("<p>Hi  there</p>", "<p>Hi\nthere</p>", true);

        assert!(!report.equivalent);
    }

    #[test]
    fn test_areEquivalent_withChangedTag_shouldFail() {
        let report = are_equivalent("<h1>Welcome</h1>", "<h2>Welcome</h2>", false);

        assert!(!report.equivalent);
        assert!(report.reason.contains("mismatch"));
    }

    #[test]
    fn test_areEquivalent_withChangedExpression_shouldFail() {
        let report = are_equivalent(
            "{% if user %}<p>hi</p>{% endif %}",
            "{% if admin %}<p>hi</p>{% endif %}",
            false,
        );

        assert!(!report.equivalent);
        assert!(report.reason.contains("expression"));
    }

    #[test]
    fn test_areEquivalent_withDroppedTag_shouldReportCounts() {
        let report = are_equivalent("<p>Hi</p>", "<p>Hi", false);

        assert!(!report.equivalent);
        assert!(report.reason.contains("3 vs 2"));
    }

    #[test]
    fn test_areEquivalent_withInterTagWhitespace_shouldIgnoreItByDefault() {
        let report = are_equivalent("<div><p>x</p></div>", "<div>\n  <p>x</p>\n</div>", false);

        assert!(report.equivalent);
    }

    #[test]
    fn test_areEquivalent_withInterTagWhitespace_shouldFailInStrictMode() {
        let report = are_equivalent("<div><p>x</p></div>", "<div>\n  <p>x</p>\n</div>", true);

        assert!(!report.equivalent);
    }

    #[test]
    fn test_areEquivalent_withLongTagMismatch_shouldTruncateSnippets() {
        let long_a = format!("<a href=\"/{}\">x</a>", "a".repeat(120));
        let long_b = format!("<a href=\"/{}\">x</a>", "b".repeat(120));

        let report = are_equivalent(&long_a, &long_b, false);

        assert!(!report.equivalent);
        assert!(report.reason.contains("..."));
    }

    #[test]
    fn test_areEquivalent_withIdenticalComplexTemplate_shouldPass() {
        let template = "<!doctype html>\n<html>\n<head><title>{{ title }}</title></head>\n<body>\n{% for item in items %}\n  <div class=\"item\">{{ item.name }}</div>\n{% endfor %}\n</body>\n</html>";

        let report = are_equivalent(template, template, false);

        assert!(report.equivalent);
        assert!(report.reason.contains("identical"));
    }
}
