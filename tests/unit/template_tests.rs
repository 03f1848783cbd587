/*!
 * Tests for the template engine: tokenizer, reconciler and equivalence
 * checker exercised through the public API.
 */

use hitchkit::errors::{StructuralMismatch, TemplateError};
use hitchkit::template::{are_equivalent, reconcile, tokenize, TokenKind};

/// A realistic page mixing all three token kinds
const PAGE: &str = r#"<!doctype html>
<html>
<head><title>{{ title }}</title></head>
<body>
  {# spot list #}
  {% for spot in spots %}
    <div class="spot" data-id="{{ spot.id }}">
      <h2>{{ spot.name }}</h2>
      <p>Rated {{ spot.rating }} by hitchhikers</p>
    </div>
  {% endfor %}
</body>
</html>
"#;

#[test]
fn test_tokenize_concatenation_shouldReconstructAnyInput() {
    let documents = [
        PAGE,
        "",
        "no markup at all",
        "{{ a }}{{ b }}{% c %}",
        "<br/><br/>",
        "dangling {{ open",
        "stray < and > everywhere",
        "tabs\tand\nnewlines between <b>tags</b>",
    ];

    for document in documents {
        let rebuilt: String = tokenize(document)
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(rebuilt, document, "lossless tokenization of {:?}", document);
    }
}

#[test]
fn test_tokenize_shouldClassifyEveryCharacterExactlyOnce() {
    let tokens = tokenize(PAGE);

    let total: usize = tokens.iter().map(|t| t.content.len()).sum();
    assert_eq!(total, PAGE.len());

    // Structural tokens never contain a delimiter split
    for token in &tokens {
        match token.kind {
            TokenKind::Expression => {
                assert!(token.content.starts_with('{'));
                assert!(token.content.ends_with('}'));
            }
            TokenKind::Tag => {
                assert!(token.content.starts_with('<'));
                assert!(token.content.ends_with('>'));
            }
            TokenKind::Text => {
                assert!(!token.content.contains('<'));
            }
        }
    }
}

#[test]
fn test_reconcile_onIdenticalInput_shouldBeIdentity() {
    assert_eq!(reconcile(PAGE, PAGE).unwrap(), PAGE);
}

#[test]
fn test_reconcile_withTranslatedText_shouldMergeTextOnly() {
    let original = "<p>Hello {{ name }}</p>";
    let translated = "<p>Bonjour {{ name }}</p>";

    assert_eq!(
        reconcile(original, translated).unwrap(),
        "<p>Bonjour {{ name }}</p>"
    );
}

#[test]
fn test_reconcile_withChangedTagName_shouldCiteIndex() {
    let error = reconcile("<div>x</div>", "<span>x</span>").unwrap_err();

    match error {
        TemplateError::StructuralMismatch(StructuralMismatch::TagName {
            index,
            original,
            translated,
        }) => {
            assert_eq!(index, 0);
            assert_eq!((original.as_str(), translated.as_str()), ("div", "span"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reconcile_withChangedExpressionCategory_shouldFail() {
    let error = reconcile("{{ user.name }}", "{% if x %}").unwrap_err();

    match error {
        TemplateError::StructuralMismatch(StructuralMismatch::ExpressionDelimiter {
            original,
            translated,
            ..
        }) => {
            assert_eq!((original.as_str(), translated.as_str()), ("{{", "{%"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reconcile_withDroppedToken_shouldReportBothCounts() {
    // 4 tokens vs 3 tokens: the trailing whitespace carries structure
    let error = reconcile("<p>Hi</p>\n", "<p>Hi</p>").unwrap_err();

    match error {
        TemplateError::StructuralMismatch(StructuralMismatch::TokenCount {
            original,
            translated,
        }) => {
            assert_eq!((original, translated), (4, 3));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reconcile_errorDisplay_shouldBeLoggable() {
    let error = reconcile("<div>x</div>", "<span>x</span>").unwrap_err();
    let message = error.to_string();

    assert!(message.contains("mismatch"));
    assert!(message.contains("div"));
    assert!(message.contains("span"));
}

#[test]
fn test_areEquivalent_isWhitespaceTolerantByDefault() {
    let (a, b) = ("<p>Hi  there</p>", "<p>Hi\nthere</p>");

    assert!(are_equivalent(a, b, false).equivalent);
    assert!(!are_equivalent(a, b, true).equivalent);
}

#[test]
fn test_areEquivalent_ignoresTextWording() {
    let report = are_equivalent("<h1>Hello</h1>", "<h1>Bonjour</h1>", false);

    assert!(report.equivalent);
}

#[test]
fn test_areEquivalent_flagsStructuralTagChange() {
    let report = are_equivalent("<h1>Welcome</h1>", "<h2>Welcome</h2>", false);

    assert!(!report.equivalent);
    assert!(report.reason.contains("mismatch"));
}

#[test]
fn test_areEquivalent_acceptsFullTranslatedPage() {
    let translated = PAGE
        .replace("Rated {{ spot.rating }} by hitchhikers", "Noté {{ spot.rating }} par les autostoppeurs");

    let report = are_equivalent(PAGE, &translated, false);

    assert!(report.equivalent, "reason: {}", report.reason);
}

#[test]
fn test_areEquivalent_rejectsRewrittenExpression() {
    let translated = PAGE.replace("{{ spot.name }}", "{{ spot.title }}");

    let report = are_equivalent(PAGE, &translated, false);

    assert!(!report.equivalent);
}

#[test]
fn test_reconcile_thenEquivalence_shouldAlwaysAgree() {
    let original = "<p>One</p> <b>two {{ x }}</b>";
    let translated = "<p>Jeden</p> <b>dwa {{ x }}</b>";

    let merged = reconcile(original, translated).unwrap();
    let report = are_equivalent(original, &merged, false);

    assert!(report.equivalent, "reason: {}", report.reason);
    assert_eq!(merged, translated);
}
