/*!
 * Structural merge of a translated template over its original.
 *
 * Translation models are asked to leave markup and templating syntax
 * untouched, but cannot be trusted to comply exactly. The reconciler
 * enforces that guarantee structurally: text is taken from the
 * translation, tags and expressions are taken byte for byte from the
 * original, and any structural divergence rejects the candidate outright.
 */

use crate::errors::{StructuralMismatch, TemplateError};

use super::token::TokenKind;
use super::tokenizer::tokenize;

/// Merge a translated template with its original.
///
/// Both documents are tokenized and walked in lockstep by index. The
/// result takes text content from the translation and tag/expression
/// content from the original. A count, kind, tag-name or
/// expression-delimiter mismatch fails the whole call; there is no
/// partial output.
pub fn reconcile(original: &str, translated: &str) -> Result<String, TemplateError> {
    let original_tokens = tokenize(original);
    let translated_tokens = tokenize(translated);

    if original_tokens.len() != translated_tokens.len() {
        return Err(StructuralMismatch::TokenCount {
            original: original_tokens.len(),
            translated: translated_tokens.len(),
        }
        .into());
    }

    let mut merged = String::with_capacity(original.len().max(translated.len()));

    for (index, (original_token, translated_token)) in
        original_tokens.iter().zip(&translated_tokens).enumerate()
    {
        if original_token.kind != translated_token.kind {
            return Err(StructuralMismatch::TokenKind {
                index,
                original: original_token.kind,
                translated: translated_token.kind,
            }
            .into());
        }

        match original_token.kind {
            // The translation's wording is authoritative for text
            TokenKind::Text => merged.push_str(&translated_token.content),

            // Markup is authoritative from the original, down to attribute
            // formatting; only the tag name is checked against the candidate
            TokenKind::Tag => {
                let original_name = original_token.tag_name()?;
                let translated_name = translated_token.tag_name()?;
                if original_name != translated_name {
                    return Err(StructuralMismatch::TagName {
                        index,
                        original: original_name.to_string(),
                        translated: translated_name.to_string(),
                    }
                    .into());
                }
                merged.push_str(&original_token.content);
            }

            // Templating logic must never come from the translation; the
            // opening delimiter check only guards the expression category
            TokenKind::Expression => {
                let original_delimiter = original_token.opening_delimiter();
                let translated_delimiter = translated_token.opening_delimiter();
                if original_delimiter != translated_delimiter {
                    return Err(StructuralMismatch::ExpressionDelimiter {
                        index,
                        original: original_delimiter.to_string(),
                        translated: translated_delimiter.to_string(),
                    }
                    .into());
                }
                merged.push_str(&original_token.content);
            }
        }
    }

    Ok(merged)
}
