use anyhow::{anyhow, Result};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The translation stores key rows by ISO 639-1 (2-letter) codes, while
/// prompts address the model with full English language names. This module
/// bridges the two.
/// Validate that a code is a known ISO 639-1 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// English name of a language, for use in prompts ("Polish", "French", ...)
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    Language::from_639_1(&normalized_code)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Normalize a detected language code to lowercase ISO 639-1, mapping
/// anything unrecognized to "unknown"
pub fn normalize_detected_code(code: &str) -> String {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 && Language::from_639_1(&normalized_code).is_some() {
        normalized_code
    } else {
        "unknown".to_string()
    }
}
