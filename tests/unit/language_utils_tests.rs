/*!
 * Tests for language code utilities
 */

use hitchkit::language_utils::{get_language_name, normalize_detected_code, validate_language_code};

#[test]
fn test_validateLanguageCode_withSiteLanguages_shouldPass() {
    for code in ["en", "pl", "de", "fr", "es"] {
        assert!(validate_language_code(code).is_ok(), "code: {}", code);
    }
}

#[test]
fn test_getLanguageName_shouldFeedPromptsWithEnglishNames() {
    assert_eq!(get_language_name("pl").unwrap(), "Polish");
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
}

#[test]
fn test_normalizeDetectedCode_shouldMapNoiseToUnknown() {
    assert_eq!(normalize_detected_code("PL"), "pl");
    assert_eq!(normalize_detected_code("notacode"), "unknown");
}
