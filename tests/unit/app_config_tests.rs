/*!
 * Tests for configuration loading and validation
 */

use hitchkit::app_config::Config;
use tempfile::tempdir;

#[test]
fn test_configFile_roundTrip_shouldPreserveSettings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.target_languages = vec!["pl".to_string(), "de".to_string()];
    config.provider.model = "some/model".to_string();

    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    let loaded: Config =
        serde_json::from_reader(std::fs::File::open(&path).unwrap()).unwrap();

    assert_eq!(loaded.target_languages, config.target_languages);
    assert_eq!(loaded.provider.model, "some/model");
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_partialConfigFile_shouldFillDefaults() {
    let parsed: Config = serde_json::from_str(
        r#"{
            "source_language": "en",
            "target_languages": ["fr"],
            "provider": {"api_key": "k"}
        }"#,
    )
    .unwrap();

    assert_eq!(parsed.target_languages, vec!["fr".to_string()]);
    assert_eq!(parsed.provider.api_key, "k");
    assert!(!parsed.provider.endpoint.is_empty());
    assert!(parsed.translation.max_validation_attempts >= 1);
    assert!(parsed.validate().is_ok());
}

#[test]
fn test_validate_withUnknownTargetLanguage_shouldError() {
    let config = Config {
        target_languages: vec!["zz".to_string()],
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withSourceEqualToOnlyTarget_shouldStillValidate() {
    // Translating into the source language is skipped at run time, not
    // rejected at config time
    let config = Config {
        source_language: "en".to_string(),
        target_languages: vec!["en".to_string()],
        ..Config::default()
    };

    assert!(config.validate().is_ok());
}
