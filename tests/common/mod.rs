/*!
 * Common test utilities for the hitchkit test suite
 */

use std::path::Path;

use hitchkit::app_config::{Config, TranslationConfig};
use hitchkit::database::repository::Repository;
use hitchkit::file_utils::FileManager;
use hitchkit::providers::mock::{MockProvider, MockRequest};
use hitchkit::translation::TranslationService;

/// Translation tuning with backoff delays short enough for tests
pub fn fast_translation_config() -> TranslationConfig {
    TranslationConfig {
        retry_backoff_ms: 1,
        retry_backoff_max_ms: 2,
        ..TranslationConfig::default()
    }
}

/// Config pointed at scratch directories, translating to Polish only
pub fn test_config(templates_dir: &Path, output_dir: &Path) -> Config {
    Config {
        source_language: "en".to_string(),
        target_languages: vec!["pl".to_string()],
        templates_dir: templates_dir.to_string_lossy().to_string(),
        output_dir: output_dir.to_string_lossy().to_string(),
        translation: fast_translation_config(),
        ..Config::default()
    }
}

/// Service backed by a mock that echoes every payload back
pub fn echo_service() -> TranslationService {
    TranslationService::with_mock(MockProvider::echo(), fast_translation_config())
}

/// Scripted reply covering both workflows: detection prompts get an ISO
/// code, translation prompts get their payload echoed back
pub fn detection_aware_reply(request: &MockRequest) -> String {
    if request.prompt.starts_with("Reply with only") {
        return "en".to_string();
    }

    let payload = MockProvider::fenced_payload(&request.prompt).unwrap_or("");
    format!("{}\n```", payload.trim_end_matches('\n'))
}

/// Repository over an in-memory database with a minimal points table
pub fn repository_with_points(points: &[(i64, &str, i64)]) -> Repository {
    let repository = Repository::new_in_memory().expect("Failed to create repository");

    repository
        .connection()
        .execute(|conn| {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS points (
                    id INTEGER PRIMARY KEY,
                    comment TEXT,
                    rating INTEGER,
                    country TEXT,
                    banned INTEGER NOT NULL DEFAULT 0,
                    revised_by TEXT
                );
                "#,
            )?;
            Ok(())
        })
        .expect("Failed to create points fixture");

    for (id, comment, rating) in points {
        let (id, comment, rating) = (*id, comment.to_string(), *rating);
        repository
            .connection()
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO points (id, comment, rating, country) VALUES (?1, ?2, ?3, 'PL')",
                    rusqlite::params![id, comment, rating],
                )?;
                Ok(())
            })
            .expect("Failed to insert point");
    }

    repository
}

/// Write a small template tree into a scratch directory
pub fn write_template_tree(dir: &Path, files: &[(&str, &str)]) {
    for (filename, content) in files {
        FileManager::write_to_file(dir.join(filename), content).expect("Failed to write template");
    }
}
