/*!
 * End-to-end tests for the comment translation workflow, running the
 * controller against a mock provider and an in-memory database.
 */

use tempfile::tempdir;

use hitchkit::app_controller::Controller;
use hitchkit::file_utils::FileManager;
use hitchkit::providers::mock::MockProvider;
use hitchkit::translation::TranslationService;

use crate::common;

#[tokio::test]
async fn test_runComments_shouldDetectTranslateAndReport() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();

    let repository = common::repository_with_points(&[
        (1, "Great spot, short wait!", 5),
        (2, "Slow traffic, bring water.", 2),
    ]);

    let service = TranslationService::with_mock(
        MockProvider::echo().with_custom_reply(common::detection_aware_reply),
        common::fast_translation_config(),
    );
    let controller = Controller::with_parts(
        common::test_config(templates.path(), output.path()),
        repository.clone(),
        service,
    );

    controller.run_comments().await.unwrap();

    // Originals saved under the detected language
    assert!(repository.has_comment_original(1, "en").await.unwrap());
    assert!(repository.has_comment_original(2, "en").await.unwrap());

    // Both points translated into the target language; an echo provider
    // means the wording matched and the verbatim flag is set
    let mut translated = repository.translated_point_ids("pl").await.unwrap();
    translated.sort();
    assert_eq!(translated, vec![1, 2]);

    let rows = repository.comment_report_rows().await.unwrap();
    let pl_row = rows
        .iter()
        .find(|r| r.language == "pl" && r.point_id == 1)
        .expect("Translated row should exist");
    assert!(pl_row.is_original);
    assert_eq!(
        pl_row.translated_comment.as_deref(),
        Some("Great spot, short wait!")
    );

    // The HTML report links every point
    let report = FileManager::read_to_string(output.path().join("translations.html")).unwrap();
    assert!(report.contains("#1"));
    assert!(report.contains("#2"));
    assert!(report.contains("Slow traffic, bring water."));
}

#[tokio::test]
async fn test_runComments_secondRun_shouldSkipTranslatedPoints() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();

    let repository = common::repository_with_points(&[(1, "Great spot!", 5)]);

    let service = TranslationService::with_mock(
        MockProvider::echo().with_custom_reply(common::detection_aware_reply),
        common::fast_translation_config(),
    );
    let config = common::test_config(templates.path(), output.path());
    let controller = Controller::with_parts(config.clone(), repository.clone(), service);
    controller.run_comments().await.unwrap();

    let first_rows = repository.comment_report_rows().await.unwrap();

    // Second run sees nothing pending and changes nothing
    let service = TranslationService::with_mock(
        MockProvider::echo().with_custom_reply(common::detection_aware_reply),
        common::fast_translation_config(),
    );
    let controller = Controller::with_parts(config, repository.clone(), service);
    controller.run_comments().await.unwrap();

    let second_rows = repository.comment_report_rows().await.unwrap();
    assert_eq!(first_rows.len(), second_rows.len());
}

#[tokio::test]
async fn test_runComments_withUnfencedReplies_shouldFallBackToOriginalText() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();

    let repository = common::repository_with_points(&[(7, "Nice people here.", 4)]);

    // Replies never close the fence, so no translation payload is usable
    let service = TranslationService::with_mock(
        MockProvider::unfenced(),
        common::fast_translation_config(),
    );
    let controller = Controller::with_parts(
        common::test_config(templates.path(), output.path()),
        repository.clone(),
        service,
    );

    controller.run_comments().await.unwrap();

    let rows = repository.comment_report_rows().await.unwrap();
    let pl_row = rows
        .iter()
        .find(|r| r.language == "pl")
        .expect("Fallback row should be stored");

    assert!(pl_row.is_original, "Fallback stores the original wording");
    assert_eq!(pl_row.translated_comment.as_deref(), Some("Nice people here."));
}
