/*!
 * End-to-end tests for the template translation workflow, running the
 * controller against a mock provider and an in-memory database.
 */

use tempfile::tempdir;

use hitchkit::app_controller::Controller;
use hitchkit::database::repository::Repository;
use hitchkit::file_utils::FileManager;
use hitchkit::providers::mock::MockProvider;
use hitchkit::translation::TranslationService;

use crate::common;

const INDEX: &str = "<h1>Welcome</h1>\n<p>Hello {{ name }}</p>\n";
const MENU: &str =
    "{% for item in menu %}<a href=\"{{ item.url }}\">{{ item.label }}</a>{% endfor %}\n";

#[tokio::test]
async fn test_runTemplates_withEchoProvider_shouldStoreAndWriteTranslations() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();
    common::write_template_tree(templates.path(), &[("index.html", INDEX), ("nav/menu.html", MENU)]);

    let repository = Repository::new_in_memory().unwrap();
    let controller = Controller::with_parts(
        common::test_config(templates.path(), output.path()),
        repository.clone(),
        common::echo_service(),
    );

    controller.run_templates(false).await.unwrap();

    // Originals saved under the source language
    let original = repository
        .get_template("index.html", "en")
        .await
        .unwrap()
        .expect("Original should be stored");
    assert!(original.is_original);
    assert_eq!(original.translated_content, INDEX);

    // Translations stored for the target language
    let translated = repository
        .get_template("nav/menu.html", "pl")
        .await
        .unwrap()
        .expect("Translation should be stored");
    assert!(!translated.is_original);
    assert_eq!(translated.translated_content, MENU);

    // Output files written under the language tree
    let written = FileManager::read_to_string(
        output
            .path()
            .join("translated-templates")
            .join("pl")
            .join("index.html"),
    )
    .unwrap();
    assert_eq!(written, INDEX);
}

#[tokio::test]
async fn test_runTemplates_secondRun_shouldSkipExistingTranslations() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();
    common::write_template_tree(templates.path(), &[("index.html", INDEX)]);

    let repository = Repository::new_in_memory().unwrap();
    let config = common::test_config(templates.path(), output.path());

    let controller = Controller::with_parts(config.clone(), repository.clone(), common::echo_service());
    controller.run_templates(false).await.unwrap();

    let first = repository
        .get_template("index.html", "pl")
        .await
        .unwrap()
        .unwrap();

    // A provider that would now break structure must not be consulted for
    // files that are already translated
    let breaking_service = TranslationService::with_mock(
        MockProvider::echo().with_custom_reply(|_| "<div>wrong</div>\n```".to_string()),
        common::fast_translation_config(),
    );
    let controller = Controller::with_parts(config, repository.clone(), breaking_service);
    controller.run_templates(false).await.unwrap();

    let second = repository
        .get_template("index.html", "pl")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.translation_date, second.translation_date);
    assert_eq!(first.translated_content, second.translated_content);
}

#[tokio::test]
async fn test_runTemplates_withChangedSource_shouldRefreshOriginalAndRetranslate() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();
    common::write_template_tree(templates.path(), &[("index.html", INDEX)]);

    let repository = Repository::new_in_memory().unwrap();
    let config = common::test_config(templates.path(), output.path());

    let controller =
        Controller::with_parts(config.clone(), repository.clone(), common::echo_service());
    controller.run_templates(false).await.unwrap();

    // The source file changes wording
    let updated = "<h1>Welcome back</h1>\n<p>Hello {{ name }}</p>\n";
    common::write_template_tree(templates.path(), &[("index.html", updated)]);

    let controller = Controller::with_parts(config, repository.clone(), common::echo_service());
    controller.run_templates(false).await.unwrap();

    let original = repository
        .get_template("index.html", "en")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(original.translated_content, updated);

    let translated = repository
        .get_template("index.html", "pl")
        .await
        .unwrap()
        .expect("Translation should have been redone");
    assert_eq!(translated.translated_content, updated);
}

#[tokio::test]
async fn test_runTemplates_withStructureBreakingProvider_shouldFailAndStoreNothing() {
    let templates = tempdir().unwrap();
    let output = tempdir().unwrap();
    common::write_template_tree(templates.path(), &[("index.html", INDEX)]);

    let repository = Repository::new_in_memory().unwrap();
    let breaking_service = TranslationService::with_mock(
        MockProvider::echo().with_custom_reply(|_| "<div>wrong</div>\n```".to_string()),
        common::fast_translation_config(),
    );
    let controller = Controller::with_parts(
        common::test_config(templates.path(), output.path()),
        repository.clone(),
        breaking_service,
    );

    let result = controller.run_templates(false).await;

    assert!(result.is_err(), "A failed file should fail the run");

    // The original is still saved; no broken translation was persisted
    assert!(repository
        .get_template("index.html", "en")
        .await
        .unwrap()
        .is_some());
    assert!(repository
        .get_template("index.html", "pl")
        .await
        .unwrap()
        .is_none());
}
