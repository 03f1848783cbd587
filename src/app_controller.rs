/*!
 * Application controller driving the translation workflows.
 *
 * The controller owns the configuration, the translation service and the
 * repository, and runs the two batch workflows end to end:
 *
 * - templates: save/refresh originals, translate missing files per target
 *   language through the reconciler, persist and write the output tree
 * - comments: detect original languages, translate missing comments per
 *   target language, persist and write the HTML report
 */

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::database::models::{CommentTranslationRecord, LanguageSummary, PointRecord, TemplateTranslationRecord};
use crate::database::repository::{hash_content, Repository};
use crate::database::DatabaseConnection;
use crate::errors::TranslationError;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::report;
use crate::template::{are_equivalent, EquivalenceReport};
use crate::translation::{BatchRunner, LanguageDetector, TranslationService};

/// Main application controller
pub struct Controller {
    /// Application configuration
    config: Config,

    /// Translation store
    repository: Repository,

    /// Translation service
    service: TranslationService,
}

impl Controller {
    /// Create a controller from configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };
        let repository = Repository::new(db);
        let service = TranslationService::new(&config.provider, config.translation.clone())?;

        Ok(Self {
            config,
            repository,
            service,
        })
    }

    /// Create a controller from preassembled parts (for tests)
    pub fn with_parts(config: Config, repository: Repository, service: TranslationService) -> Self {
        Self {
            config,
            repository,
            service,
        }
    }

    // =========================================================================
    // Template workflow
    // =========================================================================

    /// Translate site templates into every configured target language.
    ///
    /// With `force` set, existing translations are redone instead of
    /// skipped.
    pub async fn run_templates(&self, force: bool) -> Result<()> {
        let templates_dir = PathBuf::from(&self.config.templates_dir);
        if !FileManager::dir_exists(&templates_dir) {
            return Err(anyhow!(
                "Templates directory does not exist: {:?}",
                templates_dir
            ));
        }

        let filenames = FileManager::scan_templates(&templates_dir)?;
        info!("Found {} template files", filenames.len());

        // Step 1: save or refresh originals, invalidating stale translations
        let contents = self.save_original_templates(&templates_dir, &filenames).await?;

        // Step 2: translate per target language
        let mut failed_total = 0usize;
        for language in &self.config.target_languages {
            if language == &self.config.source_language {
                continue;
            }

            failed_total += self
                .translate_templates_to(language, &filenames, &contents, force)
                .await?;
        }

        // Step 3: summary
        log_summary("Template translation summary", &self.repository.template_summary().await?);

        if failed_total > 0 {
            return Err(anyhow!(
                "{} template translations failed; see the log for details",
                failed_total
            ));
        }

        Ok(())
    }

    /// Save originals for all templates, refreshing rows whose source file
    /// changed and dropping the stale translations that went with them.
    ///
    /// Returns the file contents keyed by relative path.
    async fn save_original_templates(
        &self,
        templates_dir: &Path,
        filenames: &[String],
    ) -> Result<HashMap<String, String>> {
        let source_language = &self.config.source_language;
        let mut contents = HashMap::new();

        for filename in filenames {
            let content = FileManager::read_to_string(templates_dir.join(filename))?;
            let content_hash = hash_content(&content);

            match self.repository.get_template(filename, source_language).await? {
                None => {
                    self.repository
                        .upsert_template(&TemplateTranslationRecord::original(
                            filename,
                            source_language,
                            &content,
                            &content_hash,
                        ))
                        .await?;
                    info!("Saved original for {}", filename);
                }
                Some(stored) if stored.content_hash != content_hash => {
                    // The checker tells changed wording from changed structure,
                    // but either way the stored translations no longer match
                    // the file being served
                    let report = are_equivalent(&stored.translated_content, &content, false);
                    let stale = self.repository.delete_template_translations(filename).await?;
                    self.repository
                        .upsert_template(&TemplateTranslationRecord::original(
                            filename,
                            source_language,
                            &content,
                            &content_hash,
                        ))
                        .await?;
                    info!(
                        "Refreshed original for {} ({}; {} stale translations dropped)",
                        filename,
                        describe_change(&report),
                        stale
                    );
                }
                Some(_) => {}
            }

            contents.insert(filename.clone(), content);
        }

        Ok(contents)
    }

    /// Translate all pending templates into one language.
    ///
    /// Returns the number of files that failed.
    async fn translate_templates_to(
        &self,
        language: &str,
        filenames: &[String],
        contents: &HashMap<String, String>,
        force: bool,
    ) -> Result<usize> {
        let language_name = language_utils::get_language_name(language)?;
        info!("=== Translating templates to {} ({}) ===", language_name, language);

        let existing: HashSet<String> = if force {
            HashSet::new()
        } else {
            self.repository
                .translated_template_filenames(language)
                .await?
                .into_iter()
                .collect()
        };

        let pending: Vec<String> = filenames
            .iter()
            .filter(|f| !existing.contains(*f))
            .cloned()
            .collect();

        info!(
            "Already translated: {}, remaining: {}",
            existing.len(),
            pending.len()
        );

        if pending.is_empty() {
            return Ok(0);
        }

        let progress = make_progress_bar(pending.len() as u64, &format!("Translating to {}", language));
        let runner = BatchRunner::new(self.config.provider.concurrent_requests);
        let output_dir = PathBuf::from(&self.config.output_dir);

        let progress_bar = progress.clone();
        let results: Vec<(String, Result<()>)> = runner
            .run(
                pending,
                move |done, _total| progress_bar.set_position(done as u64),
                |filename| {
                    let language_name = language_name.clone();
                    let output_dir = output_dir.clone();
                    async move {
                        let result = self
                            .translate_one_template(&filename, language, &language_name, &output_dir, contents)
                            .await;
                        (filename, result)
                    }
                },
            )
            .await;
        progress.finish_and_clear();

        let mut failed = 0;
        for (filename, result) in results {
            match result {
                Ok(()) => info!("Translated {} to {}", filename, language),
                Err(e) => {
                    error!("Failed to translate {} to {}: {}", filename, language, e);
                    failed += 1;
                }
            }
        }

        Ok(failed)
    }

    /// Translate, persist and write out a single template
    async fn translate_one_template(
        &self,
        filename: &str,
        language: &str,
        language_name: &str,
        output_dir: &Path,
        contents: &HashMap<String, String>,
    ) -> Result<()> {
        let content = contents
            .get(filename)
            .ok_or_else(|| anyhow!("No content loaded for {}", filename))?;

        let translated = self
            .service
            .translate_and_validate(filename, content, language_name)
            .await
            .map_err(|e| anyhow!("{}", e))?;

        self.repository
            .upsert_template(&TemplateTranslationRecord::translation(
                filename,
                language,
                &translated,
                hash_content(content),
            ))
            .await?;

        let output_path = FileManager::translated_template_path(output_dir, language, filename);
        FileManager::write_to_file(&output_path, &translated)?;

        Ok(())
    }

    // =========================================================================
    // Comment workflow
    // =========================================================================

    /// Translate point comments into every configured target language
    pub async fn run_comments(&self) -> Result<()> {
        let points = self
            .repository
            .points_with_comments(self.config.translation.comment_batch_limit)
            .await?;
        info!("Found {} points with comments to translate", points.len());

        // Step 1: detect and save original languages
        self.save_original_comments(&points).await?;

        // Step 2: translate per target language
        for language in &self.config.target_languages {
            if language == &self.config.source_language {
                continue;
            }

            self.translate_comments_to(language, &points).await?;
        }

        // Step 3: report and summary
        let rows = self.repository.comment_report_rows().await?;
        if rows.is_empty() {
            info!("No translations to report");
        } else {
            let path = report::write_comment_report(
                Path::new(&self.config.output_dir),
                &rows,
                &self.config.site_url,
            )?;
            info!("HTML report written to: {:?}", path);
        }

        log_summary("Comment translation summary", &self.repository.comment_summary().await?);

        Ok(())
    }

    /// Detect each comment's language and save the original row
    async fn save_original_comments(&self, points: &[PointRecord]) -> Result<()> {
        info!("=== Detecting and saving original languages ===");

        let runner = BatchRunner::new(self.config.provider.concurrent_requests);
        let progress = make_progress_bar(points.len() as u64, "Detecting languages");

        let progress_bar = progress.clone();
        let results: Vec<Result<()>> = runner
            .run(
                points.to_vec(),
                move |done, _total| progress_bar.set_position(done as u64),
                |point| async move {
                    let detected = match self.service.detect(&point.comment).await {
                        Ok(code) => code,
                        Err(e) => {
                            warn!("Language detection failed for point {}: {}", point.id, e);
                            "unknown".to_string()
                        }
                    };

                    if !self.repository.has_comment_original(point.id, &detected).await? {
                        self.repository
                            .upsert_comment(&CommentTranslationRecord::original(
                                point.id,
                                &detected,
                                &point.comment,
                            ))
                            .await?;
                        info!("Saved original for point {} (language: {})", point.id, detected);
                    }

                    Ok(())
                },
            )
            .await;
        progress.finish_and_clear();

        for result in results {
            result?;
        }

        Ok(())
    }

    /// Translate all pending comments into one language
    async fn translate_comments_to(&self, language: &str, points: &[PointRecord]) -> Result<()> {
        let language_name = language_utils::get_language_name(language)?;
        info!("=== Translating comments to {} ({}) ===", language_name, language);

        let existing: HashSet<i64> = self
            .repository
            .translated_point_ids(language)
            .await?
            .into_iter()
            .collect();

        let pending: Vec<PointRecord> = points
            .iter()
            .filter(|p| !existing.contains(&p.id))
            .cloned()
            .collect();

        info!(
            "Already translated: {}, remaining: {}",
            existing.len(),
            pending.len()
        );

        if pending.is_empty() {
            return Ok(());
        }

        let progress = make_progress_bar(pending.len() as u64, &format!("Translating to {}", language));
        let runner = BatchRunner::new(self.config.provider.concurrent_requests);

        let progress_bar = progress.clone();
        let results: Vec<(i64, Result<()>)> = runner
            .run(
                pending,
                move |done, _total| progress_bar.set_position(done as u64),
                |point| {
                    let language_name = language_name.clone();
                    async move {
                        let result = self
                            .translate_one_comment(&point, language, &language_name)
                            .await;
                        (point.id, result)
                    }
                },
            )
            .await;
        progress.finish_and_clear();

        for (point_id, result) in results {
            match result {
                Ok(()) => info!("Translated point {} to {}", point_id, language),
                Err(e) => error!("Failed to translate point {}: {}", point_id, e),
            }
        }

        Ok(())
    }

    /// Translate and persist a single comment.
    ///
    /// A reply the model never made usable falls back to the original
    /// wording; a translation matching the original is stored with the
    /// verbatim flag set.
    async fn translate_one_comment(
        &self,
        point: &PointRecord,
        language: &str,
        language_name: &str,
    ) -> Result<()> {
        let translated = self
            .service
            .translate_comment(point.id, &point.comment, point.rating, language_name)
            .await
            .map_err(|e: TranslationError| anyhow!("{}", e))?
            .unwrap_or_else(|| point.comment.clone());

        let is_original = point.comment.trim() == translated.trim();

        self.repository
            .upsert_comment(&CommentTranslationRecord::translation(
                point.id,
                language,
                &translated,
                is_original,
            ))
            .await?;

        Ok(())
    }

    // =========================================================================
    // Verify / status
    // =========================================================================

    /// Compare two template files for structural equivalence
    pub fn verify_files(
        path_a: &Path,
        path_b: &Path,
        strict_whitespace: bool,
    ) -> Result<EquivalenceReport> {
        let template_a = FileManager::read_to_string(path_a)?;
        let template_b = FileManager::read_to_string(path_b)?;

        Ok(are_equivalent(&template_a, &template_b, strict_whitespace))
    }

    /// Log stored translation totals for both stores
    pub async fn status(&self) -> Result<()> {
        let stats = self
            .repository
            .connection()
            .stats()
            .context("Failed to read database stats")?;
        info!("Database: {}", stats);

        log_summary("Template translation summary", &self.repository.template_summary().await?);
        log_summary("Comment translation summary", &self.repository.comment_summary().await?);

        Ok(())
    }
}

/// Log one per-language summary block
fn log_summary(title: &str, summaries: &[LanguageSummary]) {
    info!("=== {} ===", title);
    if summaries.is_empty() {
        info!("(nothing translated yet)");
        return;
    }
    for summary in summaries {
        info!(
            "{}: {} (last updated: {})",
            summary.language,
            summary.count,
            summary.last_updated.as_deref().unwrap_or("never")
        );
    }
}

/// Shorthand for the original-refresh log line
fn describe_change(report: &EquivalenceReport) -> &'static str {
    if report.equivalent {
        "wording changed"
    } else {
        "structure changed"
    }
}

/// Progress bar in the house style
fn make_progress_bar(len: u64, message: &str) -> ProgressBar {
    let progress = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("#>-"));
    progress.set_message(message.to_string());
    progress
}
