/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension, Row};
use sha2::{Digest, Sha256};

use super::connection::DatabaseConnection;
use super::models::{
    CommentReportRow, CommentTranslationRecord, LanguageSummary, PointRecord,
    TemplateTranslationRecord,
};

/// Hash template source for staleness detection
pub fn hash_content(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// The underlying connection (fixtures and stats)
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    // =========================================================================
    // Template Operations
    // =========================================================================

    /// Insert or replace a template row, keyed by (filename, language)
    pub async fn upsert_template(&self, record: &TemplateTranslationRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO template_translations
                        (filename, language, translated_content, content_hash, translation_date, is_original)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        record.filename,
                        record.language,
                        record.translated_content,
                        record.content_hash,
                        record.translation_date,
                        record.is_original as i64,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a stored template row
    pub async fn get_template(
        &self,
        filename: &str,
        language: &str,
    ) -> Result<Option<TemplateTranslationRecord>> {
        let filename = filename.to_string();
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        r#"
                        SELECT id, filename, language, translated_content, content_hash,
                               translation_date, is_original
                        FROM template_translations
                        WHERE filename = ?1 AND language = ?2
                        "#,
                        params![filename, language],
                        template_record_from_row,
                    )
                    .optional()?;

                Ok(result)
            })
            .await
    }

    /// Filenames that already have a translation stored for a language
    pub async fn translated_template_filenames(&self, language: &str) -> Result<Vec<String>> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT filename FROM template_translations
                     WHERE language = ?1 AND is_original = 0",
                )?;

                let filenames = stmt
                    .query_map([language], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<String>, _>>()?;

                Ok(filenames)
            })
            .await
    }

    /// Delete all stored translations of one template.
    ///
    /// Used when the source file changed and its translations went stale;
    /// the saved original row is left in place for the caller to refresh.
    pub async fn delete_template_translations(&self, filename: &str) -> Result<usize> {
        let filename = filename.to_string();

        self.db
            .execute_async(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM template_translations
                     WHERE filename = ?1 AND is_original = 0",
                    [&filename],
                )?;

                debug!("Deleted {} stale translations of {}", deleted, filename);
                Ok(deleted)
            })
            .await
    }

    /// Per-language totals of stored template translations
    pub async fn template_summary(&self) -> Result<Vec<LanguageSummary>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT language, COUNT(*) as count, MAX(translation_date) as last_updated
                    FROM template_translations
                    WHERE is_original = 0
                    GROUP BY language
                    ORDER BY language
                    "#,
                )?;

                let summaries = stmt
                    .query_map([], |row| {
                        Ok(LanguageSummary {
                            language: row.get(0)?,
                            count: row.get(1)?,
                            last_updated: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(summaries)
            })
            .await
    }

    // =========================================================================
    // Point / Comment Operations
    // =========================================================================

    /// Points with a comment worth translating.
    ///
    /// Banned points and points under review are the site's business, not
    /// the translator's.
    pub async fn points_with_comments(&self, limit: usize) -> Result<Vec<PointRecord>> {
        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, comment, rating, country
                    FROM points
                    WHERE comment IS NOT NULL
                      AND comment != ''
                      AND NOT banned
                      AND revised_by IS NULL
                    LIMIT ?1
                    "#,
                )?;

                let points = stmt
                    .query_map([limit as i64], |row| {
                        Ok(PointRecord {
                            id: row.get(0)?,
                            comment: row.get(1)?,
                            rating: row.get(2)?,
                            country: row.get(3)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(points)
            })
            .await
    }

    /// Insert or replace a comment row, keyed by (point_id, language)
    pub async fn upsert_comment(&self, record: &CommentTranslationRecord) -> Result<()> {
        let record = record.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT OR REPLACE INTO comment_translations
                        (point_id, language, translated_comment, translation_date, is_original)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        record.point_id,
                        record.language,
                        record.translated_comment,
                        record.translation_date,
                        record.is_original as i64,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Whether a saved original already exists for a point in a language
    pub async fn has_comment_original(&self, point_id: i64, language: &str) -> Result<bool> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let exists = conn
                    .query_row(
                        "SELECT 1 FROM comment_translations
                         WHERE point_id = ?1 AND language = ?2 AND is_original = 1",
                        params![point_id, language],
                        |_| Ok(()),
                    )
                    .optional()?
                    .is_some();

                Ok(exists)
            })
            .await
    }

    /// Points that already have any row stored for a language
    pub async fn translated_point_ids(&self, language: &str) -> Result<Vec<i64>> {
        let language = language.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn
                    .prepare("SELECT point_id FROM comment_translations WHERE language = ?1")?;

                let ids = stmt
                    .query_map([language], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<i64>, _>>()?;

                Ok(ids)
            })
            .await
    }

    /// Per-language totals of stored comment translations
    pub async fn comment_summary(&self) -> Result<Vec<LanguageSummary>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT language, COUNT(*) as count, MAX(translation_date) as last_updated
                    FROM comment_translations
                    WHERE is_original = 0
                    GROUP BY language
                    ORDER BY language
                    "#,
                )?;

                let summaries = stmt
                    .query_map([], |row| {
                        Ok(LanguageSummary {
                            language: row.get(0)?,
                            count: row.get(1)?,
                            last_updated: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(summaries)
            })
            .await
    }

    /// Stored comment translations joined with their points, newest first
    pub async fn comment_report_rows(&self) -> Result<Vec<CommentReportRow>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT t.point_id, p.country, p.rating, p.comment,
                           t.language, t.is_original, t.translated_comment, t.translation_date
                    FROM comment_translations t
                    JOIN points p ON t.point_id = p.id
                    ORDER BY t.translation_date DESC, t.point_id, t.language
                    "#,
                )?;

                let rows = stmt
                    .query_map([], |row| {
                        Ok(CommentReportRow {
                            point_id: row.get(0)?,
                            country: row.get(1)?,
                            rating: row.get(2)?,
                            original_comment: row.get(3)?,
                            language: row.get(4)?,
                            is_original: row.get::<_, i64>(5)? != 0,
                            translated_comment: row.get(6)?,
                            translation_date: row.get(7)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;

                Ok(rows)
            })
            .await
    }
}

/// Map a template_translations row to its record
fn template_record_from_row(row: &Row<'_>) -> rusqlite::Result<TemplateTranslationRecord> {
    Ok(TemplateTranslationRecord {
        id: Some(row.get(0)?),
        filename: row.get(1)?,
        language: row.get(2)?,
        translated_content: row.get(3)?,
        content_hash: row.get(4)?,
        translation_date: row.get(5)?,
        is_original: row.get::<_, i64>(6)? != 0,
    })
}
