/*!
 * Data models for database records.
 *
 * Plain record structs mirroring the table rows, plus the row shapes
 * queried for reports and summaries.
 */

/// RFC 3339 timestamp for a freshly written row
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A stored template row: either the saved original or one translation
#[derive(Debug, Clone)]
pub struct TemplateTranslationRecord {
    /// Row id, None before the row is stored
    pub id: Option<i64>,
    /// Template path relative to the templates directory
    pub filename: String,
    /// ISO 639-1 language code of this row's content
    pub language: String,
    /// The stored template text
    pub translated_content: String,
    /// SHA-256 of the source template this row was produced from
    pub content_hash: String,
    /// When this row was written (RFC 3339)
    pub translation_date: String,
    /// Whether this row is the saved original rather than a translation
    pub is_original: bool,
}

impl TemplateTranslationRecord {
    /// Record for a saved original template
    pub fn original(
        filename: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            filename: filename.into(),
            language: language.into(),
            translated_content: content.into(),
            content_hash: content_hash.into(),
            translation_date: now_timestamp(),
            is_original: true,
        }
    }

    /// Record for a produced translation
    pub fn translation(
        filename: impl Into<String>,
        language: impl Into<String>,
        content: impl Into<String>,
        content_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            filename: filename.into(),
            language: language.into(),
            translated_content: content.into(),
            content_hash: content_hash.into(),
            translation_date: now_timestamp(),
            is_original: false,
        }
    }
}

/// A stored comment row: either the detected original or one translation
#[derive(Debug, Clone)]
pub struct CommentTranslationRecord {
    /// Row id, None before the row is stored
    pub id: Option<i64>,
    /// The point this comment belongs to
    pub point_id: i64,
    /// ISO 639-1 language code (or "unknown" for undetectable originals)
    pub language: String,
    /// The stored comment text
    pub translated_comment: Option<String>,
    /// When this row was written (RFC 3339)
    pub translation_date: String,
    /// Whether this row carries the original wording
    pub is_original: bool,
}

impl CommentTranslationRecord {
    /// Record for a saved original comment in its detected language
    pub fn original(point_id: i64, language: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            id: None,
            point_id,
            language: language.into(),
            translated_comment: Some(comment.into()),
            translation_date: now_timestamp(),
            is_original: true,
        }
    }

    /// Record for a produced translation
    pub fn translation(
        point_id: i64,
        language: impl Into<String>,
        comment: impl Into<String>,
        is_original: bool,
    ) -> Self {
        Self {
            id: None,
            point_id,
            language: language.into(),
            translated_comment: Some(comment.into()),
            translation_date: now_timestamp(),
            is_original,
        }
    }
}

/// A spot row read from the site's `points` table
#[derive(Debug, Clone)]
pub struct PointRecord {
    /// Point id
    pub id: i64,
    /// The user comment
    pub comment: String,
    /// Rating from 1 to 5
    pub rating: i64,
    /// Country the spot is in, when known
    pub country: Option<String>,
}

/// Per-language translation totals
#[derive(Debug, Clone)]
pub struct LanguageSummary {
    /// ISO 639-1 language code
    pub language: String,
    /// Number of stored translations
    pub count: i64,
    /// Most recent translation date, when any exist
    pub last_updated: Option<String>,
}

/// One row of the comment translation report
#[derive(Debug, Clone)]
pub struct CommentReportRow {
    /// The point the comment belongs to
    pub point_id: i64,
    /// Country the spot is in, when known
    pub country: Option<String>,
    /// Rating from 1 to 5
    pub rating: i64,
    /// The comment as submitted
    pub original_comment: String,
    /// Language of the stored row
    pub language: String,
    /// Whether the stored row carries the original wording
    pub is_original: bool,
    /// The stored translation
    pub translated_comment: Option<String>,
    /// When the row was written (RFC 3339)
    pub translation_date: String,
}
