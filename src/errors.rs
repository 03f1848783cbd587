/*!
 * Error types for the hitchkit application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

use crate::template::TokenKind;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Whether a retry with backoff has any chance of succeeding.
    ///
    /// Connection problems, rate limits and server-side errors are transient;
    /// authentication failures, client errors and unparseable responses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

/// Specific structural incompatibility between two tokenized templates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralMismatch {
    /// The two documents produced different numbers of tokens
    #[error("token count mismatch: {original} vs {translated}")]
    TokenCount {
        /// Token count of the original document
        original: usize,
        /// Token count of the translated document
        translated: usize,
    },

    /// The tokens at an index are of different kinds
    #[error("token {index}: kind mismatch ({original} vs {translated})")]
    TokenKind {
        /// Index of the offending token pair
        index: usize,
        /// Kind on the original side
        original: TokenKind,
        /// Kind on the translated side
        translated: TokenKind,
    },

    /// Both tokens are tags but their names differ
    #[error("token {index}: tag mismatch (<{original}> vs <{translated}>)")]
    TagName {
        /// Index of the offending token pair
        index: usize,
        /// Tag name on the original side
        original: String,
        /// Tag name on the translated side
        translated: String,
    },

    /// Both tokens are expressions but their opening delimiters differ
    #[error("token {index}: expression delimiter mismatch ({original} vs {translated})")]
    ExpressionDelimiter {
        /// Index of the offending token pair
        index: usize,
        /// Opening delimiter on the original side
        original: String,
        /// Opening delimiter on the translated side
        translated: String,
    },
}

/// Errors that can occur in the template engine
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A tag token whose name cannot be extracted
    #[error("cannot extract tag name from: {tag}")]
    MalformedTag {
        /// The offending tag content
        tag: String
    },

    /// The translated document is not structurally compatible with the original
    #[error("structural mismatch: {0}")]
    StructuralMismatch(#[from] StructuralMismatch),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the template engine
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// The model reply carried no extractable payload
    #[error("No usable payload in model reply for {context}")]
    UnusableReply {
        /// What was being translated (filename or point id)
        context: String
    },

    /// All validation attempts for a document were exhausted
    #[error("Validation attempts exhausted for {context}: {last_error}")]
    AttemptsExhausted {
        /// What was being translated
        context: String,
        /// The last structural failure observed
        last_error: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the template engine
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
