/*!
 * # hitchkit - operational tooling for a hitchhiking spot map
 *
 * A Rust library for the site-operations side of a hitchhiking spot map:
 * AI translation of the site's templates and user comments, with structural
 * validation that keeps markup and templating syntax byte-identical.
 *
 * ## Features
 *
 * - Lossless tokenization of HTML+Jinja templates
 * - Structural reconciliation: merge a model's translation over the
 *   original so only human-readable text changes
 * - Shape-equivalence checking between two templates
 * - Translation via any OpenAI-compatible chat endpoint
 * - SQLite persistence of originals and translations
 * - Batch processing with bounded concurrency
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `template`: tokenizer, reconciler and equivalence checker
 * - `translation`: AI-powered translation services:
 *   - `translation::core`: the translation service
 *   - `translation::batch`: bounded-concurrency batch processing
 *   - `translation::retry`: backoff policy around provider calls
 *   - `translation::detect`: language detection collaborator
 * - `providers`: client implementations for LLM providers
 * - `database`: SQLite persistence of translations
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `report`: HTML report generation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod report;
pub mod template;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError, StructuralMismatch, TemplateError, TranslationError};
pub use template::{are_equivalent, reconcile, tokenize, EquivalenceReport, Token, TokenKind};
pub use translation::TranslationService;
