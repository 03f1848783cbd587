/*!
 * Translation service for site templates and user comments.
 *
 * This module contains the orchestration-side translation machinery,
 * split into several submodules:
 *
 * - `core`: the translation service itself (prompting, reply extraction,
 *   reconcile-validated template translation)
 * - `batch`: bounded-concurrency processing of many translation calls
 * - `retry`: explicit exponential-backoff policy around provider calls
 * - `prompts`: prompt templates for both workflows
 * - `detect`: language detection collaborator
 */

// Re-export main types for easier usage
pub use self::batch::BatchRunner;
pub use self::core::TranslationService;
pub use self::detect::{FixedLanguageDetector, LanguageDetector};
pub use self::retry::RetryPolicy;

// Submodules
pub mod batch;
pub mod core;
pub mod detect;
pub mod prompts;
pub mod retry;
