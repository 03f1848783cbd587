use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1) the site is authored in
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language codes (ISO 639-1) to translate into
    #[serde(default = "default_target_languages")]
    pub target_languages: Vec<String>,

    /// Directory holding the site's template sources
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Directory translated templates and reports are written under
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Path to the SQLite database; the platform data directory is used
    /// when unset
    #[serde(default)]
    pub database_path: Option<String>,

    /// Base URL of the live site, used for point links in reports
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Provider config
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Translation tuning
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_languages: default_target_languages(),
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            database_path: None,
            site_url: default_site_url(),
            provider: ProviderConfig::default(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        language_utils::validate_language_code(&self.source_language)
            .map_err(|e| anyhow!("Invalid source language: {}", e))?;

        if self.target_languages.is_empty() {
            return Err(anyhow!("At least one target language must be configured"));
        }

        for code in &self.target_languages {
            language_utils::validate_language_code(code)
                .map_err(|e| anyhow!("Invalid target language: {}", e))?;
        }

        Url::parse(&self.provider.endpoint)
            .map_err(|e| anyhow!("Invalid provider endpoint '{}': {}", self.provider.endpoint, e))?;

        if self.provider.concurrent_requests == 0 {
            return Err(anyhow!("concurrent_requests must be at least 1"));
        }

        if !(0.0..=1.0).contains(&self.translation.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 1.0, got {}",
                self.translation.temperature
            ));
        }

        if self.translation.max_validation_attempts == 0 {
            return Err(anyhow!("max_validation_attempts must be at least 1"));
        }

        Ok(())
    }
}

/// Chat-completions provider configuration (any OpenAI-compatible endpoint)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Translation tuning applicable to both workflows
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Temperature parameter for text generation (0.0 to 1.0)
    /// Lower values make output more deterministic, higher values more creative
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Temperature increase applied when the model reply carries no
    /// extractable payload
    #[serde(default = "default_temperature_step")]
    pub temperature_step: f32,

    /// How many fresh candidates to request before giving up on a
    /// structurally irreconcilable template
    #[serde(default = "default_max_validation_attempts")]
    pub max_validation_attempts: u32,

    /// Retry count for failed provider requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Base backoff time for provider retries (in milliseconds, doubled
    /// on each retry)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Backoff ceiling for provider retries (in milliseconds)
    #[serde(default = "default_retry_backoff_max_ms")]
    pub retry_backoff_max_ms: u64,

    /// Maximum number of point comments loaded per run
    #[serde(default = "default_comment_batch_limit")]
    pub comment_batch_limit: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            temperature_step: default_temperature_step(),
            max_validation_attempts: default_max_validation_attempts(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            retry_backoff_max_ms: default_retry_backoff_max_ms(),
            comment_batch_limit: default_comment_batch_limit(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_languages() -> Vec<String> {
    vec![
        "pl".to_string(),
        "de".to_string(),
        "fr".to_string(),
        "es".to_string(),
    ]
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_site_url() -> String {
    "https://hitchmap.com".to_string()
}

fn default_model() -> String {
    "deepseek-ai/DeepSeek-V3.2-Exp".to_string()
}

fn default_endpoint() -> String {
    "https://api.deepinfra.com/v1/openai".to_string()
}

fn default_concurrent_requests() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_temperature() -> f32 {
    0.3
}

fn default_temperature_step() -> f32 {
    0.3
}

fn default_max_validation_attempts() -> u32 {
    3
}

fn default_retry_count() -> u32 {
    5
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_retry_backoff_max_ms() -> u64 {
    10_000
}

fn default_comment_batch_limit() -> usize {
    2000
}
