/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which drives the chat provider, extracts fenced payloads from model replies,
 * and validates template translations through the reconciler before they are
 * accepted.
 */

use log::{info, warn};

use crate::app_config::{ProviderConfig, TranslationConfig};
use crate::errors::{ProviderError, TranslationError};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::Provider;
use crate::template::{are_equivalent, reconcile};

use super::prompts;
use super::retry::RetryPolicy;

/// Translation provider implementation variants
#[derive(Debug)]
enum ProviderImpl {
    /// OpenAI-compatible chat-completions service
    OpenAI(OpenAI),
    /// Scripted provider for tests
    Mock(MockProvider),
}

/// Translation service driving a chat provider
#[derive(Debug)]
pub struct TranslationService {
    /// The provider implementation
    provider: ProviderImpl,

    /// Model identifier sent with each request
    model: String,

    /// Translation tuning
    options: TranslationConfig,

    /// Retry policy applied around provider calls
    retry_policy: RetryPolicy,
}

impl TranslationService {
    /// Create a translation service backed by an OpenAI-compatible endpoint
    pub fn new(provider: &ProviderConfig, options: TranslationConfig) -> anyhow::Result<Self> {
        let client = OpenAI::new(
            provider.api_key.clone(),
            provider.endpoint.clone(),
            provider.timeout_secs,
        );

        let retry_policy = RetryPolicy::new(
            options.retry_count,
            options.retry_backoff_ms,
            options.retry_backoff_max_ms,
        );

        Ok(Self {
            provider: ProviderImpl::OpenAI(client),
            model: provider.model.clone(),
            options,
            retry_policy,
        })
    }

    /// Create a translation service backed by a mock provider (for tests)
    pub fn with_mock(mock: MockProvider, options: TranslationConfig) -> Self {
        let retry_policy = RetryPolicy::new(
            options.retry_count,
            options.retry_backoff_ms,
            options.retry_backoff_max_ms,
        );

        Self {
            provider: ProviderImpl::Mock(mock),
            model: "mock".to_string(),
            options,
            retry_policy,
        }
    }

    /// Translation tuning this service runs with
    pub fn options(&self) -> &TranslationConfig {
        &self.options
    }

    /// Test the connection to the underlying provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            ProviderImpl::OpenAI(client) => client.test_connection().await,
            ProviderImpl::Mock(mock) => mock.test_connection().await,
        }
    }

    /// Send one prompt through the provider, with retry on transient failures
    pub(crate) async fn chat(
        &self,
        prompt: &str,
        assistant_primer: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        self.retry_policy
            .run(|_attempt| async move {
                match &self.provider {
                    ProviderImpl::OpenAI(client) => {
                        let mut request = OpenAIRequest::new(self.model.clone())
                            .add_message("user", prompt)
                            .temperature(temperature)
                            .max_tokens(max_tokens);
                        if !assistant_primer.is_empty() {
                            request = request.add_message("assistant", assistant_primer);
                        }
                        let response = client.complete(request).await?;
                        Ok(OpenAI::extract_text(&response))
                    }
                    ProviderImpl::Mock(mock) => {
                        let request = MockRequest {
                            prompt: prompt.to_string(),
                            assistant_primer: assistant_primer.to_string(),
                            temperature,
                        };
                        let response = mock.complete(request).await?;
                        Ok(MockProvider::extract_text(&response))
                    }
                }
            })
            .await
    }

    /// Request one template translation candidate.
    ///
    /// The assistant is primed with an open code fence; the payload is
    /// everything the model emits before closing it. A reply without a
    /// closing fence escalates the temperature and asks again, up to 1.0.
    pub async fn translate_template(
        &self,
        filename: &str,
        content: &str,
        target_language: &str,
        base_temperature: f32,
    ) -> Result<String, TranslationError> {
        let prompt = format!(
            "{}\n\n{}{}\n```",
            prompts::template_prompt(filename, target_language),
            prompts::TEMPLATE_FENCE,
            content
        );
        let max_tokens = (content.len() * 2).max(256) as u32;

        let mut temperature = base_temperature;
        loop {
            let reply = self
                .chat(&prompt, prompts::TEMPLATE_FENCE, temperature, max_tokens)
                .await?;

            if let Some(payload) = extract_fenced_reply(&reply) {
                return Ok(payload);
            }

            warn!("No fenced payload in model reply for {}", filename);
            if temperature >= 1.0 {
                return Err(TranslationError::UnusableReply {
                    context: filename.to_string(),
                });
            }
            temperature = (temperature + self.options.temperature_step).min(1.0);
        }
    }

    /// Translate a template and keep asking until a candidate survives
    /// reconciliation, or attempts run out.
    ///
    /// Each accepted result is the reconciled merge: text from the
    /// candidate, markup and expressions byte for byte from the original.
    /// Later attempts run at a higher base temperature to shake the model
    /// out of a structurally broken local optimum.
    pub async fn translate_and_validate(
        &self,
        filename: &str,
        content: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        // Outer whitespace is structural and always comes from the original;
        // fenced replies cannot round-trip it reliably.
        let trimmed_start = content.trim_start();
        let trimmed = trimmed_start.trim_end();
        let leading = &content[..content.len() - trimmed_start.len()];
        let trailing = &trimmed_start[trimmed.len()..];

        let max_attempts = self.options.max_validation_attempts;
        let mut last_error = String::from("no translation candidates produced");

        for attempt in 1..=max_attempts {
            info!(
                "Translating {} to {} (attempt {}/{})",
                filename, target_language, attempt, max_attempts
            );

            let temperature = (self.options.temperature
                + self.options.temperature_step * (attempt - 1) as f32)
                .min(1.0);

            let candidate = match self
                .translate_template(filename, trimmed, target_language, temperature)
                .await
            {
                Ok(candidate) => candidate,
                Err(TranslationError::UnusableReply { .. }) => {
                    last_error = "no usable payload in model reply".to_string();
                    continue;
                }
                Err(error) => return Err(error),
            };

            match reconcile(trimmed, &candidate) {
                Ok(merged) => {
                    let report = are_equivalent(trimmed, &merged, false);
                    if report.equivalent {
                        return Ok(format!("{}{}{}", leading, merged, trailing));
                    }
                    warn!(
                        "Merged output failed the shape check for {}: {}",
                        filename, report.reason
                    );
                    last_error = report.reason;
                }
                Err(error) => {
                    warn!("Validation failed for {}: {}", filename, error);
                    last_error = error.to_string();
                }
            }
        }

        Err(TranslationError::AttemptsExhausted {
            context: filename.to_string(),
            last_error,
        })
    }

    /// Translate a spot review.
    ///
    /// Returns `None` when the model never produced a usable payload; the
    /// caller decides what to store in that case.
    pub async fn translate_comment(
        &self,
        point_id: i64,
        comment: &str,
        rating: i64,
        target_language: &str,
    ) -> Result<Option<String>, TranslationError> {
        let prompt = format!(
            "{}\n\n{}{}\n```",
            prompts::comment_prompt(rating, target_language),
            prompts::TEXT_FENCE,
            comment
        );
        let max_tokens = comment.len().max(64) as u32;

        let mut temperature = self.options.temperature;
        loop {
            let reply = self
                .chat(&prompt, prompts::TEXT_FENCE, temperature, max_tokens)
                .await?;

            if let Some(payload) = extract_fenced_reply(&reply) {
                return Ok(Some(payload));
            }

            warn!("No fenced payload in model reply for point {}", point_id);
            if temperature >= 1.0 {
                return Ok(None);
            }
            temperature = (temperature + self.options.temperature_step).min(1.0);
        }
    }
}

/// Everything before the reply's last closing fence, trimmed.
///
/// The assistant is primed with an open fence, so a compliant reply is the
/// payload followed by ```` ``` ````. Replies without any fence are unusable.
fn extract_fenced_reply(reply: &str) -> Option<String> {
    reply.rfind("```").map(|pos| reply[..pos].trim().to_string())
}
