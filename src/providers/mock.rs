/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::echo()` - replies with the request's fenced payload verbatim
 * - `MockProvider::failing()` - always fails with a retryable error
 * - `MockProvider::intermittent(n)` - fails every nth request
 * - `MockProvider::unfenced()` - replies without a closing fence
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// Full user prompt, fenced payload included
    pub prompt: String,
    /// The assistant priming string ("```jinja2\n", "```txt\n", ...)
    pub assistant_primer: String,
    /// Requested sampling temperature
    pub temperature: f32,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The reply text
    pub text: String,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Reply with the request's fenced payload, closing fence included
    Echo,
    /// Reply without a closing fence (unusable payload)
    Unfenced,
    /// Fail every nth request with a retryable error
    Intermittent { fail_every: usize },
    /// Always fail with a retryable error
    Failing,
    /// Always fail with a non-retryable error
    Unauthorized,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter for intermittent failures
    request_count: Arc<AtomicUsize>,
    /// Custom reply generator (optional, overrides Echo)
    custom_reply: Option<fn(&MockRequest) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_reply: None,
        }
    }

    /// Create a mock that echoes the fenced payload back
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that replies without a closing fence
    pub fn unfenced() -> Self {
        Self::new(MockBehavior::Unfenced)
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that always fails authentication
    pub fn unauthorized() -> Self {
        Self::new(MockBehavior::Unauthorized)
    }

    /// Set a custom reply generator
    pub fn with_custom_reply(mut self, generator: fn(&MockRequest) -> String) -> Self {
        self.custom_reply = Some(generator);
        self
    }

    /// Number of requests this mock has served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Extract the fenced payload from a prompt.
    ///
    /// Finds the first code fence, skips its info line, and returns
    /// everything up to the closing fence.
    pub fn fenced_payload(prompt: &str) -> Option<&str> {
        let open = prompt.find("```")?;
        let after_open = &prompt[open + 3..];
        let body_start = after_open.find('\n')? + 1;
        let body = &after_open[body_start..];
        let close = body.find("```")?;
        Some(&body[..close])
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    async fn complete(&self, request: MockRequest) -> Result<MockResponse, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Failing => {
                return Err(ProviderError::RequestFailed("mock failure".to_string()));
            }
            MockBehavior::Unauthorized => {
                return Err(ProviderError::AuthenticationError(
                    "mock authentication failure".to_string(),
                ));
            }
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && count % fail_every == 0 {
                    return Err(ProviderError::ConnectionError(format!(
                        "mock intermittent failure on request {}",
                        count
                    )));
                }
            }
            MockBehavior::Echo | MockBehavior::Unfenced => {}
        }

        if let Some(generator) = self.custom_reply {
            return Ok(MockResponse {
                text: generator(&request),
            });
        }

        let payload = Self::fenced_payload(&request.prompt).unwrap_or("").to_string();

        let text = match self.behavior {
            MockBehavior::Unfenced => payload,
            _ => format!("{}\n```", payload.trim_end_matches('\n')),
        };

        Ok(MockResponse { text })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "mock connection failure".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn extract_text(response: &MockResponse) -> String {
        response.text.clone()
    }
}
