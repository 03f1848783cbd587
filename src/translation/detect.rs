/*!
 * Language detection for user comments.
 *
 * Detection is a collaborator, not part of the translation core: the
 * workflow only needs *some* implementation that maps text to an ISO
 * 639-1 code. The production implementation asks the chat provider; tests
 * substitute a canned detector.
 */

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::language_utils;

use super::core::TranslationService;
use super::prompts;

/// Maps a text to the ISO 639-1 code of its language
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detect the language of the text.
    ///
    /// Implementations return "unknown" rather than guessing when the
    /// text gives them nothing to work with.
    async fn detect(&self, text: &str) -> Result<String, ProviderError>;
}

#[async_trait]
impl LanguageDetector for TranslationService {
    async fn detect(&self, text: &str) -> Result<String, ProviderError> {
        let prompt = format!(
            "{}\n\n{}{}\n```",
            prompts::detection_prompt(),
            prompts::TEXT_FENCE,
            text
        );

        let reply = self.chat(&prompt, "", 0.0, 8).await?;

        // Models occasionally wrap the code in backticks or add a period
        let cleaned = reply.trim().trim_matches(|c: char| !c.is_ascii_alphabetic());
        Ok(language_utils::normalize_detected_code(cleaned))
    }
}

/// Detector returning a fixed code, for tests and offline runs
#[derive(Debug, Clone)]
pub struct FixedLanguageDetector {
    /// The code every detection returns
    code: String,
}

impl FixedLanguageDetector {
    /// Create a detector that always answers with `code`
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl LanguageDetector for FixedLanguageDetector {
    async fn detect(&self, _text: &str) -> Result<String, ProviderError> {
        Ok(self.code.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::TranslationConfig;
    use crate::providers::mock::{MockProvider, MockRequest};

    #[tokio::test]
    async fn test_fixedDetector_shouldAlwaysReturnConfiguredCode() {
        let detector = FixedLanguageDetector::new("pl");

        assert_eq!(detector.detect("anything at all").await.unwrap(), "pl");
    }

    #[tokio::test]
    async fn test_serviceDetect_withCleanReply_shouldReturnCode() {
        fn reply_with_code(_request: &MockRequest) -> String {
            "en".to_string()
        }

        let mock = MockProvider::echo().with_custom_reply(reply_with_code);
        let service = TranslationService::with_mock(mock, TranslationConfig::default());

        assert_eq!(service.detect("Great spot!").await.unwrap(), "en");
    }

    #[tokio::test]
    async fn test_serviceDetect_withNoisyReply_shouldNormalize() {
        fn noisy_reply(_request: &MockRequest) -> String {
            "`DE`.".to_string()
        }

        let mock = MockProvider::echo().with_custom_reply(noisy_reply);
        let service = TranslationService::with_mock(mock, TranslationConfig::default());

        assert_eq!(service.detect("Tolle Stelle!").await.unwrap(), "de");
    }

    #[tokio::test]
    async fn test_serviceDetect_withGibberishReply_shouldReturnUnknown() {
        fn gibberish(_request: &MockRequest) -> String {
            "I think this might be French".to_string()
        }

        let mock = MockProvider::echo().with_custom_reply(gibberish);
        let service = TranslationService::with_mock(mock, TranslationConfig::default());

        assert_eq!(service.detect("...").await.unwrap(), "unknown");
    }
}
