//! Configuration for quiz generation.
//!
//! All behaviour is controlled through [`QuizConfig`], built via
//! [`QuizConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config between the two front ends and to construct one in
//! tests without touching the environment.

use crate::error::QuizGenError;
use serde::{Deserialize, Serialize};

/// Default number of quiz questions when the caller does not specify one.
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

/// Configuration for the extraction pipeline.
///
/// # Example
/// ```rust
/// use pdf_quizgen::QuizConfig;
///
/// let config = QuizConfig::builder()
///     .model("gemini-2.5-flash")
///     .api_timeout_secs(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Gemini model identifier. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Override for the Generative Language API base URL. `None` uses the
    /// production endpoint. Exists so tests can point the client at a local
    /// fake server.
    pub base_url: Option<String>,

    /// Timeout for fetching a PDF from a URL, in seconds. Default: 60.
    pub download_timeout_secs: u64,

    /// Timeout for one generateContent call, in seconds. Default: 300.
    ///
    /// Reading a whole PDF and writing a summary plus N questions routinely
    /// takes tens of seconds; the generous default avoids killing healthy
    /// requests while still bounding a hung connection.
    pub api_timeout_secs: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: None,
            download_timeout_secs: 60,
            api_timeout_secs: 300,
        }
    }
}

impl QuizConfig {
    /// Create a new builder.
    pub fn builder() -> QuizConfigBuilder {
        QuizConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`QuizConfig`].
#[derive(Debug)]
pub struct QuizConfigBuilder {
    config: QuizConfig,
}

impl QuizConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<QuizConfig, QuizGenError> {
        let c = &self.config;
        if c.model.is_empty() {
            return Err(QuizGenError::InvalidConfig("model must not be empty".into()));
        }
        if c.api_timeout_secs == 0 || c.download_timeout_secs == 0 {
            return Err(QuizGenError::InvalidConfig(
                "timeouts must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = QuizConfig::default();
        assert_eq!(c.model, "gemini-2.5-flash");
        assert!(c.base_url.is_none());
        assert!(c.api_timeout_secs > 0);
    }

    #[test]
    fn builder_overrides() {
        let c = QuizConfig::builder()
            .model("gemini-2.5-pro")
            .base_url("http://127.0.0.1:8999/v1beta")
            .download_timeout_secs(10)
            .build()
            .unwrap();
        assert_eq!(c.model, "gemini-2.5-pro");
        assert_eq!(c.base_url.as_deref(), Some("http://127.0.0.1:8999/v1beta"));
        assert_eq!(c.download_timeout_secs, 10);
    }

    #[test]
    fn empty_model_is_rejected() {
        let err = QuizConfig::builder().model("").build().unwrap_err();
        assert!(matches!(err, QuizGenError::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = QuizConfig::builder().api_timeout_secs(0).build().unwrap_err();
        assert!(matches!(err, QuizGenError::InvalidConfig(_)));
    }
}
