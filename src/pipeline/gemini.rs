//! Generation service boundary and the Gemini REST adapter.
//!
//! The pipeline never talks to Gemini directly — it talks to
//! [`GenerationService`], a one-method trait. Production wires in
//! [`GeminiClient`]; tests wire in a stub returning controlled raw text, so
//! everything downstream of the model (normalizer, parser, validator) can be
//! exercised without a network or a non-deterministic collaborator.
//!
//! [`GeminiClient`] posts to the `models/{model}:generateContent` endpoint
//! of the Generative Language API with two content parts: the PDF as a
//! base64 `inlineData` blob and the instruction prompt as text. The model
//! reads the PDF itself; this crate does no PDF parsing.
//!
//! Failures are not retried. Transport errors, non-success statuses, and
//! responses with no usable text all collapse into
//! [`QuizGenError::GenerationFailed`] and terminate the request.

use crate::config::QuizConfig;
use crate::error::QuizGenError;
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The external text-generation boundary.
///
/// One request in, raw response text out. Implementations own their
/// transport configuration (timeouts included); callers own everything that
/// happens to the text afterwards.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate a text response from a PDF document and an instruction prompt.
    async fn generate(&self, pdf_bytes: &[u8], prompt: &str) -> Result<String, QuizGenError>;
}

/// Gemini REST client. Cheap to clone; the inner `reqwest::Client` is an
/// `Arc` around a connection pool and may be shared across concurrent
/// requests. Holds no mutable state.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client from an API key and configuration.
    pub fn new(api_key: impl Into<String>, config: &QuizConfig) -> Result<Self, QuizGenError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api_timeout_secs))
            .build()
            .map_err(|e| QuizGenError::GenerationFailed {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: config.base_url.clone().unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
            model: config.model.clone(),
        })
    }

    /// Create a client reading the key from the `GEMINI_API_KEY` environment
    /// variable.
    pub fn from_env(config: &QuizConfig) -> Result<Self, QuizGenError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(QuizGenError::MissingApiKey {
                var: "GEMINI_API_KEY".into(),
            })?;
        Self::new(api_key, config)
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(&self, pdf_bytes: &[u8], prompt: &str) -> Result<String, QuizGenError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: "application/pdf".to_string(),
                            data: base64::engine::general_purpose::STANDARD.encode(pdf_bytes),
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        debug!(
            model = %self.model,
            pdf_len = pdf_bytes.len(),
            "Calling Gemini generateContent"
        );

        let res = self.client.post(&url).json(&payload).send().await.map_err(|e| {
            QuizGenError::GenerationFailed {
                detail: e.to_string(),
            }
        })?;

        let status = res.status();
        if !status.is_success() {
            let err_text = res.text().await.unwrap_or_default();
            return Err(QuizGenError::GenerationFailed {
                detail: format!("Gemini API error (status {status}): {err_text}"),
            });
        }

        let body: GenerateContentResponse =
            res.json().await.map_err(|e| QuizGenError::GenerationFailed {
                detail: format!("failed to decode Gemini response: {e}"),
            })?;

        body.first_text().ok_or(QuizGenError::GenerationFailed {
            detail: "Gemini returned no text candidates".into(),
        })
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateContentResponse {
    /// Text of the first part of the top candidate, if any.
    fn first_text(&self) -> Option<String> {
        self.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                _ => None,
            })
        })
    }
}
