//! Error types for the pdf-quizgen library.
//!
//! Every failure in the extraction pipeline is classified into exactly one
//! variant and surfaced immediately — no step retries, no fallback, no
//! partial results. The taxonomy mirrors the pipeline stages:
//!
//! * [`QuizGenError::DownloadFailed`] / [`QuizGenError::DownloadTimeout`] —
//!   the PDF could not be fetched from a URL.
//! * [`QuizGenError::GenerationFailed`] — the Gemini call failed (transport,
//!   auth, quota, or a service-side error).
//! * [`QuizGenError::MalformedResponse`] — the model's output, after fence
//!   stripping, is not valid JSON.
//! * [`QuizGenError::SchemaViolation`] — the JSON parsed but does not match
//!   the required result shape.
//!
//! Parse failures carry only a bounded prefix of the offending text (300
//! characters), never the full response, so error payloads stay small no
//! matter what the model emits.

use thiserror::Error;

/// Maximum length of the diagnostic snippet attached to a
/// [`QuizGenError::MalformedResponse`].
pub const SNIPPET_MAX_CHARS: usize = 300;

/// All errors returned by the pdf-quizgen library.
#[derive(Debug, Error)]
pub enum QuizGenError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// HTTP(S) fetch of the PDF failed: non-success status or transport error.
    #[error("Failed to download PDF from '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// PDF download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Generation errors ─────────────────────────────────────────────────
    /// The Gemini generateContent call failed. Not retried; terminal for
    /// the current request.
    #[error("Gemini generation call failed: {detail}")]
    GenerationFailed { detail: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The normalized model output is not valid JSON.
    ///
    /// `snippet` holds at most [`SNIPPET_MAX_CHARS`] characters of the
    /// offending text for diagnostics.
    #[error("Model did not return valid JSON: {source}\nResponse prefix: {snippet:?}")]
    MalformedResponse {
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON parsed but does not match the expected result shape
    /// (missing field, wrong type, wrong nesting). Carries the offending
    /// parsed value so callers can see exactly what the model produced.
    #[error("Model JSON does not match the expected schema: {detail}\ndata={data}")]
    SchemaViolation {
        detail: String,
        data: serde_json::Value,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// The API key environment variable is not set.
    #[error("{var} is not set.\nGet a key from Google AI Studio and export it.")]
    MissingApiKey { var: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl QuizGenError {
    /// Build a [`QuizGenError::MalformedResponse`], truncating the offending
    /// text to [`SNIPPET_MAX_CHARS`] characters.
    pub fn malformed(text: &str, source: serde_json::Error) -> Self {
        QuizGenError::MalformedResponse {
            snippet: text.chars().take(SNIPPET_MAX_CHARS).collect(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn download_failed_display_includes_url() {
        let e = QuizGenError::DownloadFailed {
            url: "https://example.com/doc.pdf".into(),
            reason: "HTTP 404 Not Found".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("https://example.com/doc.pdf"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn malformed_snippet_is_bounded() {
        let long = "x".repeat(5000);
        let e = QuizGenError::malformed(&long, json_error());
        match e {
            QuizGenError::MalformedResponse { snippet, .. } => {
                assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn malformed_short_text_kept_whole() {
        let e = QuizGenError::malformed("not json", json_error());
        match e {
            QuizGenError::MalformedResponse { snippet, .. } => {
                assert_eq!(snippet, "not json");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn schema_violation_display_carries_data() {
        let e = QuizGenError::SchemaViolation {
            detail: "missing field `quiz`".into(),
            data: serde_json::json!({"summary": "x"}),
        };
        let msg = e.to_string();
        assert!(msg.contains("missing field `quiz`"));
        assert!(msg.contains("\"summary\""));
    }
}
