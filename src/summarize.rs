//! Top-level extraction operations.
//!
//! One request flows straight through:
//!
//! ```text
//! prompt ──▶ generate ──▶ normalize ──▶ parse ──▶ validate
//! ```
//!
//! No step retries; the first classified failure terminates the request and
//! propagates to the caller. There are no partial results, no streaming, and
//! no cancellation hook — once the generation call is in flight it runs to
//! completion or failure. The generation service handle is the only shared
//! state and it is read-only, so concurrent callers are fully independent.

use crate::error::QuizGenError;
use crate::pipeline::{extract, normalize};
use crate::pipeline::gemini::GenerationService;
use crate::prompts::{quiz_prompt, DEFAULT_SUMMARY_PROMPT};
use crate::schema::{SummaryResult, SummaryWithQuiz};
use tracing::{debug, info};

/// Summarise a PDF and generate `num_questions` multiple-choice questions.
///
/// This is the core operation both front ends reduce to.
///
/// `num_questions` parameterises the prompt only — the returned quiz length
/// is whatever the model produced, and is not cross-checked against the
/// request.
///
/// # Errors
/// * [`QuizGenError::GenerationFailed`] — the model call failed
/// * [`QuizGenError::MalformedResponse`] — the output was not JSON
/// * [`QuizGenError::SchemaViolation`] — the JSON had the wrong shape
pub async fn summarize_and_quiz(
    service: &dyn GenerationService,
    pdf_bytes: &[u8],
    num_questions: u32,
) -> Result<SummaryWithQuiz, QuizGenError> {
    info!(
        pdf_len = pdf_bytes.len(),
        num_questions, "Generating summary and quiz"
    );

    let prompt = quiz_prompt(num_questions);
    let raw = service.generate(pdf_bytes, &prompt).await?;
    let normalized = normalize_response_logged(&raw);
    let result: SummaryWithQuiz = extract::parse_validated(&normalized)?;

    info!(quiz_len = result.quiz.len(), "Extraction succeeded");
    Ok(result)
}

/// Produce a free-form summary of a PDF.
///
/// Unlike [`summarize_and_quiz`], the model's raw text is the result — it is
/// wrapped into a [`SummaryResult`] without JSON parsing, so `prompt` may
/// ask for any summary style. `None` uses
/// [`DEFAULT_SUMMARY_PROMPT`].
pub async fn summarize(
    service: &dyn GenerationService,
    pdf_bytes: &[u8],
    prompt: Option<&str>,
) -> Result<SummaryResult, QuizGenError> {
    info!(pdf_len = pdf_bytes.len(), "Generating summary");

    let prompt = prompt.unwrap_or(DEFAULT_SUMMARY_PROMPT);
    let summary = service.generate(pdf_bytes, prompt).await?;

    Ok(SummaryResult { summary })
}

fn normalize_response_logged(raw: &str) -> String {
    let normalized = normalize::normalize_response(raw);
    if normalized.len() != raw.trim().len() {
        debug!("Stripped fenced-block wrapper from model output");
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// A stub generation service returning fixed text, isolating the
    /// pipeline from the non-deterministic external model.
    struct FixedResponse(&'static str);

    #[async_trait]
    impl GenerationService for FixedResponse {
        async fn generate(&self, _pdf: &[u8], _prompt: &str) -> Result<String, QuizGenError> {
            Ok(self.0.to_string())
        }
    }

    struct AlwaysFails;

    #[async_trait]
    impl GenerationService for AlwaysFails {
        async fn generate(&self, _pdf: &[u8], _prompt: &str) -> Result<String, QuizGenError> {
            Err(QuizGenError::GenerationFailed {
                detail: "quota exceeded".into(),
            })
        }
    }

    #[tokio::test]
    async fn fenced_model_output_round_trips() {
        let service = FixedResponse(
            "```json\n{\"summary\":\"s\",\"quiz\":[{\"question\":\"q\",\
             \"choices\":[\"a\",\"b\",\"c\",\"d\"],\"correct_index\":2}]}\n```",
        );
        let result = summarize_and_quiz(&service, b"%PDF-1.7", 1).await.unwrap();
        assert_eq!(result.summary, "s");
        assert_eq!(result.quiz.len(), 1);
        assert_eq!(result.quiz[0].correct_index, 2);
    }

    #[tokio::test]
    async fn generation_failure_propagates_unchanged() {
        let err = summarize_and_quiz(&AlwaysFails, b"%PDF", 5).await.unwrap_err();
        assert!(matches!(err, QuizGenError::GenerationFailed { .. }));
    }

    #[tokio::test]
    async fn summary_wraps_raw_text_without_parsing() {
        // The summary operation must not require JSON.
        let service = FixedResponse("A three-sentence summary. With prose. Not JSON.");
        let result = summarize(&service, b"%PDF", None).await.unwrap();
        assert_eq!(result.summary, "A three-sentence summary. With prose. Not JSON.");
    }
}
