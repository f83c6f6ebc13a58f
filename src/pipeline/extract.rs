//! Parse and validate the normalized model output.
//!
//! Two distinct failure points, two distinct errors:
//!
//! 1. The text is not JSON at all →
//!    [`QuizGenError::MalformedResponse`], carrying the underlying
//!    `serde_json` error and a 300-character prefix of the offending text.
//!    Never the full text — a runaway model response must not produce a
//!    runaway error payload.
//! 2. The text is JSON but the wrong shape →
//!    [`QuizGenError::SchemaViolation`], carrying the serde error message
//!    (which names the missing/mistyped field) and the offending value.
//!
//! Parsing goes through an intermediate [`serde_json::Value`] so that the
//! schema error can include what the model actually produced, not just where
//! deserialisation gave up.
//!
//! The validator is deliberately permissive beyond structural shape: it does
//! not cross-check quiz length against the requested count, choices length
//! against 4, or `correct_index` against the choices range. Those are
//! prompt-level requests to the model; enforcing them here would reject
//! responses the service has always accepted.

use crate::error::QuizGenError;
use serde::de::DeserializeOwned;

/// Parse `text` as JSON and validate it into `T`.
///
/// `T` is one of the [`crate::schema`] result types; which one depends on
/// the operation being fulfilled.
pub fn parse_validated<T: DeserializeOwned>(text: &str) -> Result<T, QuizGenError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| QuizGenError::malformed(text, e))?;

    serde_json::from_value(value.clone()).map_err(|e| QuizGenError::SchemaViolation {
        detail: e.to_string(),
        data: value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SNIPPET_MAX_CHARS;
    use crate::schema::{SummaryResult, SummaryWithQuiz};

    #[test]
    fn valid_payload_parses() {
        let text = r#"{
            "summary": "Covers ownership and borrowing.",
            "quiz": [
                {"question": "What enforces memory safety?",
                 "choices": ["the GC", "the borrow checker", "the linker", "unsafe"],
                 "correct_index": 1,
                 "explanation": "Compile-time borrow checking."}
            ]
        }"#;
        let result: SummaryWithQuiz = parse_validated(text).unwrap();
        assert_eq!(result.quiz.len(), 1);
        assert_eq!(result.quiz[0].correct_index, 1);
    }

    #[test]
    fn broken_json_is_malformed() {
        let err = parse_validated::<SummaryWithQuiz>(r#"{"summary": "x", "quiz": [}"#).unwrap_err();
        assert!(matches!(err, QuizGenError::MalformedResponse { .. }));
    }

    #[test]
    fn malformed_snippet_stays_bounded() {
        let text = format!("{{\"summary\": \"{}\", ", "a".repeat(2000));
        let err = parse_validated::<SummaryWithQuiz>(&text).unwrap_err();
        match err {
            QuizGenError::MalformedResponse { snippet, .. } => {
                assert!(snippet.chars().count() <= SNIPPET_MAX_CHARS);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn missing_quiz_is_schema_violation_naming_field() {
        let err = parse_validated::<SummaryWithQuiz>(r#"{"summary": "x"}"#).unwrap_err();
        match err {
            QuizGenError::SchemaViolation { detail, data } => {
                assert!(detail.contains("quiz"), "detail should name the field: {detail}");
                assert_eq!(data["summary"], "x");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_schema_violation() {
        let err =
            parse_validated::<SummaryWithQuiz>(r#"{"summary": "x", "quiz": "not a list"}"#)
                .unwrap_err();
        assert!(matches!(err, QuizGenError::SchemaViolation { .. }));
    }

    #[test]
    fn out_of_range_index_passes_validation() {
        // Documented gap: only integer typing is enforced, not index range.
        let text = r#"{"summary": "x", "quiz": [
            {"question": "q", "choices": ["a","b","c","d"], "correct_index": 5}
        ]}"#;
        let result: SummaryWithQuiz = parse_validated(text).unwrap();
        assert_eq!(result.quiz[0].correct_index, 5);
        assert!(!result.quiz[0].index_in_range());
    }

    #[test]
    fn summary_result_schema_also_works() {
        let result: SummaryResult = parse_validated(r#"{"summary": "short"}"#).unwrap();
        assert_eq!(result.summary, "short");
    }
}
