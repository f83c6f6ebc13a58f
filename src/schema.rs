//! Result types the model's JSON is validated against.
//!
//! Serde derive *is* the validator: a missing required field or a wrong type
//! fails deserialisation and surfaces as
//! [`crate::error::QuizGenError::SchemaViolation`]. Unknown fields are
//! ignored and `explanation` defaults to `None` when absent, so the schema
//! stays permissive the way the original service contract is.
//!
//! Deliberately **not** validated here (prompt-level requests only, see the
//! module docs on [`crate::pipeline::extract`]): quiz length equal to the
//! requested count, exactly four choices per item, and `correct_index`
//! within range. A stricter deployment would add post-parse invariant
//! checks, but that changes observable behaviour and is left to callers.

use serde::{Deserialize, Serialize};

/// One multiple-choice question.
///
/// `choices` is order-significant: `correct_index` is an index into it
/// (0-based). The prompt asks the model for exactly four choices and an
/// index in `[0, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    /// The question text.
    pub question: String,
    /// Answer choices, order-significant.
    pub choices: Vec<String>,
    /// 0-based index of the correct choice.
    pub correct_index: usize,
    /// Optional short explanation of the correct answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl QuizItem {
    /// Whether `correct_index` actually points at an entry in `choices`.
    ///
    /// Informational only — validation does not enforce this.
    pub fn index_in_range(&self) -> bool {
        self.correct_index < self.choices.len()
    }
}

/// A plain summary, produced by the summary-only operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Natural-language summary of the PDF.
    pub summary: String,
}

/// Summary plus quiz, the result of the full pipeline.
///
/// Created fresh per request from model output, immutable once constructed,
/// discarded after the response is rendered. `quiz` length *should* equal
/// the requested count but only the prompt asks for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryWithQuiz {
    /// Natural-language summary of the PDF.
    pub summary: String,
    /// Ordered quiz items.
    pub quiz: Vec<QuizItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_absent_deserializes_to_none() {
        let item: QuizItem = serde_json::from_str(
            r#"{"question":"q","choices":["a","b","c","d"],"correct_index":1}"#,
        )
        .unwrap();
        assert_eq!(item.explanation, None);
        assert!(item.index_in_range());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let item: QuizItem = serde_json::from_str(
            r#"{"question":"q","choices":["a"],"correct_index":0,"difficulty":"hard"}"#,
        )
        .unwrap();
        assert_eq!(item.question, "q");
    }

    #[test]
    fn out_of_range_index_still_deserializes() {
        // Known permissive behaviour: the schema only checks integer typing,
        // not that the index points at a real choice.
        let item: QuizItem = serde_json::from_str(
            r#"{"question":"q","choices":["a","b","c","d"],"correct_index":5}"#,
        )
        .unwrap();
        assert!(!item.index_in_range());
    }

    #[test]
    fn negative_index_fails_integer_typing() {
        let res = serde_json::from_str::<QuizItem>(
            r#"{"question":"q","choices":["a"],"correct_index":-1}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn none_explanation_is_omitted_from_json() {
        let item = QuizItem {
            question: "q".into(),
            choices: vec!["a".into(), "b".into()],
            correct_index: 0,
            explanation: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("explanation"));
    }
}
