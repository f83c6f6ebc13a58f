//! Instruction prompts sent to Gemini alongside the PDF.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — the JSON shape the model is asked to
//!    produce and the shape [`crate::schema`] validates must stay in sync;
//!    one file to edit keeps them honest.
//!
//! 2. **Testability** — unit tests can inspect the rendered prompt directly
//!    without a live model call, so prompt regressions are easy to catch.
//!
//! The quiz prompt carries the whole output-format contract: exact object
//! shape, exact quiz length, four choices per item, index range, and a ban
//! on anything but the raw JSON object. None of those constraints are
//! re-checked by the validator — they are requests to the model.

/// Default instruction for the summary-only tool, used when the caller does
/// not supply one.
pub const DEFAULT_SUMMARY_PROMPT: &str =
    "Summarize this PDF briefly and clearly, in five sentences or fewer.";

/// Render the instruction prompt for the summary-plus-quiz operation.
///
/// Pure function of `num_questions`; total over positive integers. Behaviour
/// for 0 is unspecified — callers are expected to pass at least 1.
pub fn quiz_prompt(num_questions: u32) -> String {
    format!(
        r#"You are a teaching assistant preparing study material for a university course.

Based on the content of the attached PDF, produce output matching this exact JSON shape:

{{
  "summary": "a 5-7 sentence summary of the entire PDF",
  "quiz": [
    {{
      "question": "a multiple-choice question about the PDF",
      "choices": ["choice 1", "choice 2", "choice 3", "choice 4"],
      "correct_index": 0,
      "explanation": "a short explanation of the correct answer"
    }}
  ]
}}

Requirements:
- The quiz array must contain exactly {num_questions} questions.
- Each choices array must contain exactly 4 entries.
- correct_index is an integer between 0 and 3.
- The summary and every quiz item must be grounded in the PDF content.
- Output the JSON object above and nothing else: no prose, no markdown
  fences, no comments."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_prompt_states_requested_count() {
        let p = quiz_prompt(7);
        assert!(p.contains("exactly 7 questions"));
    }

    #[test]
    fn quiz_prompt_pins_the_json_shape() {
        let p = quiz_prompt(5);
        for field in ["\"summary\"", "\"quiz\"", "\"question\"", "\"choices\"", "\"correct_index\"", "\"explanation\""] {
            assert!(p.contains(field), "prompt must mention {field}");
        }
        assert!(p.contains("between 0 and 3"));
        assert!(p.contains("exactly 4 entries"));
    }

    #[test]
    fn quiz_prompt_forbids_wrapping() {
        let p = quiz_prompt(5);
        assert!(p.contains("nothing else"));
        assert!(p.contains("no markdown"));
    }
}
