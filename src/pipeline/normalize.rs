//! Fence stripping: make the model's output JSON-parseable.
//!
//! The prompt forbids markdown fences, but models wrap their JSON in
//! ```` ```json … ``` ```` anyway often enough that parsing raw output
//! directly would fail a meaningful fraction of requests. This stage removes
//! that one wrapping, and nothing more — it is a best-effort heuristic, not
//! a markdown parser. Fences that start mid-text, multiple fenced blocks,
//! and backticks inside legitimate JSON string content are out of scope.
//!
//! When the heuristic does not apply the text passes through unmodified and
//! the parser reports the real problem.
//!
//! Note on stripping scope: once a leading fence is seen, *every* backtick
//! in the text is removed, matching the long-standing behaviour of this
//! service. A stricter variant would strip only a bounded leading/trailing
//! fence pair and never touch mid-document characters; switching to it would
//! change output for payloads that contain literal backticks, so the current
//! behaviour is kept.

/// Strip one optional enclosing fenced-block wrapper from `raw`.
///
/// Algorithm: trim surrounding whitespace; if the text begins with three
/// backticks, remove all backtick characters, then drop a leading `json`
/// language tag if present and re-trim. Pure and infallible; idempotent on
/// already-normalized text.
pub fn normalize_response(raw: &str) -> String {
    let mut text = raw.trim();
    let stripped;
    if text.starts_with("```") {
        stripped = text.replace('`', "");
        text = stripped.trim();
        if let Some(rest) = text.strip_prefix("json") {
            text = rest.trim_start();
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_tagged_fence() {
        let raw = "```json\n{\"summary\":\"x\",\"quiz\":[]}\n```";
        assert_eq!(normalize_response(raw), r#"{"summary":"x","quiz":[]}"#);
    }

    #[test]
    fn strips_untagged_fence() {
        let raw = "```\n{\"summary\":\"x\"}\n```";
        assert_eq!(normalize_response(raw), r#"{"summary":"x"}"#);
    }

    #[test]
    fn bare_json_passes_through() {
        let raw = r#"{"summary":"x","quiz":[]}"#;
        assert_eq!(normalize_response(raw), raw);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_response("  {\"a\":1}\n\n"), r#"{"a":1}"#);
    }

    #[test]
    fn idempotent_on_normalized_text() {
        let raw = "```json\n{\"summary\":\"x\",\"quiz\":[]}\n```";
        let once = normalize_response(raw);
        assert_eq!(normalize_response(&once), once);
    }

    #[test]
    fn mid_text_fence_is_left_alone() {
        // Heuristic only fires on a leading fence.
        let raw = "{\"summary\":\"see ``` below\"}";
        assert_eq!(normalize_response(raw), raw);
    }

    #[test]
    fn json_tag_without_fence_is_kept() {
        // "json" is only a language tag when a fence preceded it.
        let raw = "json is nice";
        assert_eq!(normalize_response(raw), raw);
    }
}
