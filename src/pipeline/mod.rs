//! Pipeline stages for structured extraction from the model.
//!
//! Each submodule implements exactly one step, so every step is
//! independently testable and the generation boundary can be faked in tests
//! without touching the defensive logic around it.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ gemini ──▶ normalize ──▶ extract
//! (URL→bytes) (PDF+prompt→text) (strip fences) (JSON→typed result)
//! ```
//!
//! 1. [`fetch`]     — resolve a caller-supplied URL to PDF bytes (uploads
//!    arrive as completed byte buffers and skip this stage)
//! 2. [`gemini`]    — invoke the generation service; the only stage with
//!    network I/O once the bytes are in hand
//! 3. [`normalize`] — best-effort removal of the fenced-block wrapper models
//!    sometimes add despite the prompt
//! 4. [`extract`]   — parse as JSON and validate against the schema, with a
//!    classified error at each failure point

pub mod extract;
pub mod fetch;
pub mod gemini;
pub mod normalize;
