//! # pdf-quizgen
//!
//! Summarise a PDF and generate a multiple-choice quiz from it using Gemini.
//!
//! ## Why this crate?
//!
//! Large generative models read PDFs natively, but they answer in free text:
//! sometimes clean JSON, sometimes JSON wrapped in markdown fences, sometimes
//! something that only resembles the shape you asked for. The value of this
//! crate is the **structured-extraction pipeline** around the model call —
//! prompting for an exact JSON shape, defensively unwrapping the output,
//! parsing it, and validating it against a strict schema with a classified
//! error at every failure point. Everything else (the HTML upload form, the
//! MCP tool server, URL fetching) is thin plumbing around that core.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF bytes + question count
//!  │
//!  ├─ 1. Prompt     render the JSON-shape instruction for N questions
//!  ├─ 2. Generate   Gemini generateContent with the PDF inlined (network)
//!  ├─ 3. Normalize  strip the ```json fence models add despite the prompt
//!  ├─ 4. Parse      serde_json — MalformedResponse on failure
//!  └─ 5. Validate   typed SummaryWithQuiz — SchemaViolation on mismatch
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_quizgen::{summarize_and_quiz, GeminiClient, QuizConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = QuizConfig::default();
//!     let client = GeminiClient::from_env(&config)?; // reads GEMINI_API_KEY
//!     let pdf = std::fs::read("lecture.pdf")?;
//!     let result = summarize_and_quiz(&client, &pdf, 5).await?;
//!     println!("{}", result.summary);
//!     for item in &result.quiz {
//!         println!("Q: {} (answer: {})", item.question, item.correct_index);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `web`   | on      | `quizgen-web` binary: axum HTML upload form |
//! | `mcp`   | on      | `quizgen-mcp` binary: MCP tool server over stdio |
//!
//! Disable both when using only the library:
//! ```toml
//! pdf-quizgen = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod summarize;

#[cfg(feature = "mcp")]
pub mod mcp;
#[cfg(feature = "web")]
pub mod web;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{QuizConfig, QuizConfigBuilder, DEFAULT_NUM_QUESTIONS};
pub use error::QuizGenError;
pub use pipeline::fetch::fetch_pdf;
pub use pipeline::gemini::{GeminiClient, GenerationService};
pub use schema::{QuizItem, SummaryResult, SummaryWithQuiz};
pub use summarize::{summarize, summarize_and_quiz};
