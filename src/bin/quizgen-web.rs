//! Web server binary.
//!
//! A thin shim over the library crate that maps CLI flags to a `QuizConfig`,
//! constructs the Gemini client, and serves the upload form.

use anyhow::{Context, Result};
use clap::Parser;
use pdf_quizgen::web::{start_server, AppState};
use pdf_quizgen::{GeminiClient, QuizConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quizgen-web", version, about = "PDF summary & quiz web server")]
struct Args {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1:8000", env = "QUIZGEN_ADDR")]
    addr: String,

    /// Gemini model identifier.
    #[arg(long, default_value = "gemini-2.5-flash", env = "QUIZGEN_MODEL")]
    model: String,

    /// Per-generation-call timeout in seconds.
    #[arg(long, default_value_t = 300)]
    api_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_quizgen=info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = QuizConfig::builder()
        .model(&args.model)
        .api_timeout_secs(args.api_timeout_secs)
        .build()?;

    // The client is constructed once and shared read-only across requests.
    let client = GeminiClient::from_env(&config)?;
    let state = AppState::new(Arc::new(client));

    start_server(&args.addr, state)
        .await
        .with_context(|| format!("server failed on {}", args.addr))
}
