//! MCP server binary: serves the quiz tools over stdio.
//!
//! Logging goes to stderr so it never corrupts the JSON-RPC stream on
//! stdout.

use anyhow::Result;
use clap::Parser;
use pdf_quizgen::mcp::{LineTransport, QuizServer};
use pdf_quizgen::{GeminiClient, QuizConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quizgen-mcp", version, about = "PDF summary & quiz MCP server")]
struct Args {
    /// Gemini model identifier.
    #[arg(long, default_value = "gemini-2.5-flash", env = "QUIZGEN_MODEL")]
    model: String,

    /// Timeout for fetching a PDF from a URL, in seconds.
    #[arg(long, default_value_t = 60)]
    download_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pdf_quizgen=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = QuizConfig::builder()
        .model(&args.model)
        .download_timeout_secs(args.download_timeout_secs)
        .build()?;

    let client = GeminiClient::from_env(&config)?;
    let server = QuizServer::new(Arc::new(client), config);

    let mut transport = LineTransport::new();
    server.run(&mut transport).await?;
    Ok(())
}
