//! HTTP form front end.
//!
//! Three routes, all thin: a static upload form, the upload handler that
//! runs the pipeline and renders the result as HTML, and a health check.
//! The handlers hold no logic of their own — they translate a multipart
//! upload into `(pdf_bytes, num_questions)`, call
//! [`crate::summarize_and_quiz`], and render whichever side of the `Result`
//! comes back. The generation service is injected as `Arc<dyn
//! GenerationService>` so tests can drive the full HTTP surface against a
//! stub.

use crate::config::DEFAULT_NUM_QUESTIONS;
use crate::pipeline::gemini::GenerationService;
use crate::schema::SummaryWithQuiz;
use crate::summarize::summarize_and_quiz;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Uploads above this size are rejected before reaching the handler.
/// Gemini itself caps inline documents around 20 MB, so there is no point
/// accepting more.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared state: the long-lived, read-only generation client handle.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn GenerationService>,
}

impl AppState {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }
}

/// Build the router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(upload_form))
        .route("/summarize-quiz", post(summarize_quiz))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server on `addr`.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), std::io::Error> {
    info!("Starting quizgen web server on {}", addr);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// PDF upload form.
async fn upload_form() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>PDF Summary &amp; Quiz Generator</title>
  </head>
  <body>
    <h1>PDF Summary &amp; Quiz Generator</h1>
    <form action="/summarize-quiz" method="post" enctype="multipart/form-data">
      <p>
        PDF file:
        <input type="file" name="pdf" accept="application/pdf" required />
      </p>
      <p>
        Number of questions:
        <input type="number" name="num_questions" value="5" min="1" max="20" />
      </p>
      <button type="submit">Summarize &amp; generate quiz</button>
    </form>
  </body>
</html>"#,
    )
}

/// Upload handler: read the multipart fields, run the pipeline, render HTML.
async fn summarize_quiz(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let mut pdf_bytes: Option<Vec<u8>> = None;
    let mut num_questions = DEFAULT_NUM_QUESTIONS;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            error_page(&format!("Invalid multipart upload: {e}")),
        )
    })? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("pdf") => {
                let bytes = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        error_page(&format!("Failed to read uploaded PDF: {e}")),
                    )
                })?;
                pdf_bytes = Some(bytes.to_vec());
            }
            Some("num_questions") => {
                if let Ok(text) = field.text().await {
                    if let Ok(n) = text.trim().parse::<u32>() {
                        num_questions = n;
                    }
                }
            }
            _ => {}
        }
    }

    let pdf_bytes = pdf_bytes.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            error_page("No PDF file was uploaded."),
        )
    })?;

    info!(
        pdf_len = pdf_bytes.len(),
        num_questions, "Handling summarize-quiz upload"
    );

    match summarize_and_quiz(state.service.as_ref(), &pdf_bytes, num_questions).await {
        Ok(result) => Ok(render_result(&result)),
        Err(e) => {
            error!("Pipeline failed: {e}");
            Err((StatusCode::INTERNAL_SERVER_ERROR, error_page(&e.to_string())))
        }
    }
}

// ── HTML rendering ───────────────────────────────────────────────────────

/// Minimal HTML escaping for model-produced text.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_result(result: &SummaryWithQuiz) -> Html<String> {
    let mut parts = vec![
        "<html>".to_string(),
        "<head><meta charset='utf-8' /><title>Summary &amp; Quiz</title></head>".to_string(),
        "<body>".to_string(),
        "<h1>Summary</h1>".to_string(),
        format!(
            "<pre style='white-space: pre-wrap;'>{}</pre>",
            escape_html(&result.summary)
        ),
        "<hr>".to_string(),
        "<h1>Quiz</h1>".to_string(),
    ];

    for (i, item) in result.quiz.iter().enumerate() {
        parts.push(format!("<h2>Question {}</h2>", i + 1));
        parts.push(format!("<p>{}</p>", escape_html(&item.question)));
        parts.push("<ol type='A'>".to_string());
        for (idx, choice) in item.choices.iter().enumerate() {
            // The correct answer is marked inline; a student-facing page
            // would hide this.
            let mark = if idx == item.correct_index {
                " ✅ (correct)"
            } else {
                ""
            };
            parts.push(format!("<li>{}{}</li>", escape_html(choice), mark));
        }
        parts.push("</ol>".to_string());
        if let Some(ref explanation) = item.explanation {
            parts.push(format!(
                "<p><b>Explanation:</b> {}</p>",
                escape_html(explanation)
            ));
        }
        parts.push("<hr>".to_string());
    }

    parts.push("<p><a href='/'>Try another PDF</a></p>".to_string());
    parts.push("</body></html>".to_string());

    Html(parts.join(""))
}

fn error_page(message: &str) -> Html<String> {
    Html(format!(
        "<html>\
         <head><meta charset='utf-8' /><title>Error</title></head>\
         <body><h1>Something went wrong</h1>\
         <pre>{}</pre>\
         <p><a href='/'>Back</a></p>\
         </body></html>",
        escape_html(message)
    ))
}
