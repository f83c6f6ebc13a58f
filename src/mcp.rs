//! MCP tool server front end.
//!
//! Speaks newline-delimited JSON-RPC over stdio: `initialize`,
//! `tools/list`, and `tools/call`. Two tools are exposed, both URL-driven:
//!
//! * `summarize_pdf_from_url` — fetch a PDF and return a free-form summary
//! * `summarize_and_quiz_pdf_from_url` — fetch a PDF and return a summary
//!   plus a multiple-choice quiz
//!
//! Like the web front end, all logic lives in [`crate::summarize`]; this
//! module only translates JSON-RPC requests into pipeline calls and results
//! (or classified errors) back into JSON-RPC responses.

use crate::config::{QuizConfig, DEFAULT_NUM_QUESTIONS};
use crate::pipeline::fetch::fetch_pdf;
use crate::pipeline::gemini::GenerationService;
use crate::summarize::{summarize, summarize_and_quiz};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub jsonrpc: String,
    #[serde(flatten)]
    pub body: MessageBody,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageBody {
    Request {
        id: Value,
        method: String,
        #[serde(default)]
        params: Value,
    },
    Response {
        id: Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<Value>,
    },
}

#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    description: &'static str,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct SummarizeArgs {
    pdf_url: String,
    #[serde(default)]
    prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuizArgs {
    pdf_url: String,
    #[serde(default = "default_num_questions")]
    num_questions: u32,
}

fn default_num_questions() -> u32 {
    DEFAULT_NUM_QUESTIONS
}

// ── Transport ────────────────────────────────────────────────────────────

/// Newline-delimited JSON message transport over stdio.
pub struct LineTransport {
    stdin: BufReader<tokio::io::Stdin>,
    stdout: tokio::io::Stdout,
}

impl LineTransport {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
            stdout: tokio::io::stdout(),
        }
    }

    /// Read the next message; `None` on EOF. Blank lines are skipped,
    /// unparseable lines are reported as errors.
    pub async fn read_message(&mut self) -> std::io::Result<Option<Message>> {
        loop {
            let mut line = String::new();
            match self.stdin.read_line(&mut line).await? {
                0 => return Ok(None),
                _ => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match serde_json::from_str(trimmed) {
                        Ok(message) => return Ok(Some(message)),
                        Err(e) => {
                            error!("Failed to parse JSON-RPC message: {e}");
                            continue;
                        }
                    }
                }
            }
        }
    }

    pub async fn write_response(&mut self, response: &Message) -> std::io::Result<()> {
        let json_str = serde_json::to_string(response)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        self.stdout.write_all(json_str.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await
    }
}

impl Default for LineTransport {
    fn default() -> Self {
        Self::new()
    }
}

// ── Server ───────────────────────────────────────────────────────────────

/// MCP server over a shared generation service.
pub struct QuizServer {
    service: Arc<dyn GenerationService>,
    config: QuizConfig,
}

impl QuizServer {
    pub fn new(service: Arc<dyn GenerationService>, config: QuizConfig) -> Self {
        Self { service, config }
    }

    /// Serve requests from stdio until EOF.
    pub async fn run(&self, transport: &mut LineTransport) -> std::io::Result<()> {
        info!("MCP quiz server ready");
        while let Some(message) = transport.read_message().await? {
            if let MessageBody::Request { id, method, params } = message.body {
                debug!(%method, "Handling request");
                let response = self.handle_request(id, &method, params).await;
                transport.write_response(&response).await?;
            }
        }
        Ok(())
    }

    fn tools() -> Vec<Tool> {
        vec![
            Tool {
                name: "summarize_pdf_from_url",
                description: "Fetch a PDF from an http(s) URL and summarize it with Gemini.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "pdf_url": {
                            "type": "string",
                            "description": "Direct http(s) URL of the PDF"
                        },
                        "prompt": {
                            "type": "string",
                            "description": "Optional instruction controlling the summary style"
                        }
                    },
                    "required": ["pdf_url"]
                }),
            },
            Tool {
                name: "summarize_and_quiz_pdf_from_url",
                description: "Fetch a PDF from an http(s) URL, summarize it, and generate a \
                              multiple-choice quiz as structured JSON.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "pdf_url": {
                            "type": "string",
                            "description": "Direct http(s) URL of the PDF"
                        },
                        "num_questions": {
                            "type": "integer",
                            "description": "Number of quiz questions to request (default 5)",
                            "minimum": 1,
                            "maximum": 20
                        }
                    },
                    "required": ["pdf_url"]
                }),
            },
        ]
    }

    pub async fn handle_request(&self, id: Value, method: &str, params: Value) -> Message {
        match method {
            "initialize" => respond(
                id,
                json!({
                    "protocolVersion": "2025-06-18",
                    "capabilities": { "tools": {} },
                    "serverInfo": {
                        "name": "pdf-quizgen",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                }),
            ),
            "tools/list" => respond(id, json!({ "tools": Self::tools() })),
            "tools/call" => {
                let Some(name) = params.get("name").and_then(|n| n.as_str()) else {
                    return respond_error(id, -32602, "Missing tool name".into());
                };
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

                match self.handle_tool_call(name, arguments).await {
                    Ok(result) => respond(
                        id,
                        json!({
                            "content": [{
                                "type": "text",
                                "text": serde_json::to_string_pretty(&result)
                                    .unwrap_or_else(|_| "{}".to_string())
                            }]
                        }),
                    ),
                    Err(ToolError::InvalidParams(msg)) => respond_error(id, -32602, msg),
                    Err(ToolError::Execution(msg)) => respond_error(id, -32603, msg),
                }
            }
            _ => respond_error(id, -32601, format!("Method not found: {method}")),
        }
    }

    async fn handle_tool_call(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        match name {
            "summarize_pdf_from_url" => {
                let args: SummarizeArgs = serde_json::from_value(arguments)
                    .map_err(|e| ToolError::InvalidParams(e.to_string()))?;
                let pdf_bytes = fetch_pdf(&args.pdf_url, self.config.download_timeout_secs)
                    .await
                    .map_err(|e| ToolError::Execution(e.to_string()))?;
                let result = summarize(self.service.as_ref(), &pdf_bytes, args.prompt.as_deref())
                    .await
                    .map_err(|e| ToolError::Execution(e.to_string()))?;
                serde_json::to_value(result).map_err(|e| ToolError::Execution(e.to_string()))
            }
            "summarize_and_quiz_pdf_from_url" => {
                let args: QuizArgs = serde_json::from_value(arguments)
                    .map_err(|e| ToolError::InvalidParams(e.to_string()))?;
                let pdf_bytes = fetch_pdf(&args.pdf_url, self.config.download_timeout_secs)
                    .await
                    .map_err(|e| ToolError::Execution(e.to_string()))?;
                let result =
                    summarize_and_quiz(self.service.as_ref(), &pdf_bytes, args.num_questions)
                        .await
                        .map_err(|e| ToolError::Execution(e.to_string()))?;
                serde_json::to_value(result).map_err(|e| ToolError::Execution(e.to_string()))
            }
            other => Err(ToolError::InvalidParams(format!("Unknown tool: {other}"))),
        }
    }
}

enum ToolError {
    InvalidParams(String),
    Execution(String),
}

fn respond(id: Value, result: Value) -> Message {
    Message {
        jsonrpc: "2.0".to_string(),
        body: MessageBody::Response {
            id,
            result: Some(result),
            error: None,
        },
    }
}

fn respond_error(id: Value, code: i64, message: String) -> Message {
    Message {
        jsonrpc: "2.0".to_string(),
        body: MessageBody::Response {
            id,
            result: None,
            error: Some(json!({ "code": code, "message": message })),
        },
    }
}
