//! PDF byte fetching: dereference a caller-supplied URL to a byte buffer.
//!
//! Uploaded PDFs arrive from the web front end as completed buffers and
//! never pass through here; this stage exists for the URL-driven MCP tools.
//! The bytes go straight to the generation service, so there is no temp
//! file and no content inspection — the model is the PDF parser.

use crate::error::QuizGenError;
use std::time::Duration;
use tracing::{debug, info};

/// Fetch PDF bytes from an HTTP(S) URL.
///
/// Leading/trailing whitespace in `url` is trimmed first (tool callers paste
/// URLs with stray newlines surprisingly often). A non-success status, a
/// connection failure, or a body read failure all map to
/// [`QuizGenError::DownloadFailed`] carrying the offending URL; exceeding
/// `timeout_secs` maps to [`QuizGenError::DownloadTimeout`].
pub async fn fetch_pdf(url: &str, timeout_secs: u64) -> Result<Vec<u8>, QuizGenError> {
    let url = url.trim();
    info!("Downloading PDF from: {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| QuizGenError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            QuizGenError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            QuizGenError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(QuizGenError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| QuizGenError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    debug!("Downloaded {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connection_failure_names_the_url() {
        // Port 1 is essentially never listening; the connect fails locally
        // without needing outbound network access.
        let err = fetch_pdf("http://127.0.0.1:1/doc.pdf", 5).await.unwrap_err();
        match err {
            QuizGenError::DownloadFailed { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:1/doc.pdf");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_download_failed() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\n\r\n")
                    .await;
            }
        });

        let url = format!("http://{addr}/missing.pdf");
        let err = fetch_pdf(&url, 5).await.unwrap_err();
        match err {
            QuizGenError::DownloadFailed { url: u, reason } => {
                assert_eq!(u, url);
                assert!(reason.contains("404"), "reason should carry status: {reason}");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[tokio::test]
    async fn url_whitespace_is_trimmed() {
        let err = fetch_pdf("  http://127.0.0.1:1/doc.pdf\n", 5)
            .await
            .unwrap_err();
        match err {
            QuizGenError::DownloadFailed { url, .. } => {
                assert_eq!(url, "http://127.0.0.1:1/doc.pdf");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }
}
