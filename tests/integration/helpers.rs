//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use mcp_bauplan::config::PlatformConfig;
use mcp_bauplan::platform::PlatformConnector;
use mcp_bauplan::query::QueryExecutor;
use rmcp::model::{CallToolResult, RawContent};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

/// Extract the text content from a CallToolResult.
pub fn get_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        _ => panic!("Expected text content"),
    }
}

/// Parse the envelope carried by a tool result.
pub fn get_envelope(result: &CallToolResult) -> serde_json::Value {
    serde_json::from_str(&get_text(result)).expect("tool result is JSON")
}

/// Check if the result is a success.
pub fn is_success(result: &CallToolResult) -> bool {
    result.is_error == Some(false)
}

/// Check if the result is an error.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Create an executor over the given connector with default settings.
pub fn executor(connector: impl PlatformConnector + 'static) -> QueryExecutor {
    executor_with(connector, PlatformConfig::new("test-key"))
}

/// Create an executor over the given connector and config.
pub fn executor_with(
    connector: impl PlatformConnector + 'static,
    config: PlatformConfig,
) -> QueryExecutor {
    QueryExecutor::new(Arc::new(connector), Arc::new(config))
}

/// Start a one-shot fake query gateway on localhost.
///
/// Answers the first request with `status` and `body`, then returns the raw
/// request text through the join handle.
pub async fn spawn_gateway(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake gateway");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept");
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Failed to write response");
        let _ = socket.shutdown().await;
        request
    });

    let url = Url::parse(&format!("http://{}", addr)).expect("valid gateway url");
    (url, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.expect("Failed to read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
