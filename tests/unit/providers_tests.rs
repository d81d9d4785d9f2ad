/*!
 * Tests for the chat-completions client
 *
 * A local TCP listener serves canned HTTP responses so the bounded retry
 * loop can be exercised attempt by attempt without a real endpoint. The
 * retry delay is set to zero to keep the suite fast.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use aisubtrans::app_config::ProviderConfig;
use aisubtrans::errors::ProviderError;
use aisubtrans::providers::chat_completions::ChatCompletionsClient;
use aisubtrans::providers::CompletionClient;

fn provider_config(endpoint: String, max_retries: u32) -> ProviderConfig {
    ProviderConfig {
        endpoint,
        max_retries,
        retry_delay_secs: 0,
        timeout_secs: 5,
        ..ProviderConfig::default()
    }
}

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    )
}

fn success_body(content: &str) -> String {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

/// Read one HTTP request (headers plus content-length body) off the stream
async fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);

            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
}

/// Serve the given responses one connection at a time, counting accepts
async fn serve_responses(responses: Vec<String>) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_task = hits.clone();

    tokio::spawn(async move {
        for response in responses {
            let (mut stream, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(_) => return,
            };
            hits_in_task.fetch_add(1, Ordering::SeqCst);

            read_request(&mut stream).await;
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (endpoint, hits)
}

/// Test that a successful first attempt returns the trimmed completion text
#[tokio::test]
async fn test_complete_withSuccessfulResponse_shouldReturnTrimmedText() {
    let (endpoint, hits) =
        serve_responses(vec![http_response("200 OK", &success_body("  {\"1\": \"uno\"}  "))])
            .await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 3));

    let completion = client.complete("prompt").await.unwrap();

    assert_eq!(completion.text, "{\"1\": \"uno\"}");
    assert!(!completion.maybe_truncated);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

/// Test that persistent server errors exhaust exactly the retry budget
#[tokio::test]
async fn test_complete_withPersistentServerErrors_shouldExhaustRetryBudget() {
    let error = http_response("500 Internal Server Error", "boom");
    let (endpoint, hits) = serve_responses(vec![error.clone(), error.clone(), error]).await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 2));

    let result = client.complete("prompt").await;

    match result {
        Err(ProviderError::ApiError { status_code, .. }) => assert_eq!(status_code, 500),
        other => panic!("Expected API error, got {:?}", other),
    }

    // One initial attempt plus max_retries extra
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

/// Test that a transient server error recovers on the next attempt
#[tokio::test]
async fn test_complete_withTransientServerError_shouldRecoverOnRetry() {
    let (endpoint, hits) = serve_responses(vec![
        http_response("503 Service Unavailable", "busy"),
        http_response("200 OK", &success_body("{\"1\": \"uno\"}")),
    ])
    .await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 3));

    let completion = client.complete("prompt").await.unwrap();

    assert_eq!(completion.text, "{\"1\": \"uno\"}");
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

/// Test that after exhaustion the error is the last one observed
#[tokio::test]
async fn test_complete_withChangingErrors_shouldReturnLastOneObserved() {
    let (endpoint, hits) = serve_responses(vec![
        http_response("500 Internal Server Error", "first"),
        http_response("404 Not Found", "second"),
    ])
    .await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 1));

    match client.complete("prompt").await {
        Err(ProviderError::ApiError { status_code, message }) => {
            assert_eq!(status_code, 404);
            assert_eq!(message, "second");
        },
        other => panic!("Expected API error, got {:?}", other),
    }

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

/// Test that a 200 with no choices is retried, then terminal
#[tokio::test]
async fn test_complete_withEmptyChoices_shouldRetryThenFail() {
    let empty = http_response("200 OK", "{\"choices\": []}");
    let (endpoint, hits) = serve_responses(vec![empty.clone(), empty]).await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 1));

    let result = client.complete("prompt").await;

    assert!(matches!(result, Err(ProviderError::EmptyResponse)));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

/// Test that an undecodable success body is retried, then terminal
#[tokio::test]
async fn test_complete_withUndecodableBody_shouldRetryThenFail() {
    let bad = http_response("200 OK", "not json");
    let (endpoint, hits) = serve_responses(vec![bad.clone(), bad]).await;
    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 1));

    let result = client.complete("prompt").await;

    assert!(matches!(result, Err(ProviderError::ParseError(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

/// Test that an unreachable endpoint surfaces as a connection error
#[tokio::test]
async fn test_complete_withUnreachableEndpoint_shouldReturnConnectionError() {
    // Bind then drop so the port is free and the connection refused
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = ChatCompletionsClient::from_config(&provider_config(endpoint, 1));

    let result = client.complete("prompt").await;
    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}
