//! HTTP-level tests of the OpenAI-compatible streaming client

use std::time::Duration;

use futures::StreamExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cothink_core::{
    ChatMessage, CompletionRequest, CoreError, FinishReason, LlmClient, OpenAIClient,
};

fn disable_system_proxy_for_tests() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        // Safety: set once for the process before any HTTP clients are built.
        unsafe {
            std::env::set_var("COTHINK_DISABLE_SYSTEM_PROXY", "1");
        }
    });
}

fn reasoning_request() -> CompletionRequest {
    CompletionRequest::new(vec![
        ChatMessage::user("prove it"),
        ChatMessage::assistant_prefix("<think>\nseed text"),
    ])
    .with_temperature(0.6)
    .with_top_p(0.95)
}

#[tokio::test]
async fn streams_content_deltas_until_done() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    let sse = concat!(
        "data: {\"choices\":[{\"delta\":{\"content\":\"<think>\\nfirst\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" second\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sse, "text/event-stream"))
        .mount(&server)
        .await;

    let client = OpenAIClient::new("test-key")
        .with_base_url(server.uri())
        .with_model("test-model");

    let chunks: Vec<_> = client.complete_stream(reasoning_request()).collect().await;

    let text: String = chunks
        .iter()
        .filter_map(|c| c.as_ref().ok())
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(text, "<think>\nfirst second");
    assert_eq!(
        chunks.last().unwrap().as_ref().unwrap().finish_reason,
        Some(FinishReason::Stop)
    );
}

#[tokio::test]
async fn request_carries_the_primed_continuation_and_sampling() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("data: [DONE]\n\n", "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = OpenAIClient::new("test-key")
        .with_base_url(server.uri())
        .with_model("test-model");

    let _ = client
        .complete_stream(reasoning_request())
        .collect::<Vec<_>>()
        .await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["stream"], true);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][1]["role"], "assistant");
    assert_eq!(body["messages"][1]["content"], "<think>\nseed text");
    assert_eq!(body["messages"][1]["prefix"], true);
    assert!((body["temperature"].as_f64().unwrap() - 0.6).abs() < 1e-6);
    assert!((body["top_p"].as_f64().unwrap() - 0.95).abs() < 1e-6);
}

#[tokio::test]
async fn stalled_response_is_classified_as_timeout() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("data: [DONE]\n\n", "text/event-stream")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = OpenAIClient::new("test-key")
        .with_base_url(server.uri())
        .with_model("test-model")
        .with_timeout(Duration::from_millis(100));

    let chunks: Vec<_> = client.complete_stream(reasoning_request()).collect().await;

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].as_ref().is_err_and(|e| e.is_timeout()));
}

#[tokio::test]
async fn http_error_carries_status_and_body() {
    disable_system_proxy_for_tests();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = OpenAIClient::new("test-key")
        .with_base_url(server.uri())
        .with_model("test-model");

    let chunks: Vec<_> = client.complete_stream(reasoning_request()).collect().await;

    assert_eq!(chunks.len(), 1);
    match chunks[0].as_ref() {
        Err(CoreError::LlmHttp {
            status, message, ..
        }) => {
            assert_eq!(*status, 500);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("expected LlmHttp error, got {other:?}"),
    }
}
