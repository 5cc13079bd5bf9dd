//! OpenAI-compatible LLM provider

use std::time::Duration;

use futures::StreamExt;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::error::CoreError;
use crate::http_client::build_http_client;
use crate::llm::client::{CompletionRequest, FinishReason, LlmClient, StreamChunk, StreamResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for any OpenAI-compatible chat-completions endpoint
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAIClient {
    /// Create a new client with the default read timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: build_http_client(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            model: "deepseek-reasoner".to_string(),
            base_url: "https://api.deepseek.com/v1".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set custom base URL (for API-compatible services)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the transport read timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_http_client(timeout);
        self
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// Streaming types

#[derive(Deserialize, Debug)]
struct StreamResponse {
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize, Debug)]
struct StreamChoice {
    delta: StreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StreamDelta {
    content: Option<String>,
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        _ => FinishReason::Error,
    }
}

fn transport_error(e: reqwest::Error) -> CoreError {
    if e.is_timeout() {
        CoreError::Timeout
    } else {
        CoreError::Http(e)
    }
}

async fn response_to_error(response: Response, provider: &str) -> CoreError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    // Truncate error body to prevent leaking large or sensitive responses.
    const MAX_ERROR_BODY: usize = 512;
    let message = if body.len() > MAX_ERROR_BODY {
        format!("{}... [truncated]", &body[..MAX_ERROR_BODY])
    } else {
        body
    };

    CoreError::LlmHttp {
        provider: provider.to_string(),
        status,
        message,
    }
}

impl LlmClient for OpenAIClient {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn complete_stream(&self, request: CompletionRequest) -> StreamResult {
        let client = self.client.clone();
        let api_key = self.api_key.clone();
        let base_url = self.base_url.clone();
        let model = self.model.clone();

        Box::pin(async_stream::stream! {
            let body = serde_json::json!({
                "model": model,
                "messages": request.messages,
                "temperature": request.temperature,
                "top_p": request.top_p,
                "stream": true,
            });

            let response = match client
                .post(format!("{}/chat/completions", base_url))
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    yield Err(transport_error(e));
                    return;
                }
            };

            if !response.status().is_success() {
                yield Err(response_to_error(response, "openai").await);
                return;
            }

            let mut byte_stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let bytes = match chunk_result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(transport_error(e));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));

                // Process complete SSE events from buffer
                while let Some(pos) = buffer.find("\n\n") {
                    let event = buffer[..pos].to_string();
                    buffer = buffer[pos + 2..].to_string();

                    for line in event.lines() {
                        let Some(data) = line.strip_prefix("data: ") else {
                            continue;
                        };
                        if data.trim() == "[DONE]" {
                            continue;
                        }

                        let parsed: StreamResponse = match serde_json::from_str(data) {
                            Ok(parsed) => parsed,
                            Err(err) => {
                                tracing::warn!(error = %err, "skipping unparseable SSE event");
                                continue;
                            }
                        };

                        for choice in parsed.choices {
                            if let Some(reason) = choice.finish_reason {
                                yield Ok(StreamChunk::final_chunk(map_finish_reason(&reason)));
                                continue;
                            }

                            if let Some(content) = choice.delta.content
                                && !content.is_empty()
                            {
                                yield Ok(StreamChunk::text(content));
                            }
                        }
                    }
                }
            }
        })
    }
}
