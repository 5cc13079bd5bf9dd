//! Deterministic mock LLM client for session and reliability tests.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{Duration, sleep};

use crate::error::CoreError;

use super::{CompletionRequest, FinishReason, LlmClient, StreamChunk, StreamResult};

/// Deterministic step for scripted mock streams.
#[derive(Debug, Clone)]
pub enum MockStepKind {
    /// Yield a content delta.
    Chunk(String),
    /// Yield an LLM error and end the stream.
    Error(String),
    /// Yield a timeout error and end the stream.
    Timeout,
}

/// Scripted stream step with optional delay.
#[derive(Debug, Clone)]
pub struct MockStep {
    pub delay_ms: u64,
    pub kind: MockStepKind,
}

impl MockStep {
    pub fn chunk(content: impl Into<String>) -> Self {
        Self {
            delay_ms: 0,
            kind: MockStepKind::Chunk(content.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            delay_ms: 0,
            kind: MockStepKind::Error(message.into()),
        }
    }

    pub fn timeout() -> Self {
        Self {
            delay_ms: 0,
            kind: MockStepKind::Timeout,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// A deterministic mock LLM client driven by scripted steps.
///
/// Records every issued request so tests can assert on the primed
/// continuation content.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    model: String,
    script: Arc<Mutex<VecDeque<MockStep>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_steps(model: impl Into<String>, steps: Vec<MockStep>) -> Self {
        Self {
            model: model.into(),
            script: Arc::new(Mutex::new(VecDeque::from(steps))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_step(&self, step: MockStep) {
        self.script.lock().push_back(step);
    }

    /// Drop any steps a paused attempt left unconsumed.
    pub fn clear_script(&self) {
        self.script.lock().clear();
    }

    /// Requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn complete_stream(&self, request: CompletionRequest) -> StreamResult {
        let script = Arc::clone(&self.script);
        let requests = Arc::clone(&self.requests);

        Box::pin(async_stream::stream! {
            requests.lock().push(request);

            loop {
                let step = script.lock().pop_front();
                let Some(step) = step else {
                    break;
                };

                if step.delay_ms > 0 {
                    sleep(Duration::from_millis(step.delay_ms)).await;
                }

                match step.kind {
                    MockStepKind::Chunk(content) => yield Ok(StreamChunk::text(content)),
                    MockStepKind::Error(message) => {
                        yield Err(CoreError::Llm(message));
                        return;
                    }
                    MockStepKind::Timeout => {
                        yield Err(CoreError::Timeout);
                        return;
                    }
                }
            }

            yield Ok(StreamChunk::final_chunk(FinishReason::Stop));
        })
    }
}
