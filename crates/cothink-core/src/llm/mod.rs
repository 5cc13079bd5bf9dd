//! LLM module - streaming chat-completion client abstraction

mod client;
mod mock;
mod openai;

pub use client::{
    ChatMessage, CompletionRequest, FinishReason, LlmClient, Role, StreamChunk, StreamResult,
};
pub use mock::{MockLlmClient, MockStep, MockStepKind};
pub use openai::OpenAIClient;
