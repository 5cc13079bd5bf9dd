//! CoThink core - collaborative chain-of-thought streaming engine
//!
//! This crate provides:
//! - A streaming session that splits model output into a human-editable
//!   reasoning draft and a final answer
//! - Run/pause playback control with cooperative, chunk-granular cancellation
//! - Paragraph-count coordination policy for handing control back to the human
//! - An OpenAI-compatible streaming client with prefix continuation
//! - Transcript flattening and locale-keyed display vocabulary

pub mod config;
pub mod error;
mod http_client;
pub mod llm;
pub mod locale;
pub mod playback;
pub mod policy;
pub mod round;
pub mod session;
pub mod status;
pub mod transcript;

// Re-export commonly used types
pub use config::{ConfigHandle, SessionConfig};
pub use error::{CoreError, Result};
pub use llm::{
    ChatMessage, CompletionRequest, FinishReason, LlmClient, MockLlmClient, MockStep,
    OpenAIClient, Role, StreamChunk, StreamResult,
};
pub use locale::Locale;
pub use playback::{
    ControlAction, LabelUpdate, PlaybackController, PlaybackHandle, ResetOutcome, UiState,
};
pub use policy::CoordinationPolicy;
pub use round::{REASONING_CLOSE, REASONING_OPEN, Round};
pub use session::{ErrorRecord, Snapshot, StreamSession};
pub use status::{StatusKind, StatusNote};
pub use transcript::{EntryKind, TranscriptEntry};
