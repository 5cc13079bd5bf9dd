//! Abstract status kinds surfaced to the presentation layer
//!
//! The core only ever selects a kind; resolving it to display text is the
//! presentation layer's job (see [`crate::locale`]).

/// Displayed session status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Request issued, first byte not yet received
    AwaitingRemote,
    /// Paused while a request was still pending; resuming retries
    AwaitingRetry,
    /// Streaming the reasoning segment
    Reasoning,
    /// Streaming the answer segment
    Answering,
    /// The model signalled natural end of output
    Completed,
    /// Stopped by a human or policy pause
    Interrupted,
    /// The transport timed out mid-attempt
    TimedOut,
    /// Any other backend/transport failure
    Failed,
}

/// A status kind plus optional failure detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNote {
    pub kind: StatusKind,
    pub detail: Option<String>,
}

impl StatusNote {
    pub fn kind(kind: StatusKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Failed,
            detail: Some(detail.into()),
        }
    }
}
