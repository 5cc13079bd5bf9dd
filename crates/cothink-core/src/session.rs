//! The collaborative streaming session state machine
//!
//! One [`StreamSession`] owns the conversation rounds and drives one
//! generation attempt at a time: it opens a prefix-primed completion
//! stream, splits incoming text into reasoning and answer segments,
//! throttles the reasoning segment to human reading speed, and consults
//! the coordination policy and playback flags on every chunk. Cancellation
//! is cooperative: the run flag is observed once per received chunk and
//! once per throttle tick.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};
use tokio::time::{Duration, Instant, sleep};

use crate::config::ConfigHandle;
use crate::error::CoreError;
use crate::llm::{ChatMessage, CompletionRequest, LlmClient};
use crate::playback::PlaybackHandle;
use crate::policy::CoordinationPolicy;
use crate::round::{REASONING_OPEN, Round};
use crate::status::{StatusKind, StatusNote};
use crate::transcript::{self, TranscriptEntry};

/// Fixed sampling configuration; not varied at runtime.
const TEMPERATURE: f32 = 0.6;
const TOP_P: f32 = 0.95;

/// Granularity of the cooperative throttle sleep.
const THROTTLE_SLICE: Duration = Duration::from_millis(5);

/// What a failed attempt left behind.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub message: String,
    pub timed_out: bool,
    pub at: DateTime<Utc>,
}

/// One display-ready update emitted per consumed chunk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub editor_text: String,
    pub status: StatusNote,
    pub transcript: Vec<TranscriptEntry>,
}

/// A conversation of append-only rounds plus the generation state machine.
///
/// Callers serialize access: at most one in-flight `generate` per session,
/// toggles applied between chunk deliveries (see the playback handle).
pub struct StreamSession {
    client: Arc<dyn LlmClient>,
    config: ConfigHandle,
    rounds: Vec<Round>,
    last_error: Option<ErrorRecord>,
}

impl StreamSession {
    pub fn new(client: Arc<dyn LlmClient>, config: ConfigHandle) -> Self {
        let mut session = Self {
            client,
            config,
            rounds: Vec::new(),
            last_error: None,
        };
        session.start_round();
        session
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn last_error(&self) -> Option<&ErrorRecord> {
        self.last_error.as_ref()
    }

    /// The round currently being produced; always present.
    pub fn current_round(&self) -> &Round {
        self.rounds.last().expect("session always has a round")
    }

    fn current_round_mut(&mut self) -> &mut Round {
        self.rounds.last_mut().expect("session always has a round")
    }

    /// Append a fresh round. Valid only once the current round reached a
    /// terminal status, which the single-writer caller enforces.
    pub fn start_round(&mut self) {
        self.rounds.push(Round::new());
    }

    /// Discard the whole conversation and start over.
    pub fn reset(&mut self) {
        self.rounds.clear();
        self.last_error = None;
        self.start_round();
    }

    fn snapshot(&self, status: StatusNote) -> Snapshot {
        let round = self.current_round();
        let show_full = self.config.lock().show_full_output();
        Snapshot {
            editor_text: if show_full {
                round.raw.clone()
            } else {
                round.reasoning.clone()
            },
            status,
            transcript: transcript::flatten(&self.rounds),
        }
    }

    /// Run one generation attempt over one underlying network stream.
    ///
    /// Not restartable: resuming a paused round is a new call seeded with
    /// the current (possibly human-edited) draft. Every exit path ends with
    /// the run flag cleared, the transport stream closed, and exactly one
    /// terminal snapshot; failures never propagate as a fault.
    pub fn generate(
        &mut self,
        user_prompt: String,
        seed_text: String,
        playback: PlaybackHandle,
    ) -> impl Stream<Item = Snapshot> + '_ {
        async_stream::stream! {
            self.current_round_mut().seed(&user_prompt, &seed_text);

            if playback.lock().is_awaiting_remote() {
                yield self.snapshot(StatusNote::kind(StatusKind::AwaitingRemote));
            }

            let request = CompletionRequest::new(vec![
                ChatMessage::user(&user_prompt),
                ChatMessage::assistant_prefix(format!("{REASONING_OPEN}\n{seed_text}")),
            ])
            .with_temperature(TEMPERATURE)
            .with_top_p(TOP_P);

            let mut policy = {
                let config = self.config.lock();
                CoordinationPolicy::new(config.pause_after_paragraphs(), &seed_text)
            };

            tracing::debug!(
                provider = self.client.provider(),
                model = self.client.model(),
                "opening completion stream"
            );
            let mut chunks = self.client.complete_stream(request);

            let mut failure: Option<CoreError> = None;
            let mut paused = false;

            while let Some(item) = chunks.next().await {
                if !playback.lock().is_running() {
                    paused = true;
                    break;
                }

                let chunk = match item {
                    Ok(chunk) => chunk,
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                };
                if chunk.text.is_empty() {
                    continue;
                }

                playback.lock().first_byte_received();

                // The policy watches the draft as of the previous chunk, so
                // the delta that crosses the threshold still lands in the
                // round before the pause takes hold.
                let pause_requested = policy.should_pause_for_human(&self.current_round().raw);

                self.current_round_mut().append_delta(&chunk.text);
                let in_reasoning = !self.current_round().reasoning_closed();
                playback.lock().set_in_reasoning(in_reasoning);

                // Answer-segment text is never auto-paused.
                if pause_requested && in_reasoning {
                    playback.lock().pause();
                }
                if !playback.lock().is_running() {
                    paused = true;
                    break;
                }

                let phase = if in_reasoning {
                    StatusKind::Reasoning
                } else {
                    StatusKind::Answering
                };
                yield self.snapshot(StatusNote::kind(phase));

                // Throttle only the reasoning segment, in small slices so a
                // pause lands mid-interval; the answer streams at transport
                // speed.
                let interval =
                    Duration::from_secs_f64(1.0 / self.config.lock().throughput() as f64);
                let throttle_started = Instant::now();
                while throttle_started.elapsed() < interval {
                    let keep_throttling = {
                        let playback = playback.lock();
                        playback.is_running() && playback.in_reasoning()
                    };
                    if !keep_throttling {
                        break;
                    }
                    sleep(THROTTLE_SLICE).await;
                }
            }

            let completed = failure.is_none() && !paused;

            // Guaranteed-cleanup phase: clear the run flag, close the
            // transport stream, emit exactly one terminal snapshot.
            drop(chunks);
            {
                let mut playback = playback.lock();
                playback.pause();
                if completed {
                    playback.mark_completed();
                }
            }

            match failure {
                Some(err) => {
                    let timed_out = err.is_timeout();
                    let message = err.to_string();
                    tracing::warn!(timed_out, error = %message, "generation attempt failed");

                    self.last_error = Some(ErrorRecord {
                        message: message.clone(),
                        timed_out,
                        at: Utc::now(),
                    });
                    playback.lock().hold_label_once();

                    let status = if timed_out {
                        StatusNote::kind(StatusKind::TimedOut)
                    } else {
                        StatusNote::failed(message.clone())
                    };
                    let mut snapshot = self.snapshot(status);
                    snapshot.transcript.push(TranscriptEntry::error(message));
                    yield snapshot;
                }
                None => {
                    let kind = if completed {
                        StatusKind::Completed
                    } else {
                        StatusKind::Interrupted
                    };
                    tracing::debug!(?kind, "generation attempt finished");
                    yield self.snapshot(StatusNote::kind(kind));
                }
            }
        }
    }
}
