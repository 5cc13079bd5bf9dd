//! Playback control - run/pause flags and status rendering

use std::sync::Arc;

use parking_lot::Mutex;

use crate::status::StatusKind;

/// Caption the toggle control should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Generate,
    Pause,
}

/// Editor-label directive returned by [`PlaybackController::ui_state`].
///
/// `Keep` is the explicit "leave the current label alone" sentinel, armed
/// once after an errored attempt so the terminal error label survives the
/// post-attempt refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelUpdate {
    Set(StatusKind),
    Keep,
}

/// Rendered control-surface state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub control: ControlAction,
    pub editor_label: LabelUpdate,
    pub prompt_editable: bool,
}

/// Result of resetting the workspace for a brand-new conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    pub ui: UiState,
    pub editor_text: String,
    pub prompt_text: String,
}

/// Transient per-session control flags; not part of the transcript.
#[derive(Debug)]
pub struct PlaybackController {
    running: bool,
    completed: bool,
    awaiting_remote: bool,
    in_reasoning: bool,
    hold_label: bool,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackController {
    pub fn new() -> Self {
        Self {
            running: false,
            completed: false,
            awaiting_remote: false,
            in_reasoning: true,
            hold_label: false,
        }
    }

    pub fn into_shared(self) -> PlaybackHandle {
        Arc::new(Mutex::new(self))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_awaiting_remote(&self) -> bool {
        self.awaiting_remote
    }

    pub fn in_reasoning(&self) -> bool {
        self.in_reasoning
    }

    pub fn set_in_reasoning(&mut self, in_reasoning: bool) {
        self.in_reasoning = in_reasoning;
    }

    /// Clear the run flag; the generation loop observes this at its next
    /// suspension point.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// First content delta arrived; the awaiting-remote overlay goes away.
    pub fn first_byte_received(&mut self) {
        self.awaiting_remote = false;
    }

    /// The model signalled natural end of output.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Flip the run flag. A pause-to-run transition also arms the
    /// awaiting-remote overlay and clears the completed flag.
    pub fn toggle(&mut self) -> UiState {
        let was_running = self.running;
        self.running = !self.running;
        if !was_running && self.running {
            self.awaiting_remote = true;
            self.completed = false;
        }
        self.ui_state()
    }

    /// Arm the one-shot `LabelUpdate::Keep` for the next `ui_state` call.
    pub fn hold_label_once(&mut self) {
        self.hold_label = true;
    }

    /// Render the current flags into control-surface state.
    pub fn ui_state(&mut self) -> UiState {
        let editor_label = if self.hold_label {
            self.hold_label = false;
            LabelUpdate::Keep
        } else {
            LabelUpdate::Set(self.status_kind())
        };

        UiState {
            control: if self.running {
                ControlAction::Pause
            } else {
                ControlAction::Generate
            },
            editor_label,
            prompt_editable: !self.running,
        }
    }

    /// Pure mapping of the flags onto a displayed status.
    pub fn status_kind(&self) -> StatusKind {
        if self.running {
            if self.awaiting_remote {
                StatusKind::AwaitingRemote
            } else if self.in_reasoning {
                StatusKind::Reasoning
            } else {
                StatusKind::Answering
            }
        } else if self.awaiting_remote {
            StatusKind::AwaitingRetry
        } else if self.completed {
            StatusKind::Completed
        } else {
            StatusKind::Interrupted
        }
    }

    /// Restore initial flags for a brand-new conversation.
    pub fn reset(&mut self) -> ResetOutcome {
        *self = Self::new();
        ResetOutcome {
            ui: self.ui_state(),
            editor_text: String::new(),
            prompt_text: String::new(),
        }
    }
}

/// Shared handle; the mutex only serializes the caller's toggles against the
/// generation loop's per-chunk reads. One attempt per session at a time.
pub type PlaybackHandle = Arc<Mutex<PlaybackController>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_from_paused_arms_awaiting_remote() {
        let mut playback = PlaybackController::new();

        let ui = playback.toggle();
        assert!(playback.is_running());
        assert!(playback.is_awaiting_remote());
        assert!(!playback.is_completed());
        assert_eq!(ui.control, ControlAction::Pause);
        assert!(!ui.prompt_editable);

        playback.mark_completed();
        let ui = playback.toggle();
        assert!(!playback.is_running());
        assert!(playback.is_completed());
        assert_eq!(ui.control, ControlAction::Generate);
        assert!(ui.prompt_editable);
    }

    #[test]
    fn status_kind_distinguishes_terminal_states() {
        let mut playback = PlaybackController::new();
        assert_eq!(playback.status_kind(), StatusKind::Interrupted);

        playback.mark_completed();
        assert_eq!(playback.status_kind(), StatusKind::Completed);

        playback.toggle();
        assert_eq!(playback.status_kind(), StatusKind::AwaitingRemote);

        playback.first_byte_received();
        assert_eq!(playback.status_kind(), StatusKind::Reasoning);

        playback.set_in_reasoning(false);
        assert_eq!(playback.status_kind(), StatusKind::Answering);
    }

    #[test]
    fn pausing_while_awaiting_remote_shows_retry() {
        let mut playback = PlaybackController::new();
        playback.toggle();
        playback.pause();

        assert_eq!(playback.status_kind(), StatusKind::AwaitingRetry);
    }

    #[test]
    fn hold_label_suppresses_exactly_one_update() {
        let mut playback = PlaybackController::new();
        playback.hold_label_once();

        assert_eq!(playback.ui_state().editor_label, LabelUpdate::Keep);
        assert!(matches!(
            playback.ui_state().editor_label,
            LabelUpdate::Set(_)
        ));
    }

    #[test]
    fn reset_restores_initial_flags() {
        let mut playback = PlaybackController::new();
        playback.toggle();
        playback.first_byte_received();
        playback.set_in_reasoning(false);
        playback.mark_completed();

        let outcome = playback.reset();
        assert!(!playback.is_running());
        assert!(!playback.is_completed());
        assert!(!playback.is_awaiting_remote());
        assert!(playback.in_reasoning());
        assert!(outcome.editor_text.is_empty());
        assert!(outcome.prompt_text.is_empty());
        assert_eq!(outcome.ui.control, ControlAction::Generate);
    }
}
