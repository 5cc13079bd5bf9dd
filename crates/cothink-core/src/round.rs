//! Round record and reasoning/answer segmentation

/// Marker the backend is primed with at the start of every round.
pub const REASONING_OPEN: &str = "<think>";
/// Marker that closes the reasoning segment and opens the answer.
pub const REASONING_CLOSE: &str = "</think>";

/// One user-turn/model-turn pair.
///
/// `raw` always equals `reasoning` before the close marker is observed, and
/// `reasoning + REASONING_CLOSE + answer` after. The split is a single
/// first-occurrence split; appending can never move an existing boundary.
#[derive(Debug, Clone, Default)]
pub struct Round {
    pub user_prompt: String,
    pub reasoning: String,
    pub answer: String,
    pub raw: String,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or resume) an attempt: record the prompt and seed the
    /// accumulated text with the current, possibly human-edited, draft.
    pub fn seed(&mut self, user_prompt: &str, seed_text: &str) {
        self.user_prompt = user_prompt.to_string();
        self.raw = seed_text.to_string();
        self.resplit();
    }

    /// Append a model delta, dropping any echoed open marker.
    pub fn append_delta(&mut self, delta: &str) {
        if delta.contains(REASONING_OPEN) {
            self.raw.push_str(&delta.replace(REASONING_OPEN, ""));
        } else {
            self.raw.push_str(delta);
        }
        self.resplit();
    }

    /// True once the close marker has been observed in this round.
    pub fn reasoning_closed(&self) -> bool {
        self.raw.contains(REASONING_CLOSE)
    }

    fn resplit(&mut self) {
        match self.raw.split_once(REASONING_CLOSE) {
            Some((reasoning, answer)) => {
                self.reasoning = reasoning.to_string();
                self.answer = answer.to_string();
            }
            None => {
                self.reasoning = self.raw.clone();
                self.answer.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_equals_raw_before_close_marker() {
        let mut round = Round::new();
        round.seed("prompt", "");
        round.append_delta("Step 1\n\n");
        round.append_delta("Step 2");

        assert_eq!(round.reasoning, round.raw);
        assert_eq!(round.answer, "");
        assert!(!round.reasoning_closed());
    }

    #[test]
    fn split_reassembles_exactly_after_close_marker() {
        let mut round = Round::new();
        round.seed("prompt", "thinking");
        round.append_delta("</think>answer text");

        assert!(round.reasoning_closed());
        assert_eq!(round.reasoning, "thinking");
        assert_eq!(round.answer, "answer text");
        assert_eq!(
            round.raw,
            format!("{}{}{}", round.reasoning, REASONING_CLOSE, round.answer)
        );
    }

    #[test]
    fn split_is_stable_when_a_second_marker_arrives() {
        let mut round = Round::new();
        round.seed("prompt", "");
        round.append_delta("a</think>b");
        round.append_delta("</think>c");

        assert_eq!(round.reasoning, "a");
        assert_eq!(round.answer, "b</think>c");
    }

    #[test]
    fn stray_open_markers_are_stripped_from_deltas() {
        let mut round = Round::new();
        round.seed("prompt", "");
        round.append_delta("<think>\nfirst");

        assert_eq!(round.raw, "\nfirst");
    }

    #[test]
    fn seed_with_closed_reasoning_resplits() {
        let mut round = Round::new();
        round.seed("prompt", "done</think>partial answer");

        assert!(round.reasoning_closed());
        assert_eq!(round.reasoning, "done");
        assert_eq!(round.answer, "partial answer");
    }
}
