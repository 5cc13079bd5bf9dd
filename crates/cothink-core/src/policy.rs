//! Coordination policy - paragraph-count checkpoints for human review

/// Decides, from accumulated text shape alone, whether generation should
/// pause and hand control back to the human. Created fresh per attempt.
#[derive(Debug)]
pub struct CoordinationPolicy {
    threshold: u32,
    baseline_paragraphs: usize,
    fired: bool,
}

impl CoordinationPolicy {
    /// `threshold` of 0 disables auto-pause. The baseline is the paragraph
    /// count of the text at the moment generation started.
    pub fn new(threshold: u32, baseline_text: &str) -> Self {
        Self {
            threshold,
            baseline_paragraphs: paragraph_breaks(baseline_text),
            fired: false,
        }
    }

    /// One-shot: fires at most once per generation attempt.
    pub fn should_pause_for_human(&mut self, current_text: &str) -> bool {
        if self.threshold == 0 || self.fired {
            return false;
        }

        let grown = paragraph_breaks(current_text).saturating_sub(self.baseline_paragraphs);
        if grown >= self.threshold as usize {
            self.fired = true;
            return true;
        }
        false
    }
}

/// Non-overlapping `\n\n` occurrences.
fn paragraph_breaks(text: &str) -> usize {
    text.matches("\n\n").count()
}
