//! Display-ready transcript flattening

use crate::round::Round;

/// How an entry should be rendered; reasoning and error entries are the
/// labeled side-channels, the presentation layer owns their section titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    User,
    Reasoning,
    Answer,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub content: String,
}

impl TranscriptEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::User,
            content: content.into(),
        }
    }

    pub fn reasoning(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Reasoning,
            content: content.into(),
        }
    }

    pub fn answer(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Answer,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            content: content.into(),
        }
    }
}

/// Flatten per-round records into the ordered transcript. Pure and
/// idempotent: the user entry is always emitted, reasoning and answer only
/// when non-empty.
pub fn flatten(rounds: &[Round]) -> Vec<TranscriptEntry> {
    let mut entries = Vec::new();
    for round in rounds {
        entries.push(TranscriptEntry::user(&round.user_prompt));
        if !round.reasoning.is_empty() {
            entries.push(TranscriptEntry::reasoning(&round.reasoning));
        }
        if !round.answer.is_empty() {
            entries.push(TranscriptEntry::answer(&round.answer));
        }
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(prompt: &str, reasoning: &str, answer: &str) -> Round {
        let mut round = Round::new();
        round.user_prompt = prompt.to_string();
        round.reasoning = reasoning.to_string();
        round.answer = answer.to_string();
        round.raw = format!("{reasoning}{answer}");
        round
    }

    #[test]
    fn empty_reasoning_is_omitted() {
        let entries = flatten(&[round("prompt", "", "the answer")]);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::User);
        assert_eq!(entries[1].kind, EntryKind::Answer);
        assert_eq!(entries[1].content, "the answer");
    }

    #[test]
    fn rounds_flatten_in_order() {
        let entries = flatten(&[
            round("first", "thinking", "done"),
            round("second", "more thinking", ""),
        ]);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].content, "first");
        assert_eq!(entries[1].kind, EntryKind::Reasoning);
        assert_eq!(entries[2].kind, EntryKind::Answer);
        assert_eq!(entries[3].content, "second");
        assert_eq!(entries[4].kind, EntryKind::Reasoning);
    }

    #[test]
    fn user_entry_is_emitted_even_when_empty() {
        let entries = flatten(&[round("", "", "")]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::User);
    }

    #[test]
    fn flatten_is_idempotent() {
        let rounds = [round("p", "r", "a")];
        assert_eq!(flatten(&rounds), flatten(&rounds));
    }
}
