//! Locale-keyed display vocabulary
//!
//! Pure text lookup, no decision logic: the core picks abstract
//! [`StatusKind`]s and the presentation layer resolves them here.

use crate::status::{StatusKind, StatusNote};

/// Active display locale; selects vocabulary only, never behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }
}

/// Fixed UI vocabulary for one locale.
pub struct Labels {
    pub prompt: &'static str,
    pub editor: &'static str,
    pub generate: &'static str,
    pub pause: &'static str,
    pub new_round: &'static str,
    pub reasoning_section: &'static str,
    pub error_section: &'static str,
    pub greeting: &'static str,
}

static EN: Labels = Labels {
    prompt: "Task",
    editor: "Reasoning draft",
    generate: "Generate",
    pause: "Pause",
    new_round: "New round",
    reasoning_section: "Chain of Thought",
    error_section: "❌ Error",
    greeting: "Pause the stream any time to rework the reasoning draft, then resume.",
};

static ZH: Labels = Labels {
    prompt: "任务",
    editor: "思维草稿",
    generate: "生成",
    pause: "暂停",
    new_round: "新一轮",
    reasoning_section: "思维链",
    error_section: "❌ 错误",
    greeting: "随时暂停流式输出，修改思维草稿后继续生成。",
};

pub fn labels(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN,
        Locale::Zh => &ZH,
    }
}

/// Fixed label for a status kind.
pub fn status_label(locale: Locale, kind: StatusKind) -> &'static str {
    match (locale, kind) {
        (Locale::En, StatusKind::AwaitingRemote) => "waiting for the model...",
        (Locale::En, StatusKind::AwaitingRetry) => "paused, resume to retry",
        (Locale::En, StatusKind::Reasoning) => "reasoning...",
        (Locale::En, StatusKind::Answering) => "writing the answer...",
        (Locale::En, StatusKind::Completed) => "completed",
        (Locale::En, StatusKind::Interrupted) => "interrupted",
        (Locale::En, StatusKind::TimedOut) => "interrupted by timeout",
        (Locale::En, StatusKind::Failed) => "request failed",
        (Locale::Zh, StatusKind::AwaitingRemote) => "等待模型响应…",
        (Locale::Zh, StatusKind::AwaitingRetry) => "已暂停，恢复后重试",
        (Locale::Zh, StatusKind::Reasoning) => "思考中…",
        (Locale::Zh, StatusKind::Answering) => "输出结论中…",
        (Locale::Zh, StatusKind::Completed) => "已完成",
        (Locale::Zh, StatusKind::Interrupted) => "已中断",
        (Locale::Zh, StatusKind::TimedOut) => "请求超时中断",
        (Locale::Zh, StatusKind::Failed) => "请求失败",
    }
}

/// Resolve a status note to display text, folding failure detail behind the
/// question-mark glyph the way the editor label shows it.
pub fn status_text(locale: Locale, note: &StatusNote) -> String {
    match (note.kind, &note.detail) {
        (StatusKind::Failed, Some(detail)) => format!("❓ {detail}"),
        (kind, _) => status_label(locale, kind).to_string(),
    }
}
