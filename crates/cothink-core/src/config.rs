//! Cross-cutting session configuration
//!
//! Mutated by the presentation layer, read by the generation loop each
//! chunk, so slider-style changes take effect mid-stream.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::locale::Locale;

pub const DEFAULT_THROUGHPUT: u32 = 10;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    throughput: u32,
    pause_after_paragraphs: u32,
    locale: Locale,
    show_full_output: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            throughput: DEFAULT_THROUGHPUT,
            pause_after_paragraphs: 0,
            locale: Locale::En,
            show_full_output: false,
        }
    }
}

impl SessionConfig {
    pub fn into_shared(self) -> ConfigHandle {
        Arc::new(Mutex::new(self))
    }

    /// Target visible-updates-per-second ceiling, always at least 1.
    pub fn throughput(&self) -> u32 {
        self.throughput
    }

    pub fn set_throughput(&mut self, throughput: u32) {
        self.throughput = throughput.max(1);
    }

    /// Paragraph-break checkpoint distance; 0 disables auto-pause.
    pub fn pause_after_paragraphs(&self) -> u32 {
        self.pause_after_paragraphs
    }

    pub fn set_pause_after_paragraphs(&mut self, paragraphs: u32) {
        self.pause_after_paragraphs = paragraphs;
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// When on, snapshots carry the full raw text instead of the
    /// reasoning segment alone.
    pub fn show_full_output(&self) -> bool {
        self.show_full_output
    }

    pub fn set_show_full_output(&mut self, show: bool) {
        self.show_full_output = show;
    }
}

pub type ConfigHandle = Arc<Mutex<SessionConfig>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_is_clamped_to_at_least_one() {
        let mut config = SessionConfig::default();
        config.set_throughput(0);
        assert_eq!(config.throughput(), 1);

        config.set_throughput(40);
        assert_eq!(config.throughput(), 40);
    }
}
