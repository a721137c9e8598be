// Terminal notification sink
//
// Renders notifications as single stderr lines, coloured by severity when
// stderr is a terminal.

use chrono::Local;
use std::io::{self, IsTerminal};

use super::sink::NotificationSink;
use super::types::{Notification, Severity};

pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Sink that never emits ANSI escapes
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Format a notification without the timestamp
    pub fn render(&self, notification: &Notification) -> String {
        let (icon, color) = match notification.severity {
            Severity::Success => ("✓", "32"),
            Severity::Warn => ("⚠", "33"),
            Severity::Error => ("✗", "31"),
            Severity::Info => ("ℹ", "36"),
        };

        let mut line = match &notification.summary {
            Some(summary) if self.color => format!("\x1b[1;{}m{} {}\x1b[0m", color, icon, summary),
            Some(summary) => format!("{} {}", icon, summary),
            None => icon.to_string(),
        };
        if let Some(detail) = &notification.detail {
            line.push_str(": ");
            line.push_str(detail);
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for ConsoleSink {
    fn add(&self, notification: Notification) {
        eprintln!(
            "[{}] {}",
            Local::now().format("%H:%M:%S"),
            self.render(&notification)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let sink = ConsoleSink::plain();
        let line = sink.render(
            &Notification::success()
                .summary("Success")
                .detail("Boot packet sent to ws1 (AA:BB:CC:DD:EE:FF)."),
        );
        assert_eq!(line, "✓ Success: Boot packet sent to ws1 (AA:BB:CC:DD:EE:FF).");
    }

    #[test]
    fn test_render_without_summary() {
        let sink = ConsoleSink::plain();
        assert_eq!(sink.render(&Notification::error().detail("boom")), "✗: boom");
    }
}
