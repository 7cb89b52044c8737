//! User-facing notifications ("toasts") raised by note actions.

use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Format a toast for a terminal line.
pub fn format_toast(toast: &Toast) -> String {
    format!("{}: {}", toast.title, toast.description)
}

/// Writes toasts to stderr. Failures are already logged where they happen, so
/// the toast itself is only traced at debug level.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        tracing::debug!(level = ?toast.level, title = %toast.title, "toast");
        eprintln!("{}", format_toast(&toast));
    }
}

/// Keeps every toast in memory. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_toast_has_single_prefix() {
        let line = format_toast(&Toast::error("Error", "Failed to fetch notes."));
        assert_eq!(line, "Error: Failed to fetch notes.");

        let line = format_toast(&Toast::success("Note Created", "Saved"));
        assert_eq!(line, "Note Created: Saved");
    }

    #[test]
    fn test_recording_notifier_shares_between_clones() {
        let notifier = RecordingNotifier::new();
        let handle = notifier.clone();
        notifier.notify(Toast::success("Note created", "Saved"));
        handle.notify(Toast::error("Error", "Failed"));

        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].level, ToastLevel::Success);
        assert_eq!(toasts[1].title, "Error");
    }
}
