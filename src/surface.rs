use std::sync::{Arc, Mutex};

use crate::models::Severity;

// 1. Notification Surface Contract
/// Notifier
///
/// The toast-style message surface. The navigation core only uses it to report
/// a failed identity fetch; authorization denials are silent.
pub trait Notifier: Send + Sync {
    fn display(&self, message: &str, severity: Severity, duration_ms: u64);

    fn error(&self, message: &str, duration_ms: u64) {
        self.display(message, Severity::Danger, duration_ms);
    }
}

/// NotifierState
///
/// The shared handle type passed to whoever needs to raise a notification.
pub type NotifierState = Arc<dyn Notifier>;

/// TracingNotifier
///
/// Surface used by the console binary: every message becomes a log event at the
/// level matching its severity.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn display(&self, message: &str, severity: Severity, duration_ms: u64) {
        match severity {
            Severity::Danger => tracing::error!(duration_ms, "{}", message),
            Severity::Warning => tracing::warn!(duration_ms, "{}", message),
            Severity::Info | Severity::Success => tracing::info!(duration_ms, "{}", message),
        }
    }
}

/// Notice
///
/// One recorded call to a `MockNotifier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration_ms: u64,
}

/// MockNotifier
///
/// In-memory surface for tests: records every notice it is asked to display.
#[derive(Debug, Default)]
pub struct MockNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Notifier for MockNotifier {
    fn display(&self, message: &str, severity: Severity, duration_ms: u64) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Notice {
                message: message.to_string(),
                severity,
                duration_ms,
            });
    }
}

// 2. Document Title Sink Contract
/// TitleSink
///
/// Receives the composed document title after each committed navigation.
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}

pub type TitleSinkState = Arc<dyn TitleSink>;

/// Logs each title; used by the console binary.
#[derive(Debug, Clone, Default)]
pub struct TracingTitleSink;

impl TitleSink for TracingTitleSink {
    fn set_title(&self, title: &str) {
        tracing::debug!(title, "document title set");
    }
}

/// MemoryTitleSink
///
/// Keeps every title it receives, in order.
#[derive(Debug, Default)]
pub struct MemoryTitleSink {
    titles: Mutex<Vec<String>>,
}

impl MemoryTitleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn titles(&self) -> Vec<String> {
        self.titles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.titles().pop()
    }
}

impl TitleSink for MemoryTitleSink {
    fn set_title(&self, title: &str) {
        self.titles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(title.to_string());
    }
}
