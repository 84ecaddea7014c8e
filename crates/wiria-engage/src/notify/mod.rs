//! User-facing notification store.
//!
//! Constructed explicitly and injected into the workflows; nothing here is
//! process-global. Identical messages arriving in quick succession are
//! collapsed, mirroring the debounce the public site applies to its toasts.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub at: DateTime<Utc>,
}

struct CenterState {
    delivered: Vec<Notification>,
    recent: Vec<(Severity, String, Instant)>,
}

pub struct NotificationCenter {
    window: Duration,
    state: Mutex<CenterState>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(5))
    }

    /// `window` is how long an identical (severity, message) pair is
    /// suppressed after delivery. A zero window disables deduplication.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            state: Mutex::new(CenterState {
                delivered: Vec::new(),
                recent: Vec::new(),
            }),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Severity::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    pub fn push(&self, severity: Severity, message: String) {
        let now = Instant::now();
        let mut state = self.state.lock().expect("notification mutex poisoned");

        // Expired dedup entries are dropped on every push; no timer task.
        state
            .recent
            .retain(|(_, _, at)| now.duration_since(*at) < self.window);

        if state
            .recent
            .iter()
            .any(|(recent_severity, recent_message, _)| {
                *recent_severity == severity && *recent_message == message
            })
        {
            return;
        }

        match severity {
            Severity::Error => tracing::warn!(%message, "user notification"),
            Severity::Success | Severity::Info => tracing::info!(%message, "user notification"),
        }

        if !self.window.is_zero() {
            state.recent.push((severity, message.clone(), now));
        }

        state.delivered.push(Notification {
            severity,
            message,
            at: Utc::now(),
        });
    }

    /// Everything delivered so far, oldest first.
    pub fn events(&self) -> Vec<Notification> {
        self.state
            .lock()
            .expect("notification mutex poisoned")
            .delivered
            .clone()
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}
