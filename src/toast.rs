//! Toast notification system
//!
//! A single transient message at a time: showing a new toast replaces the
//! current one, and a toast disappears on its own after [`TOAST_TTL`].

use std::fmt;
use std::time::{Duration, Instant};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// A toast notification message
#[derive(Debug, Clone)]
pub struct Toast {
    /// The message to display
    pub message: String,
    /// The severity level of the toast
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
    /// Success message
    Success,
}

impl Toast {
    /// Create a new toast with the given message and level
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    /// Create an info toast
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    /// Create a warning toast
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    /// Create an error toast
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    /// Create a success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) >= TOAST_TTL
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// The message coloured by level when stderr is a terminal.
    pub fn styled(&self) -> String {
        match self.level {
            ToastLevel::Info => self
                .message
                .if_supports_color(Stream::Stderr, |t| t.cyan())
                .to_string(),
            ToastLevel::Warning => self
                .message
                .if_supports_color(Stream::Stderr, |t| t.yellow())
                .to_string(),
            ToastLevel::Error => self
                .message
                .if_supports_color(Stream::Stderr, |t| t.red())
                .to_string(),
            ToastLevel::Success => self
                .message
                .if_supports_color(Stream::Stderr, |t| t.green())
                .to_string(),
        }
    }
}

impl PartialEq for Toast {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.level == other.level
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Holds the one toast currently on screen.
#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `toast`, replacing whatever was visible.
    pub fn show(&mut self, toast: Toast) {
        tracing::debug!(level = ?toast.level, message = %toast.message, "toast");
        self.current = Some(toast);
    }

    /// Close the visible toast early.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// The visible toast at `now`, dropping it once expired.
    pub fn visible_at(&mut self, now: Instant) -> Option<&Toast> {
        if self.current.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn visible(&mut self) -> Option<&Toast> {
        self.visible_at(Instant::now())
    }

    /// Take the current toast regardless of age.
    pub fn take(&mut self) -> Option<Toast> {
        self.current.take()
    }
}
