//! Notifications for automation events
//!
//! The [`Notifier`] stamps each message with the local time and a severity
//! icon and hands it to its sinks. Only a console sink ships today; other
//! channels plug in through [`NotificationSink`] without changing callers.

mod sink;

pub use sink::{ConsoleSink, ConsoleStream, NotificationSink};

use crate::error::Result;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::debug;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Progress information
    Info,
    /// Something completed successfully
    Success,
    /// Something needs attention but the run continues
    Warning,
    /// Something failed
    Error,
    /// Level not recognised; rendered with a generic icon
    Other,
}

impl NotificationLevel {
    /// Icon shown in front of the message
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Info => "ℹ️",
            Self::Success => "✅",
            Self::Warning => "⚠️",
            Self::Error => "❌",
            Self::Other => "📢",
        }
    }
}

impl From<&str> for NotificationLevel {
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other,
        }
    }
}

/// A single timestamped notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// When the notification was raised
    pub timestamp: DateTime<Local>,
    /// Severity
    pub level: NotificationLevel,
    /// Message text
    pub message: String,
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "🔔 [{}] {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.level.icon(),
            self.message
        )
    }
}

/// Sends notifications to every configured sink when enabled
pub struct Notifier {
    enabled: bool,
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Notifier {
    /// Notifier printing to the given console stream
    pub fn console(enabled: bool, stream: ConsoleStream) -> Self {
        Self::with_sink(enabled, Arc::new(ConsoleSink::new(stream)))
    }

    /// Notifier delivering to a single custom sink
    pub fn with_sink(enabled: bool, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            enabled,
            sinks: vec![sink],
        }
    }

    /// Deliver to an additional sink as well
    pub fn add_sink(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Whether notifications are delivered at all
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Send a notification.
    ///
    /// A no-op when disabled. Every sink is attempted; the first delivery
    /// error is returned.
    pub fn notify(&self, message: impl Into<String>, level: NotificationLevel) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let notification = Notification {
            timestamp: Local::now(),
            level,
            message: message.into(),
        };

        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.deliver(&notification) {
                debug!(error = %e, "notification sink failed");
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Send an info notification
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, NotificationLevel::Info)
    }

    /// Send a success notification
    pub fn success(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, NotificationLevel::Success)
    }

    /// Send a warning notification
    pub fn warning(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, NotificationLevel::Warning)
    }

    /// Send an error notification
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.notify(message, NotificationLevel::Error)
    }
}
