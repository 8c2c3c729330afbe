//! Notification delivery channels

use crate::error::Result;
use crate::notify::Notification;
use std::io::Write;

/// A channel notifications are delivered to
pub trait NotificationSink: Send + Sync {
    /// Deliver one notification
    fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Which console stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error, keeping stdout free for machine-readable output
    Stderr,
}

/// Prints notifications to the console, one line each
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    /// Console sink writing to `stream`
    pub const fn new(stream: ConsoleStream) -> Self {
        Self { stream }
    }

    /// The stream this sink writes to
    pub const fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl NotificationSink for ConsoleSink {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        match self.stream {
            ConsoleStream::Stdout => write_line(anstream::stdout(), notification),
            ConsoleStream::Stderr => write_line(anstream::stderr(), notification),
        }
    }
}

fn write_line(mut out: impl Write, notification: &Notification) -> Result<()> {
    writeln!(out, "{notification}")?;
    out.flush()?;
    Ok(())
}
