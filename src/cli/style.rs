//! Console styling helpers
//!
//! Output goes through `anstream`, which strips the colors when stdout is not
//! a terminal or `NO_COLOR` is set.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Semantic styles for console output
pub trait Stylize: Display + Sized {
    /// Bold
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Cyan, for names and numbers
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Dimmed, for secondary details
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Green
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Red
    fn error(&self) -> String {
        self.red().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    "✓".success()
}
