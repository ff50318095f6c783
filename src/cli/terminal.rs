//! Terminal color helpers.

use owo_colors::OwoColorize;

/// Detects whether colored output should be enabled.
fn enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing user-facing messages.
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as an error (red)
    fn error(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl<T: AsRef<str>> Colorize for T {
    fn success(&self) -> String {
        if enabled() {
            self.as_ref().green().to_string()
        } else {
            self.as_ref().to_string()
        }
    }

    fn error(&self) -> String {
        if enabled() {
            self.as_ref().red().to_string()
        } else {
            self.as_ref().to_string()
        }
    }

    fn dim(&self) -> String {
        if enabled() {
            self.as_ref().dimmed().to_string()
        } else {
            self.as_ref().to_string()
        }
    }
}
