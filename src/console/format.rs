//! Message Formatting
//!
//! Maps a message and a semantic [`Level`] to a display string. Formatting
//! holds no state; color is decided by the caller.

use colored::Colorize;

/// Semantic category of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Section headings and banners
    Heading,
    /// Step descriptions and URLs
    Info,
    /// Commands being run and secondary notes
    Detail,
    /// Captured standard output
    Output,
    /// Captured standard error
    ErrorOutput,
    /// Positive outcome
    Success,
    /// Negative outcome
    Failure,
    /// Unstyled text
    Plain,
}

/// Formats a message for the console.
///
/// With `color` disabled the message is returned unchanged.
pub fn format_message(message: &str, level: Level, color: bool) -> String {
    if !color {
        return message.to_string();
    }

    match level {
        Level::Heading => message.bold().to_string(),
        Level::Info => message.cyan().to_string(),
        Level::Detail => message.yellow().to_string(),
        Level::Output | Level::Success => message.green().to_string(),
        Level::ErrorOutput | Level::Failure => message.red().to_string(),
        Level::Plain => message.to_string(),
    }
}
