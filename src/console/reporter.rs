//! Output Sinks
//!
//! The runner narrates the demo through a [`Reporter`] so it never
//! touches stdout or colors directly.

use super::format::{format_message, Level};

/// Receives user-facing demo narration.
pub trait Reporter: Send + Sync {
    /// Emits one message at a semantic level.
    fn emit(&self, level: Level, message: &str);
}

/// Prints formatted messages to standard output.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    /// Creates a reporter; `color` toggles ANSI styling.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, message: &str) {
        println!("{}", format_message(message, level, self.color));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Collects messages in memory for assertions.
    #[derive(Default)]
    pub struct RecordingReporter {
        lines: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingReporter {
        pub fn lines(&self) -> Vec<(Level, String)> {
            self.lines.lock().unwrap().clone()
        }

        pub fn text(&self) -> String {
            self.lines()
                .into_iter()
                .map(|(_, line)| line)
                .collect::<Vec<_>>()
                .join("\n")
        }

        pub fn contains(&self, needle: &str) -> bool {
            self.lines().iter().any(|(_, line)| line.contains(needle))
        }
    }

    impl Reporter for RecordingReporter {
        fn emit(&self, level: Level, message: &str) {
            self.lines.lock().unwrap().push((level, message.to_string()));
        }
    }
}
