//! Console Output
//!
//! Separates what the demo says from how it looks:
//!
//! - [`format`]: pure message formatting by semantic level
//! - [`reporter`]: output sinks the runner writes through

pub mod format;
pub mod reporter;

pub use format::{format_message, Level};
pub use reporter::{ConsoleReporter, Reporter};
