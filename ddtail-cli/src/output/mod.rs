//! Output layer
//!
//! Renders remote log entries as single printable lines, width-bounded for
//! the current terminal.

mod formatter;

pub use formatter::LogFormatter;
