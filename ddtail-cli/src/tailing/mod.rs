//! Tailing layer
//!
//! Drives the fetch/print/wait cycle against the log-query service and
//! carries the pagination cursor from one poll to the next.

pub mod cursor;
pub mod tailer;

pub use tailer::Tailer;
