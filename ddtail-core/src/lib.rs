//! ddtail Core
//!
//! Core types for the ddtail log tailer.
//!
//! This crate contains the serde models of the Datadog Logs Search API
//! wire format, shared by the HTTP client and the CLI.

pub mod log;

pub use log::{LogAttributes, LogBatch, LogEntry, PageMeta, ResponseMeta};
