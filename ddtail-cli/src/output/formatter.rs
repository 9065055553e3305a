//! Log line formatting
//!
//! Turns one remote log entry into one printable line: a timestamp /
//! service / status prefix, a normalized message body, and a width bound.
//! Structured (JSON) message bodies are unwrapped into a compact
//! `key=value` form when they carry well-known fields.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use ddtail_core::LogEntry;

/// Width assumed when the terminal size cannot be determined
const DEFAULT_WIDTH: usize = 80;

/// Columns kept free at the right edge of the terminal
const WIDTH_MARGIN: usize = 5;

/// Lines are never bounded below this many characters
const MIN_WIDTH: usize = 40;

/// Appended to lines cut at the width bound
const ELLIPSIS: &str = "...";

/// JSON keys worth surfacing, most meaningful first
const PRIORITY_FIELDS: [&str; 8] = [
    "module", "method", "info", "error", "msg", "message", "action", "status",
];

/// Renders log entries as single width-bounded lines
///
/// Rendering is a pure function of the entry and the width fixed at
/// construction, so the same entry always yields the same line.
#[derive(Debug, Clone)]
pub struct LogFormatter {
    /// Maximum rendered line length, excluding the ellipsis
    max_width: usize,
}

impl LogFormatter {
    /// Creates a formatter sized to the current terminal
    ///
    /// The terminal is probed exactly once, here; when its width cannot be
    /// determined (e.g., stdout is a pipe) the formatter assumes
    /// [`DEFAULT_WIDTH`] columns.
    pub fn new() -> Self {
        let width = crossterm::terminal::size()
            .ok()
            .map(|(cols, _rows)| cols as usize)
            .filter(|cols| *cols > 0)
            .unwrap_or(DEFAULT_WIDTH);
        Self::with_width(width)
    }

    /// Creates a formatter for an explicit terminal width
    pub fn with_width(terminal_width: usize) -> Self {
        Self {
            max_width: terminal_width.saturating_sub(WIDTH_MARGIN).max(MIN_WIDTH),
        }
    }

    /// Renders one entry, or `None` when it carries no message
    pub fn render(&self, entry: &LogEntry) -> Option<String> {
        let attrs = entry.attributes.as_ref()?;
        let message = attrs.message.as_deref()?;

        let mut parts = Vec::new();

        let timestamp = attrs.timestamp.unwrap_or_else(Utc::now);
        parts.push(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true));

        if let Some(service) = attrs.service.as_deref().filter(|s| !s.is_empty()) {
            parts.push(service.to_string());
        }

        if let Some(status) = attrs.status.as_deref().filter(|s| !s.is_empty()) {
            parts.push(status.to_string());
        }

        parts.push(process_message(message));

        Some(self.bound(parts.join(" ")))
    }

    /// Cuts a line at the width bound, marking the cut with an ellipsis
    fn bound(&self, line: String) -> String {
        if line.chars().count() > self.max_width {
            let truncated: String = line.chars().take(self.max_width).collect();
            format!("{truncated}{ELLIPSIS}")
        } else {
            line
        }
    }
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a raw message body
///
/// Strips a leading bracketed tag, then unwraps structured JSON bodies.
/// Anything that fails to parse falls back to the trimmed raw text; a
/// malformed body never drops the entry.
fn process_message(raw: &str) -> String {
    let message = strip_bracket_tag(raw);

    if message.starts_with('{') || message.starts_with('[') {
        if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(message) {
            return extract_fields(&fields);
        }
    }

    message.trim().to_string()
}

/// Strips a leading `[...]` tag and the whitespace after it
///
/// Messages that are nothing but a tag are left alone.
fn strip_bracket_tag(message: &str) -> &str {
    if let Some(rest) = message.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            let tail = &rest[close + 1..];
            if !tail.is_empty() {
                return tail.trim_start();
            }
        }
    }
    message
}

/// Re-renders a parsed JSON body as `key=value` pairs
///
/// Only [`PRIORITY_FIELDS`] are surfaced, in their priority order; null and
/// empty values are skipped. A body with none of those keys is rendered
/// whole.
fn extract_fields(fields: &Map<String, Value>) -> String {
    let mut parts = Vec::new();

    for field in PRIORITY_FIELDS {
        if let Some(value) = fields.get(field) {
            if value.is_null() {
                continue;
            }
            let rendered = scalar_to_string(value);
            if !rendered.is_empty() {
                parts.push(format!("{field}={rendered}"));
            }
        }
    }

    if parts.is_empty() {
        Value::Object(fields.clone()).to_string()
    } else {
        parts.join(" ")
    }
}

/// Renders a JSON value without quoting plain strings
fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
