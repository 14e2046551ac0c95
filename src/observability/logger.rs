//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - Written to stderr so stdout stays reserved for command output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that drops events below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    threshold: Severity,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

impl Logger {
    pub fn new(threshold: Severity) -> Self {
        Self { threshold }
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold
    }

    /// Log an event with the given severity and fields
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if self.enabled(severity) {
            // Logging must never fail the caller
            let _ = write_line(severity, event, fields, &mut io::stderr().lock());
        }
    }

    pub fn trace(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Trace, event, fields);
    }

    pub fn info(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: &[(&str, &str)]) {
        self.log(Severity::Warn, event, fields);
    }
}

/// Renders one log line.
pub fn format_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(128);
    output.push_str("{\"event\":");
    output.push_str(&json_string(event));
    output.push_str(",\"severity\":");
    output.push_str(&json_string(severity.as_str()));

    let mut sorted_fields: Vec<_> = fields.iter().collect();
    sorted_fields.sort_by_key(|(k, _)| *k);

    for (key, value) in sorted_fields {
        output.push(',');
        output.push_str(&json_string(key));
        output.push(':');
        output.push_str(&json_string(value));
    }

    output.push_str("}\n");
    output
}

fn write_line<W: Write>(
    severity: Severity,
    event: &str,
    fields: &[(&str, &str)],
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(format_line(severity, event, fields).as_bytes())?;
    writer.flush()
}

fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
