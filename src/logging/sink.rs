//! Destinations for classified output

use std::io::Write;

use super::severity::Severity;

/// Identifying attributes attached to every classified line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFields {
    /// Handler process ID
    pub handler_id: String,
    /// Session ID the handler is serving
    pub session_id: String,
}

impl LogFields {
    /// Create a new field set
    pub fn new(handler_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            handler_id: handler_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// Leveled sink for classified lines
///
/// `log` is only ever called with `Info`, `Warn` or `Error`. Structured lines
/// go to `passthrough` untouched and without attributes.
pub trait LogSink: Send + Sync {
    /// Record a classified line
    fn log(&self, severity: Severity, message: &str, fields: &LogFields);

    /// Emit an already-structured line verbatim
    fn passthrough(&self, line: &str);
}

/// Sink that forwards to `tracing` and writes structured lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Create a new tracing sink
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str, fields: &LogFields) {
        match severity {
            Severity::Info => tracing::info!(
                handler_id = %fields.handler_id,
                session_id = %fields.session_id,
                "{}",
                message
            ),
            Severity::Warn => tracing::warn!(
                handler_id = %fields.handler_id,
                session_id = %fields.session_id,
                "{}",
                message
            ),
            Severity::Error => tracing::error!(
                handler_id = %fields.handler_id,
                session_id = %fields.session_id,
                "{}",
                message
            ),
            Severity::Ignore => {}
        }
    }

    fn passthrough(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // Fire and forget: a closed stdout must not take the handler down.
        let _ = writeln!(stdout, "{}", line);
    }
}
