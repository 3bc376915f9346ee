//! Handler logger configuration

use super::severity::ClassificationTable;

/// Default read size when pumping process output
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8 * 1024;

/// Configuration for a [`HandlerLogger`](super::HandlerLogger)
#[derive(Debug, Clone)]
pub struct HandlerLoggerConfig {
    /// Handler process ID attached to every line
    pub handler_id: String,

    /// Session ID attached to every line
    pub session_id: String,

    /// Prefix classification table
    pub table: ClassificationTable,

    /// Bytes read per chunk when pumping an output stream
    pub read_buffer_size: usize,
}

impl Default for HandlerLoggerConfig {
    fn default() -> Self {
        Self {
            handler_id: String::new(),
            session_id: String::new(),
            table: ClassificationTable::default(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl HandlerLoggerConfig {
    /// Create a config for the given handler and session
    pub fn new(handler_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            handler_id: handler_id.into(),
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    /// Set the handler ID
    pub fn handler_id(mut self, handler_id: impl Into<String>) -> Self {
        self.handler_id = handler_id.into();
        self
    }

    /// Set the session ID
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Replace the classification table
    pub fn table(mut self, table: ClassificationTable) -> Self {
        self.table = table;
        self
    }

    /// Set the read buffer size (at least one byte)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }
}
