//! Classification counters

use std::sync::atomic::{AtomicU64, Ordering};

use super::severity::Severity;

/// Per-outcome line counters for one classifier
#[derive(Debug, Default)]
pub struct ClassifierStats {
    info: AtomicU64,
    warn: AtomicU64,
    error: AtomicU64,
    ignored: AtomicU64,
    passthrough: AtomicU64,
}

impl ClassifierStats {
    /// Create zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a classified line
    pub fn record(&self, severity: Severity) {
        let counter = match severity {
            Severity::Info => &self.info,
            Severity::Warn => &self.warn,
            Severity::Error => &self.error,
            Severity::Ignore => &self.ignored,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a structured passthrough line
    pub fn record_passthrough(&self) {
        self.passthrough.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters
    pub fn snapshot(&self) -> ClassifierCounts {
        ClassifierCounts {
            info: self.info.load(Ordering::Relaxed),
            warn: self.warn.load(Ordering::Relaxed),
            error: self.error.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            passthrough: self.passthrough.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`ClassifierStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierCounts {
    /// Lines logged at info
    pub info: u64,
    /// Lines logged at warn
    pub warn: u64,
    /// Lines logged at error
    pub error: u64,
    /// Lines dropped
    pub ignored: u64,
    /// Structured lines passed through
    pub passthrough: u64,
}

impl ClassifierCounts {
    /// Total lines seen
    pub fn total(&self) -> u64 {
        self.info + self.warn + self.error + self.ignored + self.passthrough
    }
}
