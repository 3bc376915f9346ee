//! Severity classification table
//!
//! Native media processes prefix their diagnostics with recognizable tags.
//! The first [`PREFIX_LEN`] bytes of a line select its severity; anything
//! unrecognized is surfaced as an error.

use std::collections::HashMap;

/// Number of leading bytes used to classify a line
pub const PREFIX_LEN: usize = 5;

/// Classification outcome for a line of process output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Drop the line
    Ignore,
    /// Informational
    Info,
    /// Warning
    Warn,
    /// Error (also the default for unmatched lines)
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Ignore => write!(f, "ignore"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Immutable prefix → severity lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    actions: HashMap<String, Severity>,
}

impl ClassificationTable {
    /// Create a table with no entries; every line classifies as `Error`
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Add or replace an entry
    ///
    /// # Panics
    ///
    /// Panics if `prefix` is not exactly [`PREFIX_LEN`] bytes, since such an
    /// entry could never match.
    pub fn with_entry(mut self, prefix: &str, severity: Severity) -> Self {
        assert_eq!(
            prefix.len(),
            PREFIX_LEN,
            "classification prefix must be {} bytes: {:?}",
            PREFIX_LEN,
            prefix
        );
        self.actions.insert(prefix.to_string(), severity);
        self
    }

    /// Severity for `line`
    ///
    /// Lines shorter than the prefix, or whose prefix ends inside a multi-byte
    /// character, default to `Error` like any unmatched prefix.
    pub fn classify(&self, line: &str) -> Severity {
        line.get(..PREFIX_LEN)
            .and_then(|prefix| self.actions.get(prefix))
            .copied()
            .unwrap_or(Severity::Error)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ClassificationTable {
    /// Table for GStreamer / WebRTC SDK output
    fn default() -> Self {
        Self::empty()
            // GStreamer debug timestamps
            .with_entry("0:00:", Severity::Ignore)
            .with_entry("te_au", Severity::Ignore)
            .with_entry("turnc", Severity::Info)
            .with_entry("ice E", Severity::Info)
            .with_entry("SDK 2", Severity::Info)
            .with_entry("(egre", Severity::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = ClassificationTable::default();

        assert_eq!(table.len(), 6);
        assert_eq!(table.classify("0:00:01.123 GST_PADS"), Severity::Ignore);
        assert_eq!(table.classify("te_audio dropped"), Severity::Ignore);
        assert_eq!(table.classify("turnc foo bar"), Severity::Info);
        assert_eq!(table.classify("ice ERROR 701"), Severity::Info);
        assert_eq!(table.classify("SDK 2024/01/01 connected"), Severity::Info);
        assert_eq!(table.classify("(egress:42): GLib-WARNING"), Severity::Warn);
    }

    #[test]
    fn test_unmatched_defaults_to_error() {
        let table = ClassificationTable::default();

        assert_eq!(table.classify("xxxxx"), Severity::Error);
        assert_eq!(table.classify("segmentation fault"), Severity::Error);
    }

    #[test]
    fn test_short_lines_default_to_error() {
        let table = ClassificationTable::empty().with_entry("abcde", Severity::Info);

        assert_eq!(table.classify("abc"), Severity::Error);
        assert_eq!(table.classify(""), Severity::Error);
        assert_eq!(table.classify("abcde"), Severity::Info);
    }

    #[test]
    fn test_prefix_inside_multibyte_char() {
        let table = ClassificationTable::default();

        // 'é' spans bytes 4..6, so there is no 5-byte prefix
        assert_eq!(table.classify("turné"), Severity::Error);
    }

    #[test]
    fn test_with_entry_replaces() {
        let table = ClassificationTable::default().with_entry("turnc", Severity::Ignore);

        assert_eq!(table.len(), 6);
        assert_eq!(table.classify("turnc foo"), Severity::Ignore);
    }

    #[test]
    #[should_panic(expected = "classification prefix must be 5 bytes")]
    fn test_with_entry_rejects_wrong_length() {
        let _ = ClassificationTable::empty().with_entry("turn", Severity::Info);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(Severity::Ignore.to_string(), "ignore");
    }
}
