//! Native process log classification
//!
//! Handler processes write GLib/GStreamer diagnostics, WebRTC SDK chatter and
//! JSON status lines to one output stream. [`HandlerLogger`] splits each
//! captured chunk into lines and routes them:
//!
//! - lines ending in `}` are structured already and pass through verbatim
//! - everything else is classified by its first [`PREFIX_LEN`] bytes
//!   through a [`ClassificationTable`] and sent to a [`LogSink`] with the
//!   handler and session IDs attached, or dropped when the table says so
//!
//! Unknown prefixes are logged as errors so unexpected output is never lost.

pub mod config;
pub mod handler;
pub mod severity;
pub mod sink;
pub mod stats;

pub use config::HandlerLoggerConfig;
pub use handler::HandlerLogger;
pub use severity::{ClassificationTable, Severity, PREFIX_LEN};
pub use sink::{LogFields, LogSink, TracingSink};
pub use stats::{ClassifierCounts, ClassifierStats};
