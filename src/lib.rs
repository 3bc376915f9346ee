//! Coordination core for media egress pipelines
//!
//! Two independent pieces:
//!
//! - [`callbacks`]: a per-session registry where the pipeline builder, track
//!   ingestion and upload sinks subscribe to lifecycle events (errors, stop,
//!   track subscription, RTP forwarding, track add/mute/unmute/remove,
//!   end-of-stream) without knowing about each other.
//! - [`logging`]: a classifier for the free-text output of native handler
//!   processes, routing each line to a leveled sink or passing structured
//!   lines through.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use egress_core::callbacks::Callbacks;
//!
//! let callbacks = Arc::new(Callbacks::new());
//!
//! callbacks.add_on_track_muted(|track_id| println!("muted {}", track_id));
//! callbacks.add_on_stop(|| Ok(()));
//!
//! callbacks.on_track_muted("TR_abc");
//! assert!(callbacks.on_stop().is_ok());
//! ```

pub mod callbacks;
pub mod error;
pub mod logging;

pub use callbacks::Callbacks;
pub use error::{CallbackError, Result};
pub use logging::{HandlerLogger, HandlerLoggerConfig};
