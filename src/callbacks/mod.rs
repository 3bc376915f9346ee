//! Lifecycle callback registry
//!
//! Independent subsystems (pipeline builder, track ingestion, upload sinks)
//! register interest in pipeline events without knowing about each other.
//! The pipeline owner fires those events; the registry never calls anything
//! on its own.
//!
//! # Dispatch
//!
//! ```text
//!                        Arc<Callbacks>
//!                  ┌───────────────────────┐
//!   add_on_x() ──► │ RwLock<Handlers> {    │
//!   (write lock)   │   on_stop: Vec<..>,   │
//!                  │   on_track_*: Vec<..>,│
//!                  │   on_error: Option,   │
//!                  │ }                     │
//!                  └──────────┬────────────┘
//!                             │ on_x(): clone list (read lock), release
//!                             ▼
//!                   h1(args) ─► h2(args) ─► ... hN(args)
//! ```
//!
//! Handlers run after the lock is released, in registration order, so they
//! can register more handlers or fire other events without deadlocking.

pub mod error;
pub mod ready;
pub mod registry;
pub mod track;

pub use error::{ErrorArray, HandlerError, StopError};
pub use ready::ReadySignal;
pub use registry::{
    BinHook, Callbacks, EosHandler, ErrorHandler, HandlerCounts, StopHandler, TrackAddedHandler,
    TrackForwardHandler, TrackIdHandler, TrackSubscribedHandler,
};
pub use track::{
    Bin, RemoteParticipant, RemoteTrack, RtpPacket, TrackKind, TrackPublication, TrackSource,
};
