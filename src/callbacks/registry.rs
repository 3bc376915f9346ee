//! Callback registry implementation
//!
//! Subsystems register handlers at setup time and the pipeline owner fires
//! events at runtime. Every dispatch copies the relevant handler list under
//! the read lock and invokes the copy after the lock is released.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{CallbackError, Result};

use super::error::{ErrorArray, HandlerError, StopError};
use super::ready::ReadySignal;
use super::track::{Bin, RemoteParticipant, RemoteTrack, RtpPacket, TrackPublication, TrackSource};

/// Sole sink for pipeline errors
pub type ErrorHandler = Arc<dyn Fn(HandlerError) + Send + Sync>;
/// Fallible teardown action
pub type StopHandler = Arc<dyn Fn() -> std::result::Result<(), HandlerError> + Send + Sync>;
/// Called when a remote track is subscribed
pub type TrackSubscribedHandler =
    Arc<dyn Fn(&RemoteTrack, &TrackPublication, &RemoteParticipant) + Send + Sync>;
/// Called for every RTP packet ready for forwarding
pub type TrackForwardHandler = Arc<dyn Fn(&RemoteTrack, &RtpPacket) + Send + Sync>;
/// Called when a track source joins the pipeline
pub type TrackAddedHandler = Arc<dyn Fn(&TrackSource) + Send + Sync>;
/// Called with a track ID (muted, unmuted, removed)
pub type TrackIdHandler = Arc<dyn Fn(&str) + Send + Sync>;
/// Called once the end-of-stream marker has been sent
pub type EosHandler = Arc<dyn Fn() + Send + Sync>;
/// Pipeline topology hook
pub type BinHook = Arc<dyn Fn(&Bin) + Send + Sync>;

#[derive(Default)]
struct Handlers {
    // upstream
    on_error: Option<ErrorHandler>,
    on_stop: Vec<StopHandler>,

    // source
    on_track_subscribed: Vec<TrackSubscribedHandler>,
    on_track_forward_rtp: Vec<TrackForwardHandler>,

    on_track_added: Vec<TrackAddedHandler>,
    on_track_muted: Vec<TrackIdHandler>,
    on_track_unmuted: Vec<TrackIdHandler>,
    on_track_removed: Vec<TrackIdHandler>,
    on_eos_sent: Option<EosHandler>,

    // internal
    add_bin: Option<BinHook>,
    remove_bin: Option<BinHook>,
}

/// Number of handlers registered per event kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerCounts {
    /// Whether an error handler is set
    pub error: bool,
    /// Stop handlers
    pub stop: usize,
    /// Track subscribed handlers
    pub track_subscribed: usize,
    /// RTP forward handlers
    pub track_forward_rtp: usize,
    /// Track added handlers
    pub track_added: usize,
    /// Track muted handlers
    pub track_muted: usize,
    /// Track unmuted handlers
    pub track_unmuted: usize,
    /// Track removed handlers
    pub track_removed: usize,
    /// Whether an EOS handler is set
    pub eos_sent: bool,
    /// Whether the pipeline owner installed bin hooks
    pub bin_hooks: bool,
}

/// Lifecycle event registry for one pipeline session
///
/// Share it as `Arc<Callbacks>` between the pipeline builder, track ingestion
/// and sinks. A single `RwLock` guards every list; it is only held long
/// enough to append a handler or clone a list, never while a handler runs, so
/// handlers may register or fire other events themselves.
///
/// A handler registered while a dispatch of the same kind is in flight is not
/// seen by that dispatch; it runs from the next one on.
pub struct Callbacks {
    handlers: RwLock<Handlers>,

    /// Fired once the media framework is initialized
    gst_ready: ReadySignal,

    /// Fired once the pipeline has been built
    build_ready: ReadySignal,
}

impl Callbacks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Handlers::default()),
            gst_ready: ReadySignal::new(),
            build_ready: ReadySignal::new(),
        }
    }

    // Handlers never run under the lock, so poisoning can only come from a
    // panic while appending or cloning; the lists are still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Handlers> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Handlers> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Readiness gate for media framework initialization
    pub fn gst_ready(&self) -> &ReadySignal {
        &self.gst_ready
    }

    /// Readiness gate for pipeline construction
    pub fn build_ready(&self) -> &ReadySignal {
        &self.build_ready
    }

    /// Set the error handler, replacing any previous one
    pub fn set_on_error<F>(&self, f: F)
    where
        F: Fn(HandlerError) + Send + Sync + 'static,
    {
        self.write().on_error = Some(Arc::new(f));
    }

    /// Report an error to the error handler
    ///
    /// No-op if no handler is set.
    pub fn on_error(&self, err: HandlerError) {
        let on_error = self.read().on_error.clone();

        if let Some(f) = on_error {
            f(err);
        }
    }

    /// Register a teardown action
    pub fn add_on_stop<F>(&self, f: F)
    where
        F: Fn() -> std::result::Result<(), HandlerError> + Send + Sync + 'static,
    {
        let mut handlers = self.write();
        handlers.on_stop.push(Arc::new(f));
        tracing::trace!(handlers = handlers.on_stop.len(), "Stop handler registered");
    }

    /// Run every stop handler in registration order
    ///
    /// A failing handler does not prevent later ones from running. All
    /// failures are returned together.
    pub fn on_stop(&self) -> std::result::Result<(), StopError> {
        let on_stop = self.read().on_stop.clone();

        let mut errs = ErrorArray::new();
        for f in &on_stop {
            errs.check(f());
        }

        if !errs.is_empty() {
            tracing::warn!(
                failed = errs.len(),
                handlers = on_stop.len(),
                "Stop handlers failed"
            );
        }
        errs.into_result()
    }

    /// Register a handler for track subscription
    pub fn add_on_track_subscribed<F>(&self, f: F)
    where
        F: Fn(&RemoteTrack, &TrackPublication, &RemoteParticipant) + Send + Sync + 'static,
    {
        self.write().on_track_subscribed.push(Arc::new(f));
    }

    /// Notify subscribers that a remote track was subscribed
    pub fn on_track_subscribed(
        &self,
        track: &RemoteTrack,
        publication: &TrackPublication,
        participant: &RemoteParticipant,
    ) {
        let on_track_subscribed = self.read().on_track_subscribed.clone();

        tracing::debug!(
            track_id = %track.id,
            kind = %track.kind,
            participant = %participant.identity,
            handlers = on_track_subscribed.len(),
            "Track subscribed"
        );

        for f in &on_track_subscribed {
            f(track, publication, participant);
        }
    }

    /// Register an RTP forwarder
    pub fn add_on_track_forward_rtp<F>(&self, f: F)
    where
        F: Fn(&RemoteTrack, &RtpPacket) + Send + Sync + 'static,
    {
        self.write().on_track_forward_rtp.push(Arc::new(f));
    }

    /// Hand an RTP packet to every forwarder
    pub fn on_track_forward_rtp(&self, track: &RemoteTrack, packet: &RtpPacket) {
        let on_track_forward_rtp = self.read().on_track_forward_rtp.clone();

        for f in &on_track_forward_rtp {
            f(track, packet);
        }
    }

    /// Register a handler for tracks joining the pipeline
    pub fn add_on_track_added<F>(&self, f: F)
    where
        F: Fn(&TrackSource) + Send + Sync + 'static,
    {
        self.write().on_track_added.push(Arc::new(f));
    }

    /// Notify subscribers that a track source joined the pipeline
    pub fn on_track_added(&self, source: &TrackSource) {
        let on_track_added = self.read().on_track_added.clone();

        tracing::debug!(
            track_id = %source.track_id,
            kind = %source.kind,
            handlers = on_track_added.len(),
            "Track added"
        );

        for f in &on_track_added {
            f(source);
        }
    }

    /// Register a handler for muted tracks
    pub fn add_on_track_muted<F>(&self, f: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.write().on_track_muted.push(Arc::new(f));
    }

    /// Notify subscribers that a track was muted
    pub fn on_track_muted(&self, track_id: &str) {
        let on_track_muted = self.read().on_track_muted.clone();

        tracing::debug!(track_id, handlers = on_track_muted.len(), "Track muted");

        for f in &on_track_muted {
            f(track_id);
        }
    }

    /// Register a handler for unmuted tracks
    pub fn add_on_track_unmuted<F>(&self, f: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.write().on_track_unmuted.push(Arc::new(f));
    }

    /// Notify subscribers that a track was unmuted
    pub fn on_track_unmuted(&self, track_id: &str) {
        let on_track_unmuted = self.read().on_track_unmuted.clone();

        tracing::debug!(track_id, handlers = on_track_unmuted.len(), "Track unmuted");

        for f in &on_track_unmuted {
            f(track_id);
        }
    }

    /// Register a handler for removed tracks
    pub fn add_on_track_removed<F>(&self, f: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.write().on_track_removed.push(Arc::new(f));
    }

    /// Notify subscribers that a track was removed
    pub fn on_track_removed(&self, track_id: &str) {
        let on_track_removed = self.read().on_track_removed.clone();

        tracing::debug!(track_id, handlers = on_track_removed.len(), "Track removed");

        for f in &on_track_removed {
            f(track_id);
        }
    }

    /// Set the end-of-stream handler, replacing any previous one
    pub fn set_on_eos_sent<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.write().on_eos_sent = Some(Arc::new(f));
    }

    /// Report that the end-of-stream marker was sent
    ///
    /// No-op if no handler is set.
    pub fn on_eos_sent(&self) {
        let on_eos_sent = self.read().on_eos_sent.clone();

        if let Some(f) = on_eos_sent {
            f();
        }
    }

    /// Install the pipeline topology hooks
    ///
    /// Only the pipeline owner should call this.
    pub fn set_bin_hooks<A, R>(&self, add: A, remove: R)
    where
        A: Fn(&Bin) + Send + Sync + 'static,
        R: Fn(&Bin) + Send + Sync + 'static,
    {
        let mut handlers = self.write();
        handlers.add_bin = Some(Arc::new(add));
        handlers.remove_bin = Some(Arc::new(remove));
    }

    /// Ask the pipeline owner to add a bin
    pub fn add_bin(&self, bin: &Bin) -> Result<()> {
        let add_bin = self.read().add_bin.clone();
        let f = add_bin.ok_or(CallbackError::BinHooksNotSet)?;

        tracing::debug!(bin = %bin, "Adding bin");
        f(bin);
        Ok(())
    }

    /// Ask the pipeline owner to remove a bin
    pub fn remove_bin(&self, bin: &Bin) -> Result<()> {
        let remove_bin = self.read().remove_bin.clone();
        let f = remove_bin.ok_or(CallbackError::BinHooksNotSet)?;

        tracing::debug!(bin = %bin, "Removing bin");
        f(bin);
        Ok(())
    }

    /// Snapshot of how many handlers each event kind holds
    pub fn handler_counts(&self) -> HandlerCounts {
        let handlers = self.read();
        HandlerCounts {
            error: handlers.on_error.is_some(),
            stop: handlers.on_stop.len(),
            track_subscribed: handlers.on_track_subscribed.len(),
            track_forward_rtp: handlers.on_track_forward_rtp.len(),
            track_added: handlers.on_track_added.len(),
            track_muted: handlers.on_track_muted.len(),
            track_unmuted: handlers.on_track_unmuted.len(),
            track_removed: handlers.on_track_removed.len(),
            eos_sent: handlers.on_eos_sent.is_some(),
            bin_hooks: handlers.add_bin.is_some() && handlers.remove_bin.is_some(),
        }
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("handlers", &self.handler_counts())
            .field("gst_ready", &self.gst_ready.is_fired())
            .field("build_ready", &self.build_ready.is_fired())
            .finish()
    }
}
