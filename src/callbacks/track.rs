//! Event payload types
//!
//! Lightweight descriptors for the transport and pipeline objects carried by
//! lifecycle events. The registry never inspects them; it only hands them to
//! subscribers.

use bytes::Bytes;

/// Media kind of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// Audio track
    Audio,
    /// Video track
    Video,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::Audio => write!(f, "audio"),
            TrackKind::Video => write!(f, "video"),
        }
    }
}

/// Handle to a remote track delivered by the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    /// Track ID
    pub id: String,
    /// Audio or video
    pub kind: TrackKind,
    /// Codec mime type (e.g., "video/H264")
    pub mime_type: String,
    /// RTP synchronization source
    pub ssrc: u32,
}

impl RemoteTrack {
    /// Create a new remote track handle
    pub fn new(
        id: impl Into<String>,
        kind: TrackKind,
        mime_type: impl Into<String>,
        ssrc: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            mime_type: mime_type.into(),
            ssrc,
        }
    }
}

/// Publication metadata for a remote track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPublication {
    /// Publication SID
    pub sid: String,
    /// Track name as published
    pub name: String,
    /// Audio or video
    pub kind: TrackKind,
    /// Whether the publisher has muted the track
    pub muted: bool,
}

/// Participant that owns a remote track
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteParticipant {
    /// Participant identity
    pub identity: String,
    /// Participant SID
    pub sid: String,
}

impl RemoteParticipant {
    /// Create a new participant
    pub fn new(identity: impl Into<String>, sid: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            sid: sid.into(),
        }
    }
}

/// RTP packet ready for forwarding
///
/// Cheap to clone: the payload is reference counted, so fanning a packet out
/// to several forwarders never copies media.
#[derive(Debug, Clone)]
pub struct RtpPacket {
    /// RTP payload type
    pub payload_type: u8,
    /// Sequence number
    pub sequence_number: u16,
    /// RTP timestamp
    pub timestamp: u32,
    /// Synchronization source
    pub ssrc: u32,
    /// Marker bit
    pub marker: bool,
    /// Packet payload
    pub payload: Bytes,
}

impl RtpPacket {
    /// Create a packet with the marker bit cleared
    pub fn new(payload_type: u8, sequence_number: u16, timestamp: u32, ssrc: u32, payload: Bytes) -> Self {
        Self {
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
            marker: false,
            payload,
        }
    }

    /// Set the marker bit
    pub fn with_marker(mut self, marker: bool) -> Self {
        self.marker = marker;
        self
    }
}

/// Structured source descriptor for a track joining the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSource {
    /// Track ID
    pub track_id: String,
    /// Audio or video
    pub kind: TrackKind,
    /// Codec mime type
    pub mime_type: String,
    /// The remote track this source reads from
    pub track: RemoteTrack,
}

impl TrackSource {
    /// Build a source descriptor from a subscribed remote track
    pub fn from_track(track: RemoteTrack) -> Self {
        Self {
            track_id: track.id.clone(),
            kind: track.kind,
            mime_type: track.mime_type.clone(),
            track,
        }
    }
}

/// Named processing unit handed to the pipeline owner's bin hooks
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bin {
    /// Bin name, unique within the pipeline
    pub name: String,
}

impl Bin {
    /// Create a new bin handle
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl std::fmt::Display for Bin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
