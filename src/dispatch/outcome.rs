//! What happened to a single ingested datagram.

use std::fmt;

use crate::{fragment::ContentHash, record::RecordKind};

/// Reason a datagram was discarded without effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// The datagram had no bytes at all.
    Empty,
    /// A record body was not a parseable MessagePack map.
    MalformedRecord,
    /// A waveform body was shorter than the fragment header.
    ShortFragment,
    /// A waveform hash contained non-ASCII bytes.
    InvalidHash,
    /// The last control record put the mixer in the production state.
    ProductionGate,
    /// The header byte is not a known datagram type.
    UnknownType,
}

impl DropReason {
    /// Label used in metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::MalformedRecord => "malformed_record",
            Self::ShortFragment => "short_fragment",
            Self::InvalidHash => "invalid_hash",
            Self::ProductionGate => "production_gate",
            Self::UnknownType => "unknown_type",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Result of [`Dispatcher::ingest`](super::Dispatcher::ingest).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A record of this kind was decoded and its hook ran.
    Record(RecordKind),
    /// A waveform fragment was stored; its blob is still incomplete.
    FragmentStored,
    /// A waveform fragment repeated an order index already stored.
    FragmentDuplicate,
    /// A waveform fragment completed its blob and the waveform hook ran.
    WaveformCompleted { hash: ContentHash, len: usize },
    /// The datagram was discarded.
    Dropped(DropReason),
}

impl IngestOutcome {
    /// Whether the datagram was discarded.
    #[must_use]
    pub const fn is_dropped(&self) -> bool { matches!(self, Self::Dropped(_)) }
}
