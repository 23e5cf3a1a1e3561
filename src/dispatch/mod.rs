//! Datagram routing.
//!
//! [`Dispatcher`] inspects the leading type byte of every datagram, records
//! the sender, and routes the body to the record decoder or the waveform
//! [`FragmentStore`](crate::fragment::FragmentStore). Results surface through
//! [`IntakeHooks`](crate::hooks::IntakeHooks) and the returned
//! [`IngestOutcome`].

mod dispatcher;
mod outcome;

pub use dispatcher::Dispatcher;
pub use outcome::{DropReason, IngestOutcome};

use crate::record::RecordKind;

/// Header byte of a waveform fragment datagram.
pub const WAVEFORM_FRAGMENT_HEADER: u8 = 3;

/// Semantic type selected by a datagram's first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatagramKind {
    /// A MessagePack-encoded record.
    Record(RecordKind),
    /// A slice of a waveform blob.
    WaveformFragment,
    /// A header this intake does not understand.
    Unknown(u8),
}

impl DatagramKind {
    /// Classify a header byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use clx_telemetry::{dispatch::DatagramKind, record::RecordKind};
    ///
    /// assert_eq!(DatagramKind::from_header(1), DatagramKind::Record(RecordKind::Deck));
    /// assert_eq!(DatagramKind::from_header(3), DatagramKind::WaveformFragment);
    /// assert_eq!(DatagramKind::from_header(9), DatagramKind::Unknown(9));
    /// ```
    #[must_use]
    pub const fn from_header(header: u8) -> Self {
        if header == WAVEFORM_FRAGMENT_HEADER {
            return Self::WaveformFragment;
        }
        match RecordKind::from_header(header) {
            Some(kind) => Self::Record(kind),
            None => Self::Unknown(header),
        }
    }

    /// Lower-case label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Record(kind) => kind.as_str(),
            Self::WaveformFragment => "waveform",
            Self::Unknown(_) => "unknown",
        }
    }
}
