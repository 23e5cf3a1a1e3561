//! Structured telemetry records carried by datagram types 0, 1, 2, and 4.
//!
//! Each record arrives as a MessagePack map keyed by field name. The
//! [`decode_record`] entry point turns a datagram body into a [`TypedRecord`]
//! for a given [`RecordKind`], filling any missing field with its zero value.
//! [`encode_record`] performs the inverse for senders and loopback tooling.

mod decode;
mod encode;
mod error;
mod fields;

pub use decode::{MAX_RECORD_DEPTH, decode_record};
pub use encode::{encode_body, encode_record};
pub use error::{DecodeError, EncodeError};

/// Record kinds that share the MessagePack body encoding.
///
/// The discriminants match the datagram header byte. Header `3` is reserved
/// for waveform fragments and has no record kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordKind {
    /// Mixer state: faders, crossfader, active channel, application state.
    Control = 0,
    /// Per-deck playback telemetry.
    Deck = 1,
    /// Track metadata for a deck.
    Meta = 2,
    /// Named one-byte events.
    Event = 4,
}

impl RecordKind {
    /// Map a datagram header byte onto a record kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use clx_telemetry::record::RecordKind;
    ///
    /// assert_eq!(RecordKind::from_header(4), Some(RecordKind::Event));
    /// assert_eq!(RecordKind::from_header(3), None);
    /// ```
    #[must_use]
    pub const fn from_header(header: u8) -> Option<Self> {
        match header {
            0 => Some(Self::Control),
            1 => Some(Self::Deck),
            2 => Some(Self::Meta),
            4 => Some(Self::Event),
            _ => None,
        }
    }

    /// Header byte that introduces this record kind on the wire.
    #[must_use]
    pub const fn header(self) -> u8 { self as u8 }

    /// Lower-case label used in logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Deck => "deck",
            Self::Meta => "meta",
            Self::Event => "event",
        }
    }
}

/// Snapshot of the mixer's control surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlRecord {
    /// Level of channel A's upfader (`UpfaderA`).
    pub upfader_a: f64,
    /// Level of channel B's upfader (`UpfaderB`).
    pub upfader_b: f64,
    /// Crossfader position (`Crossfader`).
    pub crossfader: f64,
    /// Currently active channel (`Active`).
    pub active: i32,
    /// Application state label such as `"Production"` (`AppState`).
    pub app_state: String,
}

/// Playback telemetry for a single deck.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeckRecord {
    pub pitch: f64,
    pub position: f64,
    pub position2: f64,
    pub normalized_position: f64,
    pub bpm: f64,
    /// Track length (`Length`).
    pub length: f64,
    pub eq_low: f32,
    pub eq_mid: f32,
    pub eq_high: f32,
    /// Deck the telemetry belongs to, read from the `Deck` key.
    pub deck_index: i32,
    pub beat: i32,
}

/// Track metadata loaded on a deck.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetaRecord {
    pub deck: i32,
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// A named event with a single byte of payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventRecord {
    /// Event name (`Event`).
    pub name: String,
    pub value: u8,
}

/// A decoded record of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedRecord {
    Control(ControlRecord),
    Deck(DeckRecord),
    Meta(MetaRecord),
    Event(EventRecord),
}

impl TypedRecord {
    /// Kind of the wrapped record.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Control(_) => RecordKind::Control,
            Self::Deck(_) => RecordKind::Deck,
            Self::Meta(_) => RecordKind::Meta,
            Self::Event(_) => RecordKind::Event,
        }
    }
}

impl From<ControlRecord> for TypedRecord {
    fn from(record: ControlRecord) -> Self { Self::Control(record) }
}

impl From<DeckRecord> for TypedRecord {
    fn from(record: DeckRecord) -> Self { Self::Deck(record) }
}

impl From<MetaRecord> for TypedRecord {
    fn from(record: MetaRecord) -> Self { Self::Meta(record) }
}

impl From<EventRecord> for TypedRecord {
    fn from(record: EventRecord) -> Self { Self::Event(record) }
}
