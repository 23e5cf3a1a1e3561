#![doc(html_root_url = "https://docs.rs/clx-telemetry/latest")]
//! Receiver for CLX mixer telemetry.
//!
//! The CLX plugin broadcasts UDP datagrams whose first byte selects their
//! meaning: MessagePack records describing the mixer (control, deck, meta,
//! event) or fragments of content-addressed waveform blobs. This crate
//! decodes the records, reassembles the waveforms, and keeps track of which
//! hosts are sending.
//!
//! The [`Dispatcher`] is the synchronous core and can be fed from any
//! datagram source; [`UdpIntake`] drives it from a tokio UDP socket.

pub mod byte_order;
pub mod config;
pub mod dispatch;
pub mod fragment;
pub mod hooks;
pub mod metrics;
pub mod record;
pub mod sink;
pub mod sources;
pub mod transport;

pub use config::IntakeConfig;
pub use dispatch::{DatagramKind, Dispatcher, DropReason, IngestOutcome};
pub use fragment::{
    CompletedBlob,
    ContentHash,
    FragmentOrder,
    FragmentOutcome,
    FragmentStore,
    WaveformFragmenter,
    WaveformHeader,
};
pub use hooks::{IntakeCallbacks, IntakeHooks};
pub use record::{
    ControlRecord,
    DecodeError,
    DeckRecord,
    EventRecord,
    MetaRecord,
    RecordKind,
    TypedRecord,
    decode_record,
    encode_record,
};
pub use sink::{FileCacheSink, SinkError, WaveformSink};
pub use sources::SourceRegistry;
pub use transport::{TransportError, UdpIntake};
