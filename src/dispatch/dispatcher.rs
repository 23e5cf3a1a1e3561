//! Single-threaded datagram dispatcher.
//!
//! The dispatcher owns all intake state: the last control snapshot, the
//! waveform fragment store, and the source registry. Every mutation happens
//! through `&mut self`, so concurrent receive paths must either funnel
//! datagrams to one task or wrap the dispatcher in a single lock.

use std::{
    net::IpAddr,
    time::{Duration, Instant},
};

use bytes::Bytes;
use log::{info, trace, warn};

use super::{DatagramKind, DropReason, IngestOutcome};
use crate::{
    config::{DEFAULT_PRODUCTION_STATE, IntakeConfig},
    fragment::{FragmentOutcome, FragmentStore, WaveformHeader, WaveformHeaderError},
    hooks::{IntakeCallbacks, IntakeHooks},
    metrics,
    record::{ControlRecord, RecordKind, TypedRecord, decode_record},
    sources::SourceRegistry,
};

/// Routes datagrams to the record decoder or the fragment store and notifies
/// the host through its [`IntakeHooks`].
#[derive(Debug)]
pub struct Dispatcher<H = IntakeCallbacks> {
    hooks: H,
    last_control: ControlRecord,
    store: FragmentStore,
    sources: SourceRegistry,
    production_state: String,
    pending_ttl: Option<Duration>,
}

impl<H: IntakeHooks> Dispatcher<H> {
    /// Create a dispatcher gating waveforms on the `"Production"` app-state
    /// and keeping incomplete waveforms indefinitely.
    #[must_use]
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            last_control: ControlRecord::default(),
            store: FragmentStore::new(),
            sources: SourceRegistry::new(),
            production_state: DEFAULT_PRODUCTION_STATE.to_owned(),
            pending_ttl: None,
        }
    }

    /// Create a dispatcher using the gating label and pending-waveform age
    /// bound from `config`.
    #[must_use]
    pub fn from_config(config: &IntakeConfig, hooks: H) -> Self {
        Self {
            production_state: config.production_state.clone(),
            pending_ttl: config.pending_ttl,
            ..Self::new(hooks)
        }
    }

    /// Process one datagram from `sender`.
    ///
    /// Never fails: undecodable datagrams are logged, counted, and reported
    /// as [`IngestOutcome::Dropped`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    ///
    /// use clx_telemetry::{
    ///     dispatch::{Dispatcher, DropReason, IngestOutcome},
    ///     hooks::IntakeCallbacks,
    /// };
    ///
    /// let mut dispatcher = Dispatcher::new(IntakeCallbacks::default());
    /// let sender = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 7));
    ///
    /// let outcome = dispatcher.ingest(&[42, 1, 2, 3], sender);
    /// assert_eq!(outcome, IngestOutcome::Dropped(DropReason::UnknownType));
    /// assert!(dispatcher.sources().contains("192.168.0.7"));
    /// ```
    pub fn ingest(&mut self, raw: &[u8], sender: IpAddr) -> IngestOutcome {
        self.ingest_at(raw, sender, Instant::now())
    }

    /// Process one datagram using an explicit clock reading.
    ///
    /// The clock stamps new waveform entries and drives the optional
    /// pending-waveform age bound.
    pub fn ingest_at(&mut self, raw: &[u8], sender: IpAddr, now: Instant) -> IngestOutcome {
        let Some((&header, body)) = raw.split_first() else {
            return Self::dropped(DropReason::Empty);
        };
        self.record_sender(sender);

        let kind = DatagramKind::from_header(header);
        metrics::inc_datagrams(kind.as_str());
        match kind {
            DatagramKind::Record(kind) => self.handle_record(kind, body),
            DatagramKind::WaveformFragment => self.handle_fragment(body, now),
            DatagramKind::Unknown(_) => Self::dropped(DropReason::UnknownType),
        }
    }

    fn record_sender(&mut self, sender: IpAddr) {
        let sender = sender.to_string();
        if self.sources.record(&sender) {
            info!("discovered source: sender={sender}");
            self.hooks.on_new_source(&sender);
        }
    }

    fn handle_record(&mut self, kind: RecordKind, body: &[u8]) -> IngestOutcome {
        let record = match decode_record(kind, body) {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "dropping {} record: body_len={}, error={err}",
                    kind.as_str(),
                    body.len()
                );
                return Self::dropped(DropReason::MalformedRecord);
            }
        };

        match record {
            TypedRecord::Control(control) => {
                self.last_control = control;
                self.hooks.on_control(&self.last_control);
            }
            TypedRecord::Deck(deck) => self.hooks.on_deck(&deck),
            TypedRecord::Meta(meta) => self.hooks.on_meta(&meta),
            TypedRecord::Event(event) => self.hooks.on_event(&event),
        }
        IngestOutcome::Record(kind)
    }

    fn handle_fragment(&mut self, body: &[u8], now: Instant) -> IngestOutcome {
        if self.last_control.app_state == self.production_state {
            trace!(
                "skipping waveform fragment: app_state={}",
                self.last_control.app_state
            );
            return Self::dropped(DropReason::ProductionGate);
        }

        let (header, payload) = match WaveformHeader::split(body) {
            Ok(parts) => parts,
            Err(err @ WaveformHeaderError::Short { .. }) => {
                warn!("dropping waveform fragment: {err}");
                return Self::dropped(DropReason::ShortFragment);
            }
            Err(err) => {
                warn!("dropping waveform fragment: {err}");
                return Self::dropped(DropReason::InvalidHash);
            }
        };

        if let Some(ttl) = self.pending_ttl {
            for hash in self.store.purge_expired_at(now, ttl) {
                warn!("discarding incomplete waveform: hash={hash}, ttl={ttl:?}");
            }
        }

        let (hash, total, order) = header.into_parts();
        let outcome =
            match self
                .store
                .accept_at(hash, total, order, Bytes::copy_from_slice(payload), now)
            {
                FragmentOutcome::Incomplete => IngestOutcome::FragmentStored,
                FragmentOutcome::Duplicate => IngestOutcome::FragmentDuplicate,
                FragmentOutcome::Completed(blob) => {
                    let hash = blob.hash().clone();
                    let len = blob.payload().len();
                    info!("waveform complete: hash={hash}, bytes={len}");
                    metrics::inc_waveforms();
                    self.hooks.on_waveform(blob);
                    IngestOutcome::WaveformCompleted { hash, len }
                }
            };
        metrics::set_pending(self.store.pending_len());
        outcome
    }

    fn dropped(reason: DropReason) -> IngestOutcome {
        metrics::inc_dropped(reason);
        IngestOutcome::Dropped(reason)
    }

    /// Most recent control record, or the all-default record before any
    /// control datagram arrived.
    #[must_use]
    pub const fn last_control(&self) -> &ControlRecord { &self.last_control }

    /// Replace the control snapshot that gates waveform fragments.
    pub fn set_last_control(&mut self, control: ControlRecord) { self.last_control = control; }

    /// App-state label under which waveform fragments are dropped.
    #[must_use]
    pub fn production_state(&self) -> &str { &self.production_state }

    /// Pending waveform fragments.
    #[must_use]
    pub const fn fragments(&self) -> &FragmentStore { &self.store }

    /// Senders seen so far.
    #[must_use]
    pub const fn sources(&self) -> &SourceRegistry { &self.sources }

    /// Mutable access to the sender registry, for clearing its change flag.
    pub fn sources_mut(&mut self) -> &mut SourceRegistry { &mut self.sources }

    #[must_use]
    pub const fn hooks(&self) -> &H { &self.hooks }

    pub fn hooks_mut(&mut self) -> &mut H { &mut self.hooks }

    /// Consume the dispatcher, returning its hooks.
    #[must_use]
    pub fn into_hooks(self) -> H { self.hooks }
}
