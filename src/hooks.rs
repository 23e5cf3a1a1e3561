//! Notification hooks invoked by the [`Dispatcher`](crate::dispatch::Dispatcher).
//!
//! [`IntakeHooks`] is the trait hosts implement to receive decoded records
//! and completed waveforms. [`IntakeCallbacks`] stores optional closures for
//! hosts that prefer wiring callbacks one at a time.
//!
//! Hooks run synchronously on the thread that called
//! [`Dispatcher::ingest`](crate::dispatch::Dispatcher::ingest). Hosts that
//! need the notifications elsewhere forward them through their own channel.

use crate::{
    fragment::CompletedBlob,
    record::{ControlRecord, DeckRecord, EventRecord, MetaRecord},
};

/// Receiver of dispatcher notifications.
///
/// Every method defaults to doing nothing, so implementations override only
/// the notifications they care about.
///
/// ```
/// use clx_telemetry::{hooks::IntakeHooks, record::DeckRecord};
///
/// struct BpmLogger;
///
/// impl IntakeHooks for BpmLogger {
///     fn on_deck(&mut self, deck: &DeckRecord) {
///         println!("deck {} at {} bpm", deck.deck_index, deck.bpm);
///     }
/// }
/// ```
pub trait IntakeHooks {
    /// Called for each decoded control record, after it became the
    /// dispatcher's last control snapshot.
    fn on_control(&mut self, _control: &ControlRecord) {}

    /// Called for each decoded deck record.
    fn on_deck(&mut self, _deck: &DeckRecord) {}

    /// Called for each decoded meta record.
    fn on_meta(&mut self, _meta: &MetaRecord) {}

    /// Called for each decoded event record.
    fn on_event(&mut self, _event: &EventRecord) {}

    /// Called once per waveform blob when its last fragment arrives.
    ///
    /// The blob is handed over by value; persisting it is the host's job.
    fn on_waveform(&mut self, _blob: CompletedBlob) {}

    /// Called the first time a sender address is seen.
    fn on_new_source(&mut self, _sender: &str) {}
}

impl IntakeHooks for () {}

impl<H: IntakeHooks + ?Sized> IntakeHooks for Box<H> {
    fn on_control(&mut self, control: &ControlRecord) { (**self).on_control(control); }

    fn on_deck(&mut self, deck: &DeckRecord) { (**self).on_deck(deck); }

    fn on_meta(&mut self, meta: &MetaRecord) { (**self).on_meta(meta); }

    fn on_event(&mut self, event: &EventRecord) { (**self).on_event(event); }

    fn on_waveform(&mut self, blob: CompletedBlob) { (**self).on_waveform(blob); }

    fn on_new_source(&mut self, sender: &str) { (**self).on_new_source(sender); }
}

/// Type alias for a record callback.
type RecordHook<R> = Box<dyn FnMut(&R) + Send + 'static>;

/// Type alias for the waveform completion callback.
type WaveformHook = Box<dyn FnMut(CompletedBlob) + Send + 'static>;

/// Type alias for the new-source callback.
type SourceHook = Box<dyn FnMut(&str) + Send + 'static>;

/// Closure-based [`IntakeHooks`] implementation.
///
/// ```
/// use std::sync::{
///     Arc,
///     atomic::{AtomicUsize, Ordering},
/// };
///
/// use clx_telemetry::hooks::IntakeCallbacks;
///
/// let seen = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&seen);
/// let callbacks = IntakeCallbacks::default().with_event(move |_event| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
/// # drop(callbacks);
/// ```
#[derive(Default)]
pub struct IntakeCallbacks {
    control: Option<RecordHook<ControlRecord>>,
    deck: Option<RecordHook<DeckRecord>>,
    meta: Option<RecordHook<MetaRecord>>,
    event: Option<RecordHook<EventRecord>>,
    waveform: Option<WaveformHook>,
    new_source: Option<SourceHook>,
}

impl IntakeCallbacks {
    /// Register the control-record callback.
    #[must_use]
    pub fn with_control(mut self, hook: impl FnMut(&ControlRecord) + Send + 'static) -> Self {
        self.control = Some(Box::new(hook));
        self
    }

    /// Register the deck-record callback.
    #[must_use]
    pub fn with_deck(mut self, hook: impl FnMut(&DeckRecord) + Send + 'static) -> Self {
        self.deck = Some(Box::new(hook));
        self
    }

    /// Register the meta-record callback.
    #[must_use]
    pub fn with_meta(mut self, hook: impl FnMut(&MetaRecord) + Send + 'static) -> Self {
        self.meta = Some(Box::new(hook));
        self
    }

    /// Register the event-record callback.
    #[must_use]
    pub fn with_event(mut self, hook: impl FnMut(&EventRecord) + Send + 'static) -> Self {
        self.event = Some(Box::new(hook));
        self
    }

    /// Register the waveform completion callback.
    #[must_use]
    pub fn with_waveform(mut self, hook: impl FnMut(CompletedBlob) + Send + 'static) -> Self {
        self.waveform = Some(Box::new(hook));
        self
    }

    /// Register the new-source callback.
    #[must_use]
    pub fn with_new_source(mut self, hook: impl FnMut(&str) + Send + 'static) -> Self {
        self.new_source = Some(Box::new(hook));
        self
    }
}

impl IntakeHooks for IntakeCallbacks {
    fn on_control(&mut self, control: &ControlRecord) {
        if let Some(hook) = &mut self.control {
            hook(control);
        }
    }

    fn on_deck(&mut self, deck: &DeckRecord) {
        if let Some(hook) = &mut self.deck {
            hook(deck);
        }
    }

    fn on_meta(&mut self, meta: &MetaRecord) {
        if let Some(hook) = &mut self.meta {
            hook(meta);
        }
    }

    fn on_event(&mut self, event: &EventRecord) {
        if let Some(hook) = &mut self.event {
            hook(event);
        }
    }

    fn on_waveform(&mut self, blob: CompletedBlob) {
        if let Some(hook) = &mut self.waveform {
            hook(blob);
        }
    }

    fn on_new_source(&mut self, sender: &str) {
        if let Some(hook) = &mut self.new_source {
            hook(sender);
        }
    }
}

impl std::fmt::Debug for IntakeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeCallbacks")
            .field("control", &self.control.is_some())
            .field("deck", &self.deck.is_some())
            .field("meta", &self.meta.is_some())
            .field("event", &self.event.is_some())
            .field("waveform", &self.waveform.is_some())
            .field("new_source", &self.new_source.is_some())
            .finish()
    }
}
