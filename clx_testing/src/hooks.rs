//! Hooks that record every notification for later assertions.

use clx_telemetry::{
    CompletedBlob,
    ControlRecord,
    DeckRecord,
    EventRecord,
    IntakeHooks,
    MetaRecord,
};

/// [`IntakeHooks`] implementation storing everything it is told.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub controls: Vec<ControlRecord>,
    pub decks: Vec<DeckRecord>,
    pub metas: Vec<MetaRecord>,
    pub events: Vec<EventRecord>,
    pub waveforms: Vec<CompletedBlob>,
    pub new_sources: Vec<String>,
}

impl IntakeHooks for RecordingHooks {
    fn on_control(&mut self, control: &ControlRecord) { self.controls.push(control.clone()); }

    fn on_deck(&mut self, deck: &DeckRecord) { self.decks.push(deck.clone()); }

    fn on_meta(&mut self, meta: &MetaRecord) { self.metas.push(meta.clone()); }

    fn on_event(&mut self, event: &EventRecord) { self.events.push(event.clone()); }

    fn on_waveform(&mut self, blob: CompletedBlob) { self.waveforms.push(blob); }

    fn on_new_source(&mut self, sender: &str) { self.new_sources.push(sender.to_owned()); }
}
