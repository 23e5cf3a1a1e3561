//! Outbound encoding of records as MessagePack maps.
//!
//! Every field is written, using the same key names the decoder reads.

use rmpv::Value;

use super::{ControlRecord, DeckRecord, EncodeError, EventRecord, MetaRecord, TypedRecord};

/// Encode `record` as a complete datagram: header byte followed by the body.
///
/// # Errors
///
/// Returns [`EncodeError::Write`] if the MessagePack writer fails.
pub fn encode_record(record: &TypedRecord) -> Result<Vec<u8>, EncodeError> {
    let mut datagram = vec![record.kind().header()];
    rmpv::encode::write_value(&mut datagram, &to_value(record))?;
    Ok(datagram)
}

/// Encode only the MessagePack body of `record`, without a header byte.
///
/// # Errors
///
/// Returns [`EncodeError::Write`] if the MessagePack writer fails.
pub fn encode_body(record: &TypedRecord) -> Result<Vec<u8>, EncodeError> {
    let mut body = Vec::new();
    rmpv::encode::write_value(&mut body, &to_value(record))?;
    Ok(body)
}

fn to_value(record: &TypedRecord) -> Value {
    let entries = match record {
        TypedRecord::Control(control) => control_entries(control),
        TypedRecord::Deck(deck) => deck_entries(deck),
        TypedRecord::Meta(meta) => meta_entries(meta),
        TypedRecord::Event(event) => event_entries(event),
    };
    Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect(),
    )
}

fn control_entries(control: &ControlRecord) -> Vec<(&'static str, Value)> {
    vec![
        ("UpfaderA", Value::F64(control.upfader_a)),
        ("UpfaderB", Value::F64(control.upfader_b)),
        ("Crossfader", Value::F64(control.crossfader)),
        ("Active", Value::from(control.active)),
        ("AppState", Value::from(control.app_state.as_str())),
    ]
}

fn deck_entries(deck: &DeckRecord) -> Vec<(&'static str, Value)> {
    vec![
        ("Pitch", Value::F64(deck.pitch)),
        ("Position", Value::F64(deck.position)),
        ("Position2", Value::F64(deck.position2)),
        ("NormalizedPosition", Value::F64(deck.normalized_position)),
        ("BPM", Value::F64(deck.bpm)),
        ("Length", Value::F64(deck.length)),
        ("EQLow", Value::F32(deck.eq_low)),
        ("EQMid", Value::F32(deck.eq_mid)),
        ("EQHigh", Value::F32(deck.eq_high)),
        ("Deck", Value::from(deck.deck_index)),
        ("Beat", Value::from(deck.beat)),
    ]
}

fn meta_entries(meta: &MetaRecord) -> Vec<(&'static str, Value)> {
    vec![
        ("Deck", Value::from(meta.deck)),
        ("Title", Value::from(meta.title.as_str())),
        ("Artist", Value::from(meta.artist.as_str())),
        ("Album", Value::from(meta.album.as_str())),
    ]
}

fn event_entries(event: &EventRecord) -> Vec<(&'static str, Value)> {
    vec![
        ("Event", Value::from(event.name.as_str())),
        ("Value", Value::from(event.value)),
    ]
}
