use rmpv::Value;

use super::{
    ControlRecord,
    DeckRecord,
    DecodeError,
    EventRecord,
    MetaRecord,
    RecordKind,
    TypedRecord,
    fields::{FieldMap, value_type_name},
};

/// Deepest value nesting accepted in a record body.
///
/// Records are flat maps of scalars; anything deeper is rejected before it
/// can exhaust the receive task's stack.
pub const MAX_RECORD_DEPTH: usize = 8;

/// Decode a record body for the given `kind`.
///
/// The body must hold a single MessagePack map; bytes after it are ignored.
/// Every field is optional: a missing key, or a value of an incompatible
/// type, leaves that field at its zero value.
///
/// # Examples
///
/// ```
/// use clx_telemetry::record::{RecordKind, TypedRecord, decode_record};
///
/// // {"Event": "cue", "Value": 7}
/// let body = [
///     0x82, 0xa5, b'E', b'v', b'e', b'n', b't', 0xa3, b'c', b'u', b'e', 0xa5, b'V', b'a', b'l',
///     b'u', b'e', 0x07,
/// ];
/// let TypedRecord::Event(event) = decode_record(RecordKind::Event, &body).expect("decode") else {
///     panic!("expected an event record");
/// };
/// assert_eq!(event.name, "cue");
/// assert_eq!(event.value, 7);
/// ```
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] when the body is not valid MessagePack
/// or nests deeper than [`MAX_RECORD_DEPTH`], and [`DecodeError::NotAMap`]
/// when its root value is not a map.
pub fn decode_record(kind: RecordKind, body: &[u8]) -> Result<TypedRecord, DecodeError> {
    let mut cursor = body;
    let root = rmpv::decode::read_value_with_max_depth(&mut cursor, MAX_RECORD_DEPTH)?;
    let Value::Map(entries) = &root else {
        return Err(DecodeError::NotAMap {
            found: value_type_name(&root),
        });
    };
    let fields = FieldMap::new(entries);

    Ok(match kind {
        RecordKind::Control => control(&fields).into(),
        RecordKind::Deck => deck(&fields).into(),
        RecordKind::Meta => meta(&fields).into(),
        RecordKind::Event => event(&fields).into(),
    })
}

fn control(fields: &FieldMap<'_>) -> ControlRecord {
    ControlRecord {
        upfader_a: fields.f64("UpfaderA").unwrap_or(0.0),
        upfader_b: fields.f64("UpfaderB").unwrap_or(0.0),
        crossfader: fields.f64("Crossfader").unwrap_or(0.0),
        active: fields.i32("Active").unwrap_or(0),
        app_state: fields.string("AppState").unwrap_or_default(),
    }
}

fn deck(fields: &FieldMap<'_>) -> DeckRecord {
    DeckRecord {
        pitch: fields.f64("Pitch").unwrap_or(0.0),
        position: fields.f64("Position").unwrap_or(0.0),
        position2: fields.f64("Position2").unwrap_or(0.0),
        normalized_position: fields.f64("NormalizedPosition").unwrap_or(0.0),
        bpm: fields.f64("BPM").unwrap_or(0.0),
        length: fields.f64("Length").unwrap_or(0.0),
        eq_low: fields.f32("EQLow").unwrap_or(0.0),
        eq_mid: fields.f32("EQMid").unwrap_or(0.0),
        eq_high: fields.f32("EQHigh").unwrap_or(0.0),
        deck_index: fields.i32("Deck").unwrap_or(0),
        beat: fields.i32("Beat").unwrap_or(0),
    }
}

fn meta(fields: &FieldMap<'_>) -> MetaRecord {
    MetaRecord {
        deck: fields.i32("Deck").unwrap_or(0),
        title: fields.string("Title").unwrap_or_default(),
        artist: fields.string("Artist").unwrap_or_default(),
        album: fields.string("Album").unwrap_or_default(),
    }
}

fn event(fields: &FieldMap<'_>) -> EventRecord {
    EventRecord {
        name: fields.string("Event").unwrap_or_default(),
        value: fields.u8("Value").unwrap_or(0),
    }
}
