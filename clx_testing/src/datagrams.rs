//! Builders for raw intake datagrams.

use std::net::{IpAddr, Ipv4Addr};

use clx_telemetry::{
    dispatch::WAVEFORM_FRAGMENT_HEADER,
    record::{ControlRecord, RecordKind, TypedRecord, encode_record},
};
use rmpv::Value;

/// Loopback-style sender address `10.0.0.<last>`.
#[must_use]
pub fn sender(last: u8) -> IpAddr { IpAddr::V4(Ipv4Addr::new(10, 0, 0, last)) }

/// Encode a record datagram from arbitrary map entries.
///
/// Unlike [`encode_record`] this accepts any keys and value types, so tests
/// can send fields the sender would never produce.
///
/// # Panics
///
/// Panics if the map cannot be encoded, which only happens on allocation
/// failure.
#[must_use]
pub fn record_datagram(kind: RecordKind, entries: Vec<(&str, Value)>) -> Vec<u8> {
    let map = Value::Map(
        entries
            .into_iter()
            .map(|(key, value)| (Value::from(key), value))
            .collect(),
    );
    let mut datagram = vec![kind.header()];
    rmpv::encode::write_value(&mut datagram, &map).expect("encode map into a Vec");
    datagram
}

/// Encode a typed record exactly as a sender would.
///
/// # Panics
///
/// Panics if the record cannot be encoded.
#[must_use]
pub fn typed_datagram(record: impl Into<TypedRecord>) -> Vec<u8> {
    encode_record(&record.into()).expect("encode record into a Vec")
}

/// Control datagram carrying only an app-state.
#[must_use]
pub fn control_datagram(app_state: &str) -> Vec<u8> {
    typed_datagram(ControlRecord {
        app_state: app_state.to_owned(),
        ..ControlRecord::default()
    })
}

/// Waveform fragment datagram with a raw hash, which need not be valid.
#[must_use]
pub fn fragment_datagram(hash: &[u8], total: u64, order: u32, payload: &[u8]) -> Vec<u8> {
    let mut datagram = vec![WAVEFORM_FRAGMENT_HEADER];
    datagram.extend_from_slice(hash);
    datagram.extend_from_slice(&total.to_be_bytes());
    datagram.extend_from_slice(&order.to_be_bytes());
    datagram.extend_from_slice(payload);
    datagram
}
