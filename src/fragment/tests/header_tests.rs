//! Tests for parsing and writing the waveform fragment header.

use bytes::BytesMut;
use rstest::rstest;

use super::hash;
use crate::fragment::{
    ContentHash,
    FragmentOrder,
    WAVEFORM_HEADER_LEN,
    WaveformHeader,
    WaveformHeaderError,
};

fn body(hash: &[u8], total: u64, order: u32, payload: &[u8]) -> Vec<u8> {
    let mut body = hash.to_vec();
    body.extend_from_slice(&total.to_be_bytes());
    body.extend_from_slice(&order.to_be_bytes());
    body.extend_from_slice(payload);
    body
}

#[test]
fn header_length_is_hash_total_and_order() {
    assert_eq!(WAVEFORM_HEADER_LEN, 44);
}

#[test]
fn split_reads_big_endian_fields() {
    let hash_bytes = [b'f'; 32];
    let raw = body(&hash_bytes, 0x0102_0304_0506_0708, 0x0a0b_0c0d, b"payload");

    let (header, payload) = WaveformHeader::split(&raw).expect("valid body");

    assert_eq!(header.hash(), &hash('f'));
    assert_eq!(header.total(), 0x0102_0304_0506_0708);
    assert_eq!(header.order(), FragmentOrder::new(0x0a0b_0c0d));
    assert_eq!(payload, b"payload");
}

#[test]
fn header_without_payload_is_accepted() {
    let raw = body(&[b'e'; 32], 0, 0, &[]);
    let (_, payload) = WaveformHeader::split(&raw).expect("header-only body");
    assert!(payload.is_empty());
}

#[rstest]
#[case(0)]
#[case(32)]
#[case(43)]
fn bodies_shorter_than_header_are_rejected(#[case] len: usize) {
    let raw = vec![b'a'; len];
    assert_eq!(
        WaveformHeader::split(&raw),
        Err(WaveformHeaderError::Short { len })
    );
}

#[test]
fn non_ascii_hash_is_rejected() {
    let mut hash_bytes = [b'a'; 32];
    hash_bytes[7] = 0xe9;
    let raw = body(&hash_bytes, 1, 0, b"x");

    assert_eq!(
        WaveformHeader::split(&raw),
        Err(WaveformHeaderError::NonAsciiHash)
    );
}

#[test]
fn write_to_produces_parseable_bytes() {
    let header = WaveformHeader::new(hash('9'), 1_234, FragmentOrder::new(56));
    let mut buf = BytesMut::new();
    header.write_to(&mut buf);

    assert_eq!(buf.len(), WAVEFORM_HEADER_LEN);
    let (parsed, payload) = WaveformHeader::split(&buf).expect("round trip");
    assert_eq!(parsed, header);
    assert!(payload.is_empty());
}

#[rstest]
#[case::too_short("abc", WaveformHeaderError::HashLength { len: 3 })]
#[case::too_long(
    "0123456789abcdef0123456789abcdef0",
    WaveformHeaderError::HashLength { len: 33 }
)]
#[case::non_ascii("ééééééééééééééää", WaveformHeaderError::NonAsciiHash)]
fn parse_validates_hash_text(#[case] text: &str, #[case] expected: WaveformHeaderError) {
    assert_eq!(ContentHash::parse(text), Err(expected));
}
