//! Big-endian field access for the waveform fragment header.
//!
//! The header packs its integers in network byte order. These helpers read
//! them from a slice without panicking on short input and keep the Clippy
//! expectation for big-endian conversions in one place.

/// Copy the first `N` bytes of `bytes` into an array.
///
/// Returns `None` if `bytes` is shorter than `N`.
#[must_use]
pub fn take_array<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.get(..N).and_then(|head| head.try_into().ok())
}

/// Read a big-endian `u32` from the start of `bytes`.
///
/// # Examples
///
/// ```
/// use clx_telemetry::byte_order::read_be_u32;
///
/// assert_eq!(read_be_u32(&[0x00, 0x00, 0x01, 0x02, 0xff]), Some(0x0102));
/// assert_eq!(read_be_u32(&[0x01]), None);
/// ```
#[must_use]
pub fn read_be_u32(bytes: &[u8]) -> Option<u32> {
    let field = take_array(bytes)?;
    #[expect(
        clippy::big_endian_bytes,
        reason = "Fragment order indices are transmitted big-endian."
    )]
    Some(u32::from_be_bytes(field))
}

/// Read a big-endian `u64` from the start of `bytes`.
///
/// # Examples
///
/// ```
/// use clx_telemetry::byte_order::read_be_u64;
///
/// assert_eq!(read_be_u64(&[0, 0, 0, 0, 0, 0, 0, 10]), Some(10));
/// ```
#[must_use]
pub fn read_be_u64(bytes: &[u8]) -> Option<u64> {
    let field = take_array(bytes)?;
    #[expect(
        clippy::big_endian_bytes,
        reason = "Waveform totals are transmitted big-endian."
    )]
    Some(u64::from_be_bytes(field))
}

/// Big-endian encoding of a `u32` order index.
#[must_use]
pub fn write_be_u32(value: u32) -> [u8; 4] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Fragment order indices are transmitted big-endian."
    )]
    value.to_be_bytes()
}

/// Big-endian encoding of a `u64` byte total.
#[must_use]
pub fn write_be_u64(value: u64) -> [u8; 8] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "Waveform totals are transmitted big-endian."
    )]
    value.to_be_bytes()
}
