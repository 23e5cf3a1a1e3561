use bytes::BufMut;

use super::{CONTENT_HASH_LEN, ContentHash, FragmentOrder, WaveformHeaderError};
use crate::byte_order::{read_be_u32, read_be_u64, take_array, write_be_u32, write_be_u64};

/// Bytes preceding the payload in a waveform fragment body: hash, total, order.
pub const WAVEFORM_HEADER_LEN: usize = CONTENT_HASH_LEN + 8 + 4;

const TOTAL_OFFSET: usize = CONTENT_HASH_LEN;
const ORDER_OFFSET: usize = TOTAL_OFFSET + 8;

/// Fixed header that precedes each waveform fragment payload.
///
/// The layout within the datagram body (after the type byte) is:
///
/// ```text
/// 0..32   content hash, ASCII
/// 32..40  total blob length, big-endian u64
/// 40..44  fragment order, big-endian u32
/// 44..    fragment payload
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveformHeader {
    hash: ContentHash,
    total: u64,
    order: FragmentOrder,
}

impl WaveformHeader {
    #[must_use]
    pub const fn new(hash: ContentHash, total: u64, order: FragmentOrder) -> Self {
        Self { hash, total, order }
    }

    /// Split a waveform body into its header and the fragment payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use clx_telemetry::fragment::WaveformHeader;
    ///
    /// let mut body = b"abcdefghijklmnopqrstuvwxyz012345".to_vec();
    /// body.extend_from_slice(&10u64.to_be_bytes());
    /// body.extend_from_slice(&1u32.to_be_bytes());
    /// body.extend_from_slice(b"World");
    ///
    /// let (header, payload) = WaveformHeader::split(&body).expect("valid body");
    /// assert_eq!(header.total(), 10);
    /// assert_eq!(header.order().get(), 1);
    /// assert_eq!(payload, b"World");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`WaveformHeaderError::Short`] if `body` is shorter than
    /// [`WAVEFORM_HEADER_LEN`] and [`WaveformHeaderError::NonAsciiHash`] if
    /// the hash bytes are not ASCII.
    pub fn split(body: &[u8]) -> Result<(Self, &[u8]), WaveformHeaderError> {
        let short = || WaveformHeaderError::Short { len: body.len() };
        let (head, payload) = body.split_at_checked(WAVEFORM_HEADER_LEN).ok_or_else(short)?;

        let hash = take_array::<CONTENT_HASH_LEN>(head).ok_or_else(short)?;
        let total = read_be_u64(&head[TOTAL_OFFSET..]).ok_or_else(short)?;
        let order = read_be_u32(&head[ORDER_OFFSET..]).ok_or_else(short)?;

        Ok((
            Self {
                hash: ContentHash::from_wire(hash)?,
                total,
                order: FragmentOrder::new(order),
            },
            payload,
        ))
    }

    /// Append the encoded header to `dst`.
    pub fn write_to(&self, dst: &mut impl BufMut) {
        dst.put_slice(self.hash.as_bytes());
        dst.put_slice(&write_be_u64(self.total));
        dst.put_slice(&write_be_u32(self.order.get()));
    }

    /// Content hash of the blob this fragment belongs to.
    #[must_use]
    pub const fn hash(&self) -> &ContentHash { &self.hash }

    /// Declared length of the complete blob in bytes.
    #[must_use]
    pub const fn total(&self) -> u64 { self.total }

    #[must_use]
    pub const fn order(&self) -> FragmentOrder { self.order }

    /// Consume the header, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (ContentHash, u64, FragmentOrder) {
        (self.hash, self.total, self.order)
    }
}
