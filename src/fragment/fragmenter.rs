//! Outbound helper that splits a waveform blob into type-3 datagrams.
//!
//! Production senders live outside this crate; [`WaveformFragmenter`] exists
//! so loopback tooling and tests can produce byte-exact fragment datagrams.

use std::num::NonZeroUsize;

use bytes::{BufMut, Bytes, BytesMut};

use super::{ContentHash, FragmentOrder, FragmentationError, WAVEFORM_HEADER_LEN, WaveformHeader};
use crate::dispatch::WAVEFORM_FRAGMENT_HEADER;

/// Splits blobs into fragment datagrams carrying at most a fixed payload size.
#[derive(Clone, Copy, Debug)]
pub struct WaveformFragmenter {
    max_fragment_size: NonZeroUsize,
}

impl WaveformFragmenter {
    /// Create a fragmenter whose datagrams carry at most `max_fragment_size`
    /// payload bytes each.
    #[must_use]
    pub const fn new(max_fragment_size: NonZeroUsize) -> Self { Self { max_fragment_size } }

    #[must_use]
    pub const fn max_fragment_size(&self) -> NonZeroUsize { self.max_fragment_size }

    /// Split `blob` into datagrams in ascending order.
    ///
    /// An empty blob still yields one datagram declaring a total of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    ///
    /// use clx_telemetry::fragment::{ContentHash, WaveformFragmenter};
    ///
    /// let hash = ContentHash::parse("0123456789abcdef0123456789abcdef").expect("hash");
    /// let fragmenter = WaveformFragmenter::new(NonZeroUsize::new(4).expect("non-zero"));
    /// let datagrams = fragmenter.fragment(&hash, b"HelloWorld").expect("fragment");
    ///
    /// assert_eq!(datagrams.len(), 3);
    /// assert_eq!(datagrams[0][0], 3);
    /// assert!(datagrams[2].ends_with(b"ld"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::OrderOverflow`] if the blob needs more
    /// than `u32::MAX + 1` fragments.
    pub fn fragment(
        &self,
        hash: &ContentHash,
        blob: &[u8],
    ) -> Result<Vec<Bytes>, FragmentationError> {
        let total = blob.len() as u64;
        if blob.is_empty() {
            return Ok(vec![Self::datagram(hash, total, FragmentOrder::first(), &[])]);
        }

        let mut datagrams = Vec::with_capacity(blob.len().div_ceil(self.max_fragment_size.get()));
        let mut chunks = blob.chunks(self.max_fragment_size.get()).peekable();
        let mut order = FragmentOrder::first();
        while let Some(chunk) = chunks.next() {
            datagrams.push(Self::datagram(hash, total, order, chunk));
            if chunks.peek().is_some() {
                order = order
                    .checked_next()
                    .ok_or(FragmentationError::OrderOverflow { last: order })?;
            }
        }
        Ok(datagrams)
    }

    fn datagram(hash: &ContentHash, total: u64, order: FragmentOrder, chunk: &[u8]) -> Bytes {
        let mut datagram = BytesMut::with_capacity(1 + WAVEFORM_HEADER_LEN + chunk.len());
        datagram.put_u8(WAVEFORM_FRAGMENT_HEADER);
        WaveformHeader::new(hash.clone(), total, order).write_to(&mut datagram);
        datagram.put_slice(chunk);
        datagram.freeze()
    }
}
