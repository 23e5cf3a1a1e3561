//! Per-hash accumulation of out-of-order waveform fragments.
//!
//! [`FragmentStore`] keeps one pending entry per [`ContentHash`]. Fragments
//! may arrive in any order and more than once; a repeated order index is a
//! duplicate and leaves the entry untouched. When the received byte count
//! reaches the total declared by the first fragment, the entry is removed and
//! its fragments are concatenated in ascending order.
//!
//! Pending entries are only released by completion. Callers that want an age
//! bound can sweep with [`FragmentStore::purge_expired_at`].

use std::{
    collections::{BTreeMap, HashMap, hash_map::Entry},
    time::{Duration, Instant},
};

use bytes::{Bytes, BytesMut};
use log::{debug, warn};

use super::{ContentHash, FragmentOrder};

#[derive(Debug)]
struct PendingBlob {
    total: u64,
    received: u64,
    fragments: BTreeMap<FragmentOrder, Bytes>,
    started_at: Instant,
}

impl PendingBlob {
    fn new(total: u64, started_at: Instant) -> Self {
        Self {
            total,
            received: 0,
            fragments: BTreeMap::new(),
            started_at,
        }
    }

    /// Concatenate fragments in ascending order.
    fn assemble(self) -> Bytes {
        let capacity = usize::try_from(self.received).unwrap_or(0);
        let mut buffer = BytesMut::with_capacity(capacity);
        for fragment in self.fragments.into_values() {
            buffer.extend_from_slice(&fragment);
        }
        buffer.freeze()
    }
}

/// A waveform blob whose fragments have all arrived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedBlob {
    hash: ContentHash,
    payload: Bytes,
    declared_total: u64,
}

impl CompletedBlob {
    /// Content hash shared by the blob's fragments.
    #[must_use]
    pub const fn hash(&self) -> &ContentHash { &self.hash }

    /// Borrow the assembled bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Total length declared by the blob's first fragment.
    ///
    /// Differs from `payload().len()` only when the sender's fragments
    /// overshot the declared total.
    #[must_use]
    pub const fn declared_total(&self) -> u64 { self.declared_total }

    /// Consume the blob, returning the hash and the assembled bytes.
    #[must_use]
    pub fn into_parts(self) -> (ContentHash, Bytes) { (self.hash, self.payload) }
}

/// Result of offering one fragment to a [`FragmentStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// The fragment was stored; more bytes are expected.
    Incomplete,
    /// The order index was already present for this hash; nothing changed.
    Duplicate,
    /// The fragment completed its blob, which is no longer pending.
    Completed(CompletedBlob),
}

/// Accumulator of in-flight waveform blobs keyed by content hash.
#[derive(Debug, Default)]
pub struct FragmentStore {
    pending: HashMap<ContentHash, PendingBlob>,
}

impl FragmentStore {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Offer a fragment using the current time.
    ///
    /// The first fragment seen for `hash` fixes the blob's total; totals
    /// declared by later fragments are ignored.
    pub fn accept(
        &mut self,
        hash: ContentHash,
        total: u64,
        order: FragmentOrder,
        fragment: impl Into<Bytes>,
    ) -> FragmentOutcome {
        self.accept_at(hash, total, order, fragment, Instant::now())
    }

    /// Offer a fragment, stamping a newly created entry with `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Instant;
    ///
    /// use clx_telemetry::fragment::{ContentHash, FragmentOrder, FragmentOutcome, FragmentStore};
    ///
    /// let hash = ContentHash::parse("abcdefabcdefabcdefabcdefabcdefab").expect("hash");
    /// let mut store = FragmentStore::new();
    /// let now = Instant::now();
    ///
    /// let first = store.accept_at(hash.clone(), 10, FragmentOrder::new(1), &b"World"[..], now);
    /// assert_eq!(first, FragmentOutcome::Incomplete);
    ///
    /// let FragmentOutcome::Completed(blob) =
    ///     store.accept_at(hash, 10, FragmentOrder::new(0), &b"Hello"[..], now)
    /// else {
    ///     panic!("second fragment completes the blob");
    /// };
    /// assert_eq!(blob.payload(), b"HelloWorld");
    /// assert!(store.is_empty());
    /// ```
    pub fn accept_at(
        &mut self,
        hash: ContentHash,
        total: u64,
        order: FragmentOrder,
        fragment: impl Into<Bytes>,
        now: Instant,
    ) -> FragmentOutcome {
        let fragment = fragment.into();
        let mut occupied = match self.pending.entry(hash) {
            Entry::Occupied(occupied) => occupied,
            Entry::Vacant(vacant) => vacant.insert_entry(PendingBlob::new(total, now)),
        };
        if occupied.get().fragments.contains_key(&order) {
            debug!(
                "duplicate waveform fragment: hash={}, order={order}",
                occupied.key()
            );
            return FragmentOutcome::Duplicate;
        }
        if occupied.get().total != total {
            debug!(
                "ignoring conflicting waveform total: hash={}, first={}, declared={total}",
                occupied.key(),
                occupied.get().total
            );
        }

        let pending = occupied.get_mut();
        pending.received = pending.received.saturating_add(fragment.len() as u64);
        pending.fragments.insert(order, fragment);

        if pending.received < pending.total {
            return FragmentOutcome::Incomplete;
        }

        let (hash, pending) = occupied.remove_entry();
        if pending.received > pending.total {
            warn!(
                "waveform fragments overshot declared total: hash={hash}, total={}, received={}",
                pending.total, pending.received
            );
        }
        let declared_total = pending.total;
        FragmentOutcome::Completed(CompletedBlob {
            hash,
            payload: pending.assemble(),
            declared_total,
        })
    }

    /// Evict pending blobs whose first fragment arrived `ttl` or longer before
    /// `now`, returning their hashes.
    pub fn purge_expired_at(&mut self, now: Instant, ttl: Duration) -> Vec<ContentHash> {
        let mut evicted = Vec::new();
        self.pending.retain(|hash, pending| {
            let expired = now.saturating_duration_since(pending.started_at) >= ttl;
            if expired {
                evicted.push(hash.clone());
            }
            !expired
        });
        evicted
    }

    /// Number of blobs still waiting for fragments.
    #[must_use]
    pub fn pending_len(&self) -> usize { self.pending.len() }

    /// Whether no blob is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }

    /// Whether `hash` has a pending entry.
    #[must_use]
    pub fn contains(&self, hash: &str) -> bool { self.pending.contains_key(hash) }

    /// Bytes received so far for a pending `hash`.
    #[must_use]
    pub fn received(&self, hash: &str) -> Option<u64> {
        self.pending.get(hash).map(|pending| pending.received)
    }

    /// Stored payload for `order` of a pending `hash`.
    #[must_use]
    pub fn fragment(&self, hash: &str, order: FragmentOrder) -> Option<&[u8]> {
        self.pending
            .get(hash)
            .and_then(|pending| pending.fragments.get(&order))
            .map(|fragment| &fragment[..])
    }

    /// Total payload bytes held across every pending blob.
    #[must_use]
    pub fn buffered_bytes(&self) -> u64 {
        self.pending.values().map(|pending| pending.received).sum()
    }
}
