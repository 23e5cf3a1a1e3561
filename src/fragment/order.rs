//! Sequence position of a fragment within its blob.
//!
//! [`FragmentOrder`] is an index, not a byte offset: the assembled blob is the
//! concatenation of fragments sorted by ascending order.

use derive_more::{Display, From};

/// Zero-based position of a fragment within its waveform blob.
///
/// # Examples
///
/// ```
/// use clx_telemetry::fragment::FragmentOrder;
///
/// let order = FragmentOrder::new(3);
/// assert_eq!(order.get(), 3);
/// assert_eq!(order.checked_next(), Some(FragmentOrder::new(4)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[display("{_0}")]
pub struct FragmentOrder(u32);

impl FragmentOrder {
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// The first fragment of a blob.
    #[must_use]
    pub const fn first() -> Self { Self(0) }

    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// The following position, or `None` at `u32::MAX`.
    #[must_use]
    pub fn checked_next(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl From<FragmentOrder> for u32 {
    fn from(value: FragmentOrder) -> Self { value.0 }
}
