//! Metric helpers for the intake.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to nothing.

#[cfg(feature = "metrics")]
use metrics::{counter, gauge};

use crate::dispatch::DropReason;

/// Name of the counter tracking datagrams by kind.
pub const DATAGRAMS_RECEIVED: &str = "clx_datagrams_received_total";
/// Name of the counter tracking dropped datagrams by reason.
pub const DATAGRAMS_DROPPED: &str = "clx_datagrams_dropped_total";
/// Name of the counter tracking reassembled waveforms.
pub const WAVEFORMS_COMPLETED: &str = "clx_waveforms_completed_total";
/// Name of the gauge tracking incomplete waveforms.
pub const WAVEFORMS_PENDING: &str = "clx_waveforms_pending";

/// Record a datagram whose header selected `kind`.
pub fn inc_datagrams(kind: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(DATAGRAMS_RECEIVED, "kind" => kind).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}

/// Record a dropped datagram.
pub fn inc_dropped(reason: DropReason) {
    #[cfg(feature = "metrics")]
    counter!(DATAGRAMS_DROPPED, "reason" => reason.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}

/// Record a completed waveform.
pub fn inc_waveforms() {
    #[cfg(feature = "metrics")]
    counter!(WAVEFORMS_COMPLETED).increment(1);
}

/// Publish the number of incomplete waveforms.
#[cfg_attr(
    feature = "metrics",
    expect(
        clippy::cast_precision_loss,
        reason = "gauge values are f64; pending counts stay far below 2^52"
    )
)]
pub fn set_pending(count: usize) {
    #[cfg(feature = "metrics")]
    gauge!(WAVEFORMS_PENDING).set(count as f64);
    #[cfg(not(feature = "metrics"))]
    let _ = count;
}
