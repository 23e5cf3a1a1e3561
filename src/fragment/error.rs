//! Errors raised while parsing or producing waveform fragments.

use thiserror::Error;

use super::{FragmentOrder, WAVEFORM_HEADER_LEN};

/// A waveform fragment body that cannot be parsed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WaveformHeaderError {
    /// The body is shorter than the fixed fragment header.
    #[error("waveform fragment body is {len} bytes, header needs {WAVEFORM_HEADER_LEN}")]
    Short { len: usize },
    /// The content hash contains non-ASCII bytes.
    #[error("waveform content hash is not ASCII")]
    NonAsciiHash,
    /// The content hash does not have the fixed length.
    #[error("waveform content hash is {len} bytes, expected 32")]
    HashLength { len: usize },
}

/// Errors produced while splitting a blob into fragment datagrams.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FragmentationError {
    /// The blob needs more fragments than a `u32` order index can number.
    #[error("fragment order overflow after {last}")]
    OrderOverflow { last: FragmentOrder },
}
