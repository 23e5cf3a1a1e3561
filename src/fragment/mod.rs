//! Waveform fragment handling.
//!
//! Waveform blobs arrive split across many type-3 datagrams. Each datagram
//! carries a [`WaveformHeader`] naming the blob's [`ContentHash`], its total
//! byte length, and the fragment's [`FragmentOrder`]. [`FragmentStore`]
//! accumulates fragments per hash, drops duplicates, and hands back the
//! assembled blob once every byte has arrived. [`WaveformFragmenter`] performs
//! the inverse split for senders and loopback tests.

pub mod error;
pub mod fragmenter;
pub mod hash;
pub mod header;
pub mod order;
pub mod store;

pub use error::{FragmentationError, WaveformHeaderError};
pub use fragmenter::WaveformFragmenter;
pub use hash::{CONTENT_HASH_LEN, ContentHash};
pub use header::{WAVEFORM_HEADER_LEN, WaveformHeader};
pub use order::FragmentOrder;
pub use store::{CompletedBlob, FragmentOutcome, FragmentStore};
