//! Persistence of completed waveform blobs.
//!
//! The dispatcher never writes to storage itself. Hosts that want completed
//! waveforms on disk attach a [`WaveformSink`]; [`FileCacheSink`] stores each
//! blob as `<dir>/<hash>`.

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::fragment::ContentHash;

/// Errors raised while persisting a completed waveform.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The hash cannot be used as a file name.
    #[error("content hash {hash:?} is not a safe file name")]
    UnsafeName { hash: String },
    #[error("failed to write waveform {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Destination for reassembled waveform blobs.
pub trait WaveformSink: Send {
    /// Persist `payload` under `hash`, returning where it was stored.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] if the blob could not be stored.
    fn store(&mut self, hash: &ContentHash, payload: &[u8]) -> Result<PathBuf, SinkError>;
}

/// Writes each completed waveform to a file named after its content hash.
#[derive(Clone, Debug)]
pub struct FileCacheSink {
    dir: PathBuf,
}

impl FileCacheSink {
    /// Cache blobs under `dir`, which is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    #[must_use]
    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, hash: &ContentHash) -> Result<PathBuf, SinkError> {
        let name = hash.as_str();
        let safe = name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !safe {
            return Err(SinkError::UnsafeName {
                hash: name.to_owned(),
            });
        }
        Ok(self.dir.join(name))
    }
}

impl WaveformSink for FileCacheSink {
    fn store(&mut self, hash: &ContentHash, payload: &[u8]) -> Result<PathBuf, SinkError> {
        let path = self.path_for(hash)?;
        fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, payload).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
