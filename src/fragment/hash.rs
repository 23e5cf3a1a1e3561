//! Content identifiers correlating the fragments of one blob.

use std::borrow::Borrow;

use derive_more::Display;

use super::WaveformHeaderError;

/// Byte length of a content hash on the wire.
pub const CONTENT_HASH_LEN: usize = 32;

/// Fixed-length ASCII identifier of a waveform blob.
///
/// Senders use a hex digest, but any 32 ASCII bytes are accepted and kept
/// verbatim.
///
/// # Examples
///
/// ```
/// use clx_telemetry::fragment::ContentHash;
///
/// let hash = ContentHash::parse("0123456789abcdef0123456789abcdef").expect("valid hash");
/// assert_eq!(hash.as_str().len(), 32);
/// assert!(ContentHash::parse("short").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct ContentHash(String);

impl ContentHash {
    /// Interpret the raw hash bytes of a fragment header.
    ///
    /// # Errors
    ///
    /// Returns [`WaveformHeaderError::NonAsciiHash`] if any byte is outside
    /// the ASCII range.
    pub fn from_wire(bytes: [u8; CONTENT_HASH_LEN]) -> Result<Self, WaveformHeaderError> {
        if !bytes.is_ascii() {
            return Err(WaveformHeaderError::NonAsciiHash);
        }
        Ok(Self(bytes.iter().copied().map(char::from).collect()))
    }

    /// Validate a textual hash.
    ///
    /// # Errors
    ///
    /// Returns [`WaveformHeaderError::HashLength`] if `text` is not exactly 32
    /// bytes and [`WaveformHeaderError::NonAsciiHash`] if it is not ASCII.
    pub fn parse(text: &str) -> Result<Self, WaveformHeaderError> {
        let bytes: [u8; CONTENT_HASH_LEN] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WaveformHeaderError::HashLength { len: text.len() })?;
        Self::from_wire(bytes)
    }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }

    /// The 32 bytes written into a fragment header.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { self.0.as_bytes() }
}

impl Borrow<str> for ContentHash {
    fn borrow(&self) -> &str { &self.0 }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str { &self.0 }
}
