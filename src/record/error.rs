//! Errors raised while converting record bodies to and from MessagePack.

use thiserror::Error;

/// Failure to decode a record body.
///
/// Missing or mistyped fields never produce an error; they decode to their
/// zero value. Only a body that is not a MessagePack map is rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid MessagePack.
    #[error("malformed record body: {0}")]
    Malformed(#[from] rmpv::decode::Error),
    /// The body parsed but its root value is not a map.
    #[error("record body is a {found}, expected a map")]
    NotAMap { found: &'static str },
}

/// Failure to encode a record body.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write record body: {0}")]
    Write(#[from] rmpv::encode::Error),
}
