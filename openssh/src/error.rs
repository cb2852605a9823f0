use base64::DecodeError;
use thiserror::Error;

/// Errors that can occur when parsing the one-line OpenSSH public key format.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The line is empty or contains only whitespace
    #[error("empty public key line")]
    Empty,

    /// Only the algorithm name is present
    #[error("missing base64 key data after algorithm name")]
    MissingKeyData,

    /// Failed to decode base64 key data
    #[error("base64 decode: {0}")]
    Base64Decode(#[source] DecodeError),
}
