use thiserror::Error;

/// Errors raised while reading or writing RFC 4251 length-prefixed fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Fewer than 4 bytes were left for the length header
    #[error("need 4 bytes for a field length, {remaining} remaining")]
    TruncatedLength { remaining: usize },

    /// The declared payload length exceeds the bytes left in the buffer
    #[error("field declares {declared} bytes, {remaining} remaining")]
    TruncatedPayload { declared: u32, remaining: usize },

    /// A payload is too large for a 32-bit length header
    #[error("field of {0} bytes does not fit a 32-bit length")]
    FieldTooLong(usize),
}
