use thiserror::Error;

/// Errors returned while decoding an `ssh-rsa` public key.
///
/// Decoding never returns a partial key. The lower level error is kept as
/// the source of each variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The input text is absent or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The text or the binary envelope does not have the `ssh-rsa` layout
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// A length-prefixed field runs past the end of the key blob
    #[error("truncated data: {0}")]
    TruncatedData(#[source] wire::error::Error),

    /// The key cannot be written as a key blob
    #[error("encode: {0}")]
    Encode(#[source] wire::error::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than two space separated tokens
    #[error("bad format, should be: ssh-rsa AAAAB3...")]
    MissingKeyData,

    /// The first text token is not `ssh-rsa`
    #[error("bad format, should be: ssh-rsa AAAAB3... but got {0}")]
    UnexpectedAlgorithm(String),

    /// The marker field inside the key blob is not `ssh-rsa`
    #[error("looking for marker ssh-rsa but got {0}")]
    UnexpectedMarker(String),

    #[error("base64 decode: {0}")]
    Base64Decode(#[source] base64::DecodeError),
}

impl From<openssh::error::Error> for Error {
    fn from(e: openssh::error::Error) -> Self {
        match e {
            openssh::error::Error::Empty => {
                Error::InvalidArgument("public key text must not be empty".to_string())
            }
            openssh::error::Error::MissingKeyData => FormatError::MissingKeyData.into(),
            openssh::error::Error::Base64Decode(e) => FormatError::Base64Decode(e).into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
