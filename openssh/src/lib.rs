pub mod error;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD},
};
use error::Error;
use kagi::decoder::{DecodableFrom, Decoder};
use sha2::{Digest, Sha256};

/*
ref: https://man.openbsd.org/sshd.8#AUTHORIZED_KEYS_FILE_FORMAT
ref: https://www.rfc-editor.org/rfc/rfc4253.html#section-6.6

<algorithm> SP <base64 key blob> [SP <comment>]
*/

const FINGERPRINT_PREFIX: &str = "SHA256:";

/// One public key line as written by `ssh-keygen` into `id_rsa.pub`.
///
/// The key data stays base64 encoded until it is decoded into a blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedKey {
    algorithm: String,
    data: String, // base64 encoded key blob
    comment: Option<String>,
}

impl AuthorizedKey {
    pub fn new(algorithm: String, data: String, comment: Option<String>) -> Self {
        AuthorizedKey {
            algorithm,
            data,
            comment,
        }
    }

    pub fn from_bytes(algorithm: &str, blob: &[u8], comment: Option<&str>) -> Self {
        AuthorizedKey {
            algorithm: algorithm.to_string(),
            data: STANDARD.encode(blob),
            comment: comment.map(str::to_string),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

impl FromStr for AuthorizedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(Error::Empty);
        }

        // Split on every single space. Doubled spaces yield empty tokens.
        let mut parts = line.split(' ');
        let algorithm = parts.next().ok_or(Error::Empty)?;
        let data = parts.next().ok_or(Error::MissingKeyData)?;
        let comment = parts.collect::<Vec<&str>>().join(" ");
        let comment = comment.trim();

        Ok(AuthorizedKey {
            algorithm: algorithm.to_string(),
            data: data.to_string(),
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}

impl Display for AuthorizedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.algorithm, self.data)?;
        if let Some(comment) = &self.comment {
            write!(f, " {}", comment)?;
        }
        Ok(())
    }
}

impl DecodableFrom<AuthorizedKey> for Vec<u8> {}

impl Decoder<AuthorizedKey, Vec<u8>> for AuthorizedKey {
    type Error = Error;

    fn decode(&self) -> Result<Vec<u8>, Self::Error> {
        // The algorithm name and comment are dropped here.
        STANDARD.decode(self.data()).map_err(Error::Base64Decode)
    }
}

impl DecodableFrom<String> for AuthorizedKey {}

impl Decoder<String, AuthorizedKey> for String {
    type Error = Error;

    fn decode(&self) -> Result<AuthorizedKey, Self::Error> {
        AuthorizedKey::from_str(self)
    }
}

impl DecodableFrom<&str> for AuthorizedKey {}

impl Decoder<&str, AuthorizedKey> for &str {
    type Error = Error;

    fn decode(&self) -> Result<AuthorizedKey, Self::Error> {
        AuthorizedKey::from_str(self)
    }
}

/// SHA-256 fingerprint of a key blob in the form printed by `ssh-keygen -l`.
///
/// # Example
/// ```
/// let fp = openssh::fingerprint(b"");
/// assert_eq!(fp, "SHA256:47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU");
/// ```
pub fn fingerprint(blob: &[u8]) -> String {
    let digest = Sha256::digest(blob);
    format!("{}{}", FINGERPRINT_PREFIX, STANDARD_NO_PAD.encode(digest))
}
