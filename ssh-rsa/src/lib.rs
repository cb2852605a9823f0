//! Decoder for OpenSSH `ssh-rsa` public keys.
//!
//! ```text
//! ssh-rsa AAAAB3NzaC1yc2E... alice@example.com
//! ```
//!
//! The base64 body is the RFC 4253 key blob:
//!
//! ```text
//! string  "ssh-rsa"
//! mpint   e
//! mpint   n
//! ```
//!
//! Only the structure is decoded. Key strength, primality and similar checks
//! are left to the caller.

pub mod error;

use std::str::FromStr;

use kagi::decoder::{DecodableFrom, Decoder};
use kagi::encoder::{EncodableTo, Encoder};
use num_bigint::BigInt;
use openssh::AuthorizedKey;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wire::{Mpint, Reader, Writer};

pub use error::{Error, FormatError, Result};

pub const SSH_RSA: &str = "ssh-rsa";

/// RSA public key in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicKey {
    #[serde(with = "decimal")]
    pub modulus: BigInt, // n
    #[serde(with = "decimal")]
    pub public_exponent: BigInt, // e
}

impl RsaPublicKey {
    pub fn new(modulus: BigInt, public_exponent: BigInt) -> Self {
        RsaPublicKey {
            modulus,
            public_exponent,
        }
    }

    /// Modulus length in bits.
    pub fn key_size(&self) -> u64 {
        self.modulus.bits()
    }

    /// Renders the key as one `ssh-rsa` line.
    pub fn to_openssh(&self, comment: Option<&str>) -> Result<String> {
        let blob: Vec<u8> = self.encode()?;
        Ok(AuthorizedKey::from_bytes(SSH_RSA, &blob, comment).to_string())
    }

    /// `SHA256:` fingerprint of the key blob, as shown by `ssh-keygen -l`.
    pub fn fingerprint(&self) -> Result<String> {
        let blob: Vec<u8> = self.encode()?;
        Ok(openssh::fingerprint(&blob))
    }
}

/// Parses `ssh-rsa <base64> [comment]` into an [`RsaPublicKey`].
///
/// Tokens after the base64 body are ignored.
///
/// # Example
/// ```
/// let key = ssh_rsa::parse_public_key("ssh-rsa AAAAB3NzaC1yc2EAAAABAwAAAAEh").unwrap();
/// assert_eq!(key.public_exponent, num_bigint::BigInt::from(3));
/// assert_eq!(key.modulus, num_bigint::BigInt::from(33));
/// ```
pub fn parse_public_key(text: &str) -> Result<RsaPublicKey> {
    let line = AuthorizedKey::from_str(text)?;
    line.decode()
}

/// Decodes the binary key blob, i.e. the base64-decoded body of a key line.
pub fn parse_key_blob(blob: &[u8]) -> Result<RsaPublicKey> {
    parse_owned(blob.to_vec())
}

fn parse_owned(blob: Vec<u8>) -> Result<RsaPublicKey> {
    let mut reader = Reader::new(blob);

    let marker = reader.read_string().map_err(Error::TruncatedData)?;
    if marker != SSH_RSA {
        return Err(FormatError::UnexpectedMarker(marker).into());
    }
    let public_exponent = reader.read_mpint().map_err(Error::TruncatedData)?;
    let modulus = reader.read_mpint().map_err(Error::TruncatedData)?;

    if !reader.is_empty() {
        debug!(
            remaining = reader.remaining(),
            "ignoring trailing bytes after ssh-rsa key fields"
        );
    }

    let key = RsaPublicKey::new(modulus.into_bigint(), public_exponent.into_bigint());
    debug!(bits = key.key_size(), "decoded ssh-rsa public key");
    Ok(key)
}

impl FromStr for RsaPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_public_key(s)
    }
}

impl TryFrom<Option<&str>> for RsaPublicKey {
    type Error = Error;

    fn try_from(text: Option<&str>) -> Result<Self> {
        match text {
            Some(text) => parse_public_key(text),
            None => Err(Error::InvalidArgument(
                "public key text is absent".to_string(),
            )),
        }
    }
}

impl DecodableFrom<AuthorizedKey> for RsaPublicKey {}

impl Decoder<AuthorizedKey, RsaPublicKey> for AuthorizedKey {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        if self.algorithm() != SSH_RSA {
            return Err(FormatError::UnexpectedAlgorithm(self.algorithm().to_string()).into());
        }
        let blob = Decoder::<AuthorizedKey, Vec<u8>>::decode(self)?;
        parse_owned(blob)
    }
}

impl DecodableFrom<Vec<u8>> for RsaPublicKey {}

impl Decoder<Vec<u8>, RsaPublicKey> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        parse_key_blob(self)
    }
}

impl DecodableFrom<&str> for RsaPublicKey {}

impl Decoder<&str, RsaPublicKey> for &str {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        parse_public_key(self)
    }
}

impl EncodableTo<RsaPublicKey> for Vec<u8> {}

impl Encoder<RsaPublicKey, Vec<u8>> for RsaPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        writer.write_string(SSH_RSA).map_err(Error::Encode)?;
        writer
            .write_mpint(&Mpint::from(&self.public_exponent))
            .map_err(Error::Encode)?;
        writer
            .write_mpint(&Mpint::from(&self.modulus))
            .map_err(Error::Encode)?;
        Ok(writer.into_bytes())
    }
}

impl EncodableTo<RsaPublicKey> for AuthorizedKey {}

impl Encoder<RsaPublicKey, AuthorizedKey> for RsaPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<AuthorizedKey> {
        let blob: Vec<u8> = self.encode()?;
        Ok(AuthorizedKey::from_bytes(SSH_RSA, &blob, None))
    }
}

/// An `ssh-rsa` key together with the comment that followed it on its line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshRsaKey {
    pub key: RsaPublicKey,
    pub comment: Option<String>,
}

impl FromStr for SshRsaKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let line = AuthorizedKey::from_str(s)?;
        let key: RsaPublicKey = line.decode()?;
        Ok(SshRsaKey {
            key,
            comment: line.comment().map(str::to_string),
        })
    }
}

// Integers are serialized as decimal strings so that 4096-bit moduli survive
// formats limited to 64-bit numbers.
mod decimal {
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<BigInt>().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use kagi::encoder::Encoder;
    use num_bigint::{BigInt, Sign};
    use proptest::prelude::*;

    use crate::{RsaPublicKey, parse_key_blob, parse_public_key};

    fn positive(mut bytes: Vec<u8>, high_bit: bool) -> BigInt {
        if high_bit {
            bytes[0] |= 0x80;
        }
        BigInt::from_bytes_be(Sign::Plus, &bytes)
    }

    proptest! {
        /// Any non-negative (n, e) survives encode then parse, including
        /// values whose top byte has the high bit set.
        #[test]
        fn prop_encode_then_parse(
            modulus in proptest::collection::vec(any::<u8>(), 1..=512),
            modulus_high_bit in any::<bool>(),
            exponent in proptest::collection::vec(any::<u8>(), 1..=8),
            exponent_high_bit in any::<bool>(),
        ) {
            let key = RsaPublicKey::new(
                positive(modulus, modulus_high_bit),
                positive(exponent, exponent_high_bit),
            );
            let line = key.to_openssh(Some("prop")).unwrap();
            prop_assert_eq!(&key, &parse_public_key(&line).unwrap());

            let blob: Vec<u8> = key.encode().unwrap();
            prop_assert_eq!(key, parse_key_blob(&blob).unwrap());
        }

        /// Arbitrary two's complement payloads, negative ones included,
        /// decode to the value they encode.
        #[test]
        fn prop_signed_encode_then_parse(
            modulus in proptest::collection::vec(any::<u8>(), 0..=64),
            exponent in proptest::collection::vec(any::<u8>(), 0..=8),
        ) {
            let key = RsaPublicKey::new(
                BigInt::from_signed_bytes_be(&modulus),
                BigInt::from_signed_bytes_be(&exponent),
            );
            let blob: Vec<u8> = key.encode().unwrap();
            prop_assert_eq!(key, parse_key_blob(&blob).unwrap());
        }
    }
}
