//! # kagi
//!
//! Conversion traits shared by the kagi SSH key crates.
//!
//! Every layer of an OpenSSH public key has its own type, and each step
//! between two layers is expressed with the `Decoder` trait (and `Encoder`
//! for the reverse direction):
//!
//! ```text
//! &str → AuthorizedKey → Vec<u8> → RsaPublicKey
//! ```
//!
//! - `openssh` turns the one-line text form into an `AuthorizedKey` and
//!   base64-decodes it into the binary key blob.
//! - `wire` reads the RFC 4253 length-prefixed fields of the blob.
//! - `ssh-rsa` interprets those fields as an RSA public key.
//!
//! ## Type Safety
//!
//! The marker traits `DecodableFrom` and `EncodableTo` restrict which pairs of
//! types may be converted, so a conversion that was never implemented is a
//! compile error instead of a runtime failure.
//!
//! ## Example
//!
//! ```ignore
//! use kagi::decoder::Decoder;
//! use openssh::AuthorizedKey;
//! use ssh_rsa::RsaPublicKey;
//!
//! let line: AuthorizedKey = "ssh-rsa AAAAB3NzaC1yc2E... alice@example.com".parse()?;
//! let key: RsaPublicKey = line.decode()?;
//! ```

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
