//! Decoder trait for type-safe conversions.
//!
//! The `Decoder` trait converts a source type `T` into a destination type
//! `D`. It is used by every kagi crate to move one step closer to the
//! canonical key representation.
//!
//! # Design Pattern
//!
//! 1. `Decoder<T, D>` - performs the conversion
//! 2. `DecodableFrom<T>` - marker trait constraining valid conversions
//!
//! # Implementation Guide
//!
//! ```no_run
//! use kagi::decoder::{Decoder, DecodableFrom};
//!
//! struct KeyLine(String);
//! struct KeyBlob(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct MyError;
//!
//! // 1. Mark the destination type as decodable from the source type
//! impl DecodableFrom<KeyLine> for KeyBlob {}
//!
//! // 2. Implement the decoder on the source type
//! impl Decoder<KeyLine, KeyBlob> for KeyLine {
//!     type Error = MyError;
//!
//!     fn decode(&self) -> Result<KeyBlob, Self::Error> {
//!         Ok(KeyBlob(self.0.as_bytes().to_vec()))
//!     }
//! }
//! ```

/// Decoder trait for converting from type `T` to type `D`.
///
/// This trait is implemented by the source type `T`. The destination type
/// must implement `DecodableFrom<T>`.
///
/// # Examples
///
/// ```ignore
/// use kagi::decoder::Decoder;
/// use ssh_rsa::RsaPublicKey;
///
/// let blob: Vec<u8> = /* RFC 4253 key blob */;
/// let key: RsaPublicKey = blob.decode()?;
/// ```
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// The error type returned when decoding fails.
    type Error;

    /// Decodes `self` into type `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion fails. The specific error
    /// conditions depend on the implementing type.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker trait indicating that type `D` can be decoded from type `T`.
///
/// It has no methods. Implement it for destination types:
///
/// ```no_run
/// use kagi::decoder::DecodableFrom;
///
/// struct KeyLine;
/// struct KeyBlob;
///
/// impl DecodableFrom<KeyLine> for KeyBlob {}
/// ```
pub trait DecodableFrom<T> {}
