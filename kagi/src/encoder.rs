//! Encoder trait, the reverse direction of [`Decoder`](crate::decoder::Decoder).

/// Encoder trait for converting a value of type `T` into type `E`.
///
/// Implemented by the source type. The destination type must implement
/// `EncodableTo<T>`.
///
/// ```ignore
/// use kagi::encoder::Encoder;
///
/// let blob: Vec<u8> = key.encode()?;
/// ```
pub trait Encoder<T, E: EncodableTo<T>> {
    /// The error type returned when encoding fails.
    type Error;

    /// Encodes `self` into type `E`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` cannot be represented as `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker trait indicating that `Self` can be produced by encoding a `T`.
pub trait EncodableTo<T> {}
