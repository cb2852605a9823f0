use std::fmt::Display;

use nom::{IResult, Parser};
use num_bigint::{BigInt, Sign};

pub mod error;

use error::Error;

/*
ref: https://www.rfc-editor.org/rfc/rfc4251.html#section-5

string: uint32 length followed by length bytes of arbitrary data.
mpint:  string holding a two's complement, big-endian integer.
        Zero is stored as the empty string.
*/

const LENGTH_SIZE: usize = 4;

/// Cursor over an owned key blob.
///
/// Every read goes through [`Reader::read_field`], which consumes one
/// length-prefixed field or fails without moving the cursor.
#[derive(Debug, Clone)]
pub struct Reader {
    data: Vec<u8>,
    offset: usize,
}

impl Reader {
    pub fn new(data: Vec<u8>) -> Self {
        Reader { data, offset: 0 }
    }

    /// Reads the next `uint32` length and exactly that many payload bytes.
    pub fn read_field(&mut self) -> Result<&[u8], Error> {
        let input = &self.data[self.offset..];
        let (rest, length) = parse_length(input).map_err(|_| Error::TruncatedLength {
            remaining: input.len(),
        })?;
        let (_, payload) =
            parse_payload(rest, length as usize).map_err(|_| Error::TruncatedPayload {
                declared: length,
                remaining: rest.len(),
            })?;
        let payload_len = payload.len();

        let start = self.offset + LENGTH_SIZE;
        self.offset = start + payload_len;
        Ok(&self.data[start..self.offset])
    }

    /// Reads a `string` field as text.
    ///
    /// Invalid UTF-8 sequences are replaced so the value can still be shown in
    /// an error message.
    pub fn read_string(&mut self) -> Result<String, Error> {
        let field = self.read_field()?;
        Ok(String::from_utf8_lossy(field).into_owned())
    }

    pub fn read_mpint(&mut self) -> Result<Mpint, Error> {
        self.read_field().map(Mpint::from)
    }

    /// Number of bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u32> {
    nom::number::complete::be_u32(input)
}

fn parse_payload(input: &[u8], length: usize) -> IResult<&[u8], &[u8]> {
    nom::bytes::complete::take(length).parse(input)
}

/// Builds a key blob field by field.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer::default()
    }

    pub fn write_field(&mut self, payload: &[u8]) -> Result<(), Error> {
        let length = u32::try_from(payload.len()).map_err(|_| Error::FieldTooLong(payload.len()))?;
        self.buf.extend_from_slice(&length.to_be_bytes());
        self.buf.extend_from_slice(payload);
        Ok(())
    }

    pub fn write_string(&mut self, s: &str) -> Result<(), Error> {
        self.write_field(s.as_bytes())
    }

    pub fn write_mpint(&mut self, n: &Mpint) -> Result<(), Error> {
        self.write_field(&n.to_bytes())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// mpint is signed. A payload whose first bit is set is negative unless a
// leading 0x00 is present, so the bytes are never read as an unsigned magnitude.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mpint {
    inner: BigInt,
}

impl Mpint {
    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    pub fn into_bigint(self) -> BigInt {
        self.inner
    }

    /// Canonical payload: minimal two's complement, empty for zero.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.inner.sign() == Sign::NoSign {
            return Vec::new();
        }
        self.inner.to_signed_bytes_be()
    }
}

impl From<&[u8]> for Mpint {
    fn from(value: &[u8]) -> Self {
        Mpint {
            inner: BigInt::from_signed_bytes_be(value),
        }
    }
}

impl From<BigInt> for Mpint {
    fn from(value: BigInt) -> Self {
        Mpint { inner: value }
    }
}

impl From<&BigInt> for Mpint {
    fn from(value: &BigInt) -> Self {
        Mpint {
            inner: value.clone(),
        }
    }
}

impl Display for Mpint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num_bigint::BigInt;
    use rstest::rstest;

    use crate::{Error, Mpint, Reader, Writer};

    #[rstest(input, expected,
        case(vec![0x00, 0x00, 0x00, 0x00], vec![]),
        case(vec![0x00, 0x00, 0x00, 0x02, 0x68, 0x69], vec![0x68, 0x69]),
        case(vec![0x00, 0x00, 0x00, 0x01, 0xff, 0xaa, 0xbb], vec![0xff]),
    )]
    fn test_read_field(input: Vec<u8>, expected: Vec<u8>) {
        let mut reader = Reader::new(input);
        let field = reader.read_field().unwrap();
        assert_eq!(expected.as_slice(), field);
    }

    #[test]
    fn test_read_field_sequence() {
        let mut reader = Reader::new(vec![
            0x00, 0x00, 0x00, 0x01, 0x0a, 0x00, 0x00, 0x00, 0x02, 0x0b, 0x0c,
        ]);
        assert_eq!(&[0x0a], reader.read_field().unwrap());
        assert_eq!(6, reader.remaining());
        assert_eq!(&[0x0b, 0x0c], reader.read_field().unwrap());
        assert!(reader.is_empty());
    }

    #[rstest(input, expected,
        case(vec![], Error::TruncatedLength { remaining: 0 }),
        case(vec![0x00, 0x00, 0x01], Error::TruncatedLength { remaining: 3 }),
        case(vec![0x00, 0x00, 0x00, 0x05, 0x01, 0x02], Error::TruncatedPayload { declared: 5, remaining: 2 }),
        case(vec![0xff, 0xff, 0xff, 0xff], Error::TruncatedPayload { declared: u32::MAX, remaining: 0 }),
    )]
    fn test_read_field_truncated(input: Vec<u8>, expected: Error) {
        let mut reader = Reader::new(input);
        match reader.read_field() {
            Err(e) => assert_eq!(expected, e),
            Ok(field) => panic!("expected an error, but got field {:?}", field),
        }
    }

    #[test]
    fn test_read_field_failure_keeps_offset() {
        let mut reader = Reader::new(vec![0x00, 0x00, 0x00, 0x01, 0x0a, 0x00, 0x00, 0x00, 0x09]);
        reader.read_field().unwrap();
        assert!(reader.read_field().is_err());
        assert_eq!(4, reader.remaining());
    }

    #[rstest(input, expected,
        case(vec![0x00, 0x00, 0x00, 0x07, 0x73, 0x73, 0x68, 0x2d, 0x72, 0x73, 0x61], "ssh-rsa"),
        case(vec![0x00, 0x00, 0x00, 0x00], ""),
        case(vec![0x00, 0x00, 0x00, 0x02, 0x61, 0xff], "a\u{fffd}"),
    )]
    fn test_read_string(input: Vec<u8>, expected: &str) {
        let mut reader = Reader::new(input);
        assert_eq!(expected, reader.read_string().unwrap());
    }

    // Examples from RFC 4251 section 5
    #[rstest(input, expected,
        case(vec![0x00, 0x00, 0x00, 0x00], "0"),
        case(vec![0x00, 0x00, 0x00, 0x08, 0x09, 0xa3, 0x78, 0xf9, 0xb2, 0xe3, 0x32, 0xa7], "694531781388612263"),
        case(vec![0x00, 0x00, 0x00, 0x02, 0x00, 0x80], "128"),
        case(vec![0x00, 0x00, 0x00, 0x01, 0x80], "-128"),
        case(vec![0x00, 0x00, 0x00, 0x02, 0xed, 0xcc], "-4660"),
        case(vec![0x00, 0x00, 0x00, 0x05, 0xff, 0x21, 0x52, 0x41, 0x11], "-3735928559"),
    )]
    fn test_read_mpint(input: Vec<u8>, expected: &str) {
        let mut reader = Reader::new(input);
        let actual = reader.read_mpint().unwrap();
        assert_eq!(BigInt::from_str(expected).unwrap(), *actual.as_bigint());
    }

    #[rstest(value, expected,
        case("0", vec![0x00, 0x00, 0x00, 0x00]),
        case("127", vec![0x00, 0x00, 0x00, 0x01, 0x7f]),
        case("128", vec![0x00, 0x00, 0x00, 0x02, 0x00, 0x80]),
        case("-1", vec![0x00, 0x00, 0x00, 0x01, 0xff]),
        case("-4660", vec![0x00, 0x00, 0x00, 0x02, 0xed, 0xcc]),
        case("65537", vec![0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01]),
    )]
    fn test_write_mpint(value: &str, expected: Vec<u8>) {
        let mut writer = Writer::new();
        writer
            .write_mpint(&Mpint::from(BigInt::from_str(value).unwrap()))
            .unwrap();
        assert_eq!(expected, writer.into_bytes());
    }

    #[test]
    fn test_writer_fields_are_readable() {
        let mut writer = Writer::new();
        writer.write_string("ssh-rsa").unwrap();
        writer.write_field(&[0x01, 0x00, 0x01]).unwrap();

        let mut reader = Reader::new(writer.into_bytes());
        assert_eq!("ssh-rsa", reader.read_string().unwrap());
        assert_eq!(BigInt::from(65537), reader.read_mpint().unwrap().into_bigint());
        assert!(reader.is_empty());
    }
}
