//! Scalar wire decoding.
//!
//! Pure functions translating raw column bytes into values:
//!
//! - integers: [`decode_int16`], [`decode_int32`], [`decode_int64`], [`decode_int128`]
//! - [`decode_boolean`], [`decode_guid`]
//! - [`decode_date`], [`decode_time`]
//! - [`decode_scaled_numeric`]
//! - [`decode_dec_float16`], [`decode_dec_float34`]
//!
//! Multi-byte integers are in network byte order. All functions reject a
//! buffer of the wrong length with [`FormatError`] instead of guessing.
use bytes::Buf;
use std::fmt;
use uuid::Uuid;

mod decfloat;
mod numeric;
pub(crate) mod calendar;

pub use decfloat::{
    DecFloat, Endian, decode_dec_float16, decode_dec_float16_in, decode_dec_float34,
    decode_dec_float34_in, decode_int128, decode_int128_in,
};
pub use numeric::{Decimal, decode_scaled_numeric};
pub use calendar::{decode_date, decode_time};

/// Wire size of a GUID.
pub const GUID_LEN: usize = 16;

/// Check exact buffer length and borrow it as an array.
pub(crate) fn fixed<const N: usize>(raw: &[u8]) -> Result<&[u8; N], FormatError> {
    raw.try_into().map_err(|_| FormatError::Length { expected: N, found: raw.len() })
}

/// Decode 2 byte big endian integer.
pub fn decode_int16(raw: &[u8]) -> Result<i16, FormatError> {
    Ok(i16::from_be_bytes(*fixed(raw)?))
}

/// Decode 4 byte big endian integer.
pub fn decode_int32(raw: &[u8]) -> Result<i32, FormatError> {
    Ok(i32::from_be_bytes(*fixed(raw)?))
}

/// Decode 8 byte big endian integer.
pub fn decode_int64(raw: &[u8]) -> Result<i64, FormatError> {
    Ok(i64::from_be_bytes(*fixed(raw)?))
}

/// Decode boolean, `true` if the first byte is nonzero.
pub fn decode_boolean(raw: &[u8]) -> Result<bool, FormatError> {
    match raw.first() {
        Some(b) => Ok(*b != 0),
        None => Err(FormatError::Empty),
    }
}

/// Decode 16 byte GUID.
///
/// The first three groups are big endian `u32`, `u16`, `u16`, the last
/// 8 bytes are taken as is.
pub fn decode_guid(raw: &[u8]) -> Result<Uuid, FormatError> {
    let mut raw = &fixed::<GUID_LEN>(raw)?[..];
    let d1 = raw.get_u32();
    let d2 = raw.get_u16();
    let d3 = raw.get_u16();
    let mut d4 = [0u8; 8];
    raw.copy_to_slice(&mut d4);
    Ok(Uuid::from_fields(d1, d2, d3, &d4))
}

/// A type that can be decoded from its wire representation.
pub trait FromWire: Sized {
    /// Try decode self from raw column bytes.
    fn from_wire(raw: &[u8]) -> Result<Self, FormatError>;
}

macro_rules! from_wire {
    ($($ty:ty => $f:path),* $(,)?) => {
        $(
            impl FromWire for $ty {
                fn from_wire(raw: &[u8]) -> Result<Self, FormatError> {
                    $f(raw)
                }
            }
        )*
    };
}

from_wire! {
    bool => decode_boolean,
    i16 => decode_int16,
    i32 => decode_int32,
    i64 => decode_int64,
    i128 => decode_int128,
    Uuid => decode_guid,
}

impl FromWire for time::Date {
    fn from_wire(raw: &[u8]) -> Result<Self, FormatError> {
        decode_date(decode_int32(raw)?)
    }
}

impl FromWire for time::Time {
    fn from_wire(raw: &[u8]) -> Result<Self, FormatError> {
        decode_time(decode_int32(raw)?)
    }
}

/// An error when wire buffer is malformed.
#[derive(Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer length does not match the wire type.
    Length { expected: usize, found: usize },
    /// Buffer is empty.
    Empty,
    /// Decoded component is outside the representable range.
    OutOfRange(&'static str),
}

impl std::error::Error for FormatError { }

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("malformed wire value, ")?;
        match self {
            Self::Length { expected, found } => {
                write!(f, "expected {expected} bytes, found {found}")
            }
            Self::Empty => f.write_str("empty buffer"),
            Self::OutOfRange(what) => write!(f, "{what} out of range"),
        }
    }
}

impl fmt::Debug for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::encode_guid;

    #[test]
    fn int_extremes() {
        assert_eq!(decode_int32(&[0; 4]).unwrap(), 0);
        assert_eq!(decode_int32(&[0xff; 4]).unwrap(), -1);
        assert_eq!(decode_int64(&[0; 8]).unwrap(), 0);
        assert_eq!(decode_int64(&[0xff; 8]).unwrap(), -1);
        assert_eq!(decode_int16(&[0xff; 2]).unwrap(), -1);
    }

    #[test]
    fn int_mixed_pattern() {
        assert_eq!(decode_int32(&[0x12, 0x34, 0x56, 0x78]).unwrap(), 0x1234_5678);
        assert_eq!(decode_int32(&[0xff, 0xff, 0xff, 0xfe]).unwrap(), -2);
        assert_eq!(
            decode_int64(&[0x80, 0, 0, 0, 0, 0, 0, 1]).unwrap(),
            i64::MIN + 1,
        );
        assert_eq!(
            decode_int64(&[0, 0, 0, 1, 0, 0, 0, 0]).unwrap(),
            4_294_967_296,
        );
    }

    #[test]
    fn int_wrong_length() {
        assert_eq!(
            decode_int32(&[0; 3]).unwrap_err(),
            FormatError::Length { expected: 4, found: 3 },
        );
        assert_eq!(
            decode_int64(&[0; 9]).unwrap_err(),
            FormatError::Length { expected: 8, found: 9 },
        );
    }

    #[test]
    fn boolean() {
        assert!(!decode_boolean(&[0]).unwrap());
        assert!(decode_boolean(&[1]).unwrap());
        assert!(decode_boolean(&[0x80, 0]).unwrap());
        assert_eq!(decode_boolean(&[]).unwrap_err(), FormatError::Empty);
    }

    #[test]
    fn guid_layout() {
        let raw = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
            0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
        ];
        let guid = decode_guid(&raw).unwrap();
        assert_eq!(guid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
        let (d1, d2, d3, d4) = guid.as_fields();
        assert_eq!(d1, 0x0011_2233);
        assert_eq!(d2, 0x4455);
        assert_eq!(d3, 0x6677);
        assert_eq!(d4, &raw[8..]);
    }

    #[test]
    fn guid_roundtrip() {
        let mut raw = [0u8; GUID_LEN];
        for seed in [0u8, 1, 7, 0x5a, 0xa5, 0xfe] {
            for (i, b) in raw.iter_mut().enumerate() {
                *b = seed.wrapping_mul(31).wrapping_add(i as u8 * 17) ^ (i as u8);
            }
            let guid = decode_guid(&raw).unwrap();
            assert_eq!(encode_guid(&guid), raw);
        }
    }

    #[test]
    fn guid_wrong_length() {
        assert!(matches!(
            decode_guid(&[0; 15]),
            Err(FormatError::Length { expected: 16, found: 15 })
        ));
    }

    #[test]
    fn from_wire() {
        assert_eq!(i32::from_wire(&[0, 0, 1, 0]).unwrap(), 256);
        assert!(bool::from_wire(&[2]).unwrap());
        let date = time::Date::from_wire(&0i32.to_be_bytes()).unwrap();
        assert_eq!(date.to_string(), "1858-11-17");
        let tod = time::Time::from_wire(&10_000i32.to_be_bytes()).unwrap();
        assert_eq!(tod.second(), 1);
    }
}
