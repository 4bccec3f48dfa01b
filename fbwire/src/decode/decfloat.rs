//! IEEE 754-2008 decimal floating point and 128 bit integers.
//!
//! Both arrive as opaque 8 or 16 byte buffers which are reversed on little
//! endian hosts before being read in host order.
use std::fmt;

use super::{Decimal, FormatError, fixed};

/// Byte order of the host reading the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

impl Endian {
    /// Byte order of the current target.
    pub const HOST: Endian = if cfg!(target_endian = "little") {
        Endian::Little
    } else {
        Endian::Big
    };
}

/// Decimal floating point value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecFloat {
    /// `(-1)^negative * coefficient * 10^exponent`
    Finite {
        negative: bool,
        coefficient: u128,
        exponent: i32,
    },
    Infinite {
        negative: bool,
    },
    NaN {
        negative: bool,
        signaling: bool,
    },
}

impl DecFloat {
    /// Returns `true` for values that are neither infinite nor NaN.
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite { .. })
    }

    /// Convert a finite value into [`Decimal`].
    ///
    /// Returns [`None`] for infinity, NaN, or when the value overflows.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let Self::Finite { negative, coefficient, exponent } = *self else {
            return None;
        };
        let mut mantissa = i128::try_from(coefficient).ok()?;
        if negative {
            mantissa = -mantissa;
        }
        if exponent <= 0 {
            return Some(Decimal::new(mantissa, exponent.unsigned_abs()));
        }
        let factor = 10i128.checked_pow(exponent as u32)?;
        Some(Decimal::new(mantissa.checked_mul(factor)?, 0))
    }
}

impl fmt::Display for DecFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Finite { negative, coefficient, exponent } => {
                if negative {
                    f.write_str("-")?;
                }
                f.write_str(itoa::Buffer::new().format(coefficient))?;
                if exponent != 0 {
                    f.write_str("E")?;
                    f.write_str(itoa::Buffer::new().format(exponent))?;
                }
                Ok(())
            }
            Self::Infinite { negative: true } => f.write_str("-Infinity"),
            Self::Infinite { negative: false } => f.write_str("Infinity"),
            Self::NaN { signaling: true, .. } => f.write_str("sNaN"),
            Self::NaN { signaling: false, .. } => f.write_str("NaN"),
        }
    }
}

/// Interchange format layout.
struct Format {
    bits: u32,
    exponent_continuation: u32,
    declets: u32,
    bias: i32,
}

/// decimal64, 16 digits
const DECIMAL64: Format = Format { bits: 64, exponent_continuation: 8, declets: 5, bias: 398 };

/// decimal128, 34 digits
const DECIMAL128: Format = Format { bits: 128, exponent_continuation: 12, declets: 11, bias: 6176 };

const COMBINATION_INFINITY: u32 = 0b11110;
const COMBINATION_NAN: u32 = 0b11111;

/// Copy buffer and reverse it for little endian host.
fn host_bytes<const N: usize>(raw: &[u8], host: Endian) -> Result<[u8; N], FormatError> {
    let mut bytes = *fixed::<N>(raw)?;
    if host == Endian::Little {
        bytes.reverse();
    }
    Ok(bytes)
}

/// Decode 16 digit decimal floating point.
pub fn decode_dec_float16(raw: &[u8]) -> Result<DecFloat, FormatError> {
    decode_dec_float16_in(raw, Endian::HOST)
}

/// Decode 34 digit decimal floating point.
pub fn decode_dec_float34(raw: &[u8]) -> Result<DecFloat, FormatError> {
    decode_dec_float34_in(raw, Endian::HOST)
}

/// Decode 128 bit two's complement integer.
pub fn decode_int128(raw: &[u8]) -> Result<i128, FormatError> {
    decode_int128_in(raw, Endian::HOST)
}

/// [`decode_dec_float16`] as read by a host of the given byte order.
pub fn decode_dec_float16_in(raw: &[u8], host: Endian) -> Result<DecFloat, FormatError> {
    let bytes = host_bytes::<8>(raw, host)?;
    let bits = match host {
        Endian::Little => u64::from_le_bytes(bytes),
        Endian::Big => u64::from_be_bytes(bytes),
    };
    Ok(parse(bits as u128, &DECIMAL64))
}

/// [`decode_dec_float34`] as read by a host of the given byte order.
pub fn decode_dec_float34_in(raw: &[u8], host: Endian) -> Result<DecFloat, FormatError> {
    let bytes = host_bytes::<16>(raw, host)?;
    let bits = match host {
        Endian::Little => u128::from_le_bytes(bytes),
        Endian::Big => u128::from_be_bytes(bytes),
    };
    Ok(parse(bits, &DECIMAL128))
}

/// [`decode_int128`] as read by a host of the given byte order.
pub fn decode_int128_in(raw: &[u8], host: Endian) -> Result<i128, FormatError> {
    let bytes = host_bytes::<16>(raw, host)?;
    Ok(match host {
        Endian::Little => i128::from_le_bytes(bytes),
        Endian::Big => i128::from_be_bytes(bytes),
    })
}

/// Parse densely packed decimal interchange bits.
///
/// Layout from the most significant bit: sign, 5 bit combination field,
/// exponent continuation, then coefficient continuation in 10 bit declets.
fn parse(bits: u128, format: &Format) -> DecFloat {
    let negative = bits >> (format.bits - 1) & 1 == 1;
    let combination = (bits >> (format.bits - 6) & 0b11111) as u32;

    let continuation_shift = format.declets * 10;
    let continuation_mask = (1u128 << format.exponent_continuation) - 1;
    let continuation = (bits >> continuation_shift & continuation_mask) as u32;

    match combination {
        COMBINATION_INFINITY => return DecFloat::Infinite { negative },
        COMBINATION_NAN => {
            let signaling = continuation >> (format.exponent_continuation - 1) & 1 == 1;
            return DecFloat::NaN { negative, signaling };
        }
        _ => {}
    }

    // combination `11xxy` carries a large leading digit `8 + y`
    let (exponent_msb, leading) = if combination >> 3 == 0b11 {
        (combination >> 1 & 0b11, 8 + (combination & 1))
    } else {
        (combination >> 3, combination & 0b111)
    };

    let exponent = (exponent_msb << format.exponent_continuation | continuation) as i32 - format.bias;

    let mut coefficient = leading as u128;
    for i in (0..format.declets).rev() {
        let declet = (bits >> (i * 10) & 0x3ff) as u16;
        coefficient = coefficient * 1000 + decode_declet(declet) as u128;
    }

    DecFloat::Finite { negative, coefficient, exponent }
}

/// Decode one 10 bit declet `pqr stu v wxy` into 3 decimal digits.
fn decode_declet(declet: u16) -> u16 {
    let bit = |n: u16| declet >> n & 1;
    let (r, u, y) = (bit(7), bit(4), bit(0));
    let pqr = declet >> 7 & 0b111;
    let stu = declet >> 4 & 0b111;
    let wxy = declet & 0b111;
    let pq = declet >> 8 & 0b11;
    let st = declet >> 5 & 0b11;

    let (d2, d1, d0) = if bit(3) == 0 {
        (pqr, stu, wxy)
    } else {
        match (declet >> 1 & 0b11, st) {
            (0b00, _) => (pqr, stu, 8 + y),
            (0b01, _) => (pqr, 8 + u, st << 1 | y),
            (0b10, _) => (8 + r, stu, pq << 1 | y),
            (_, 0b00) => (8 + r, 8 + u, pq << 1 | y),
            (_, 0b01) => (8 + r, pq << 1 | u, 8 + y),
            (_, 0b10) => (pqr, 8 + u, 8 + y),
            _ => (8 + r, 8 + u, 8 + y),
        }
    };

    d2 * 100 + d1 * 10 + d0
}

#[cfg(test)]
mod test {
    use super::*;

    fn finite(negative: bool, coefficient: u128, exponent: i32) -> DecFloat {
        DecFloat::Finite { negative, coefficient, exponent }
    }

    /// Reference encoder for a declet.
    fn encode_declet(n: u16) -> u16 {
        let (d2, d1, d0) = (n / 100, n / 10 % 10, n % 10);
        let (a, e, i) = (d2 >> 3, d1 >> 3, d0 >> 3);
        let (b, c, d) = (d2 >> 2 & 1, d2 >> 1 & 1, d2 & 1);
        let (f, g, h) = (d1 >> 2 & 1, d1 >> 1 & 1, d1 & 1);
        let (j, k, m) = (d0 >> 2 & 1, d0 >> 1 & 1, d0 & 1);
        let bits: [u16; 10] = match (a, e, i) {
            (0, 0, 0) => [b, c, d, f, g, h, 0, j, k, m],
            (0, 0, 1) => [b, c, d, f, g, h, 1, 0, 0, m],
            (0, 1, 0) => [b, c, d, j, k, h, 1, 0, 1, m],
            (0, 1, 1) => [b, c, d, 1, 0, h, 1, 1, 1, m],
            (1, 0, 0) => [j, k, d, f, g, h, 1, 1, 0, m],
            (1, 0, 1) => [f, g, d, 0, 1, h, 1, 1, 1, m],
            (1, 1, 0) => [j, k, d, 0, 0, h, 1, 1, 1, m],
            _ => [0, 0, d, 1, 1, h, 1, 1, 1, m],
        };
        bits.iter().fold(0, |acc, b| acc << 1 | b)
    }

    #[test]
    fn declets() {
        assert_eq!(decode_declet(0x000), 0);
        assert_eq!(decode_declet(0x3d0), 750);
        assert_eq!(decode_declet(0x0ff), 999);
        // non canonical encodings of 999
        assert_eq!(decode_declet(0x2ff), 999);
        assert_eq!(decode_declet(0x3ff), 999);
        for n in 0..1000 {
            assert_eq!(decode_declet(encode_declet(n)), n, "declet {n}");
        }
    }

    #[test]
    fn dec_float16_values() {
        let one = [0x22, 0x38, 0, 0, 0, 0, 0, 0x01];
        let neg = [0xa2, 0x30, 0, 0, 0, 0, 0x03, 0xd0];
        let max = [0x6e, 0x38, 0xff, 0x3f, 0xcf, 0xf3, 0xfc, 0xff];
        assert_eq!(decode_dec_float16_in(&one, Endian::Big).unwrap(), finite(false, 1, 0));
        assert_eq!(decode_dec_float16_in(&neg, Endian::Big).unwrap(), finite(true, 750, -2));
        assert_eq!(
            decode_dec_float16_in(&max, Endian::Big).unwrap(),
            finite(false, 9_999_999_999_999_999, 0),
        );
    }

    #[test]
    fn dec_float34_values() {
        let mut one = [0u8; 16];
        one[0] = 0x22;
        one[1] = 0x08;
        one[15] = 0x01;
        assert_eq!(decode_dec_float34_in(&one, Endian::Big).unwrap(), finite(false, 1, 0));

        let mut inf = [0u8; 16];
        inf[0] = 0xf8;
        assert_eq!(
            decode_dec_float34_in(&inf, Endian::Big).unwrap(),
            DecFloat::Infinite { negative: true },
        );
    }

    #[test]
    fn special_values() {
        let inf = [0x78, 0, 0, 0, 0, 0, 0, 0];
        let nan = [0x7c, 0, 0, 0, 0, 0, 0, 0];
        let snan = [0x7e, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            decode_dec_float16_in(&inf, Endian::Big).unwrap(),
            DecFloat::Infinite { negative: false },
        );
        assert_eq!(
            decode_dec_float16_in(&nan, Endian::Big).unwrap(),
            DecFloat::NaN { negative: false, signaling: false },
        );
        assert_eq!(
            decode_dec_float16_in(&snan, Endian::Big).unwrap(),
            DecFloat::NaN { negative: false, signaling: true },
        );
    }

    #[test]
    fn host_order_independent() {
        let raw16 = [0xa2, 0x30, 0, 0, 0, 0, 0x03, 0xd0];
        assert_eq!(
            decode_dec_float16_in(&raw16, Endian::Big).unwrap(),
            decode_dec_float16_in(&raw16, Endian::Little).unwrap(),
        );

        let mut raw34 = [0u8; 16];
        raw34[0] = 0x22;
        raw34[1] = 0x08;
        raw34[14] = 0x03;
        raw34[15] = 0xd0;
        assert_eq!(
            decode_dec_float34_in(&raw34, Endian::Big).unwrap(),
            decode_dec_float34_in(&raw34, Endian::Little).unwrap(),
        );
        assert_eq!(decode_dec_float34(&raw34).unwrap(), finite(false, 750, 0));

        let int = [0x80, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        assert_eq!(
            decode_int128_in(&int, Endian::Big).unwrap(),
            decode_int128_in(&int, Endian::Little).unwrap(),
        );
    }

    #[test]
    fn int128() {
        assert_eq!(decode_int128_in(&[0; 16], Endian::Little).unwrap(), 0);
        assert_eq!(decode_int128_in(&[0xff; 16], Endian::Little).unwrap(), -1);
        let mut raw = [0u8; 16];
        raw[15] = 1;
        assert_eq!(decode_int128(&raw).unwrap(), 1);
        raw[0] = 0x80;
        assert_eq!(decode_int128(&raw).unwrap(), i128::MIN + 1);
        assert!(decode_int128(&raw[..15]).is_err());
    }

    #[test]
    fn wrong_length() {
        assert_eq!(
            decode_dec_float16(&[0; 16]).unwrap_err(),
            FormatError::Length { expected: 8, found: 16 },
        );
        assert_eq!(
            decode_dec_float34(&[0; 8]).unwrap_err(),
            FormatError::Length { expected: 16, found: 8 },
        );
    }

    #[test]
    fn display() {
        assert_eq!(finite(true, 750, -2).to_string(), "-750E-2");
        assert_eq!(finite(false, 42, 0).to_string(), "42");
        assert_eq!(DecFloat::Infinite { negative: true }.to_string(), "-Infinity");
        assert_eq!(DecFloat::NaN { negative: false, signaling: true }.to_string(), "sNaN");
    }

    #[test]
    fn to_decimal() {
        assert_eq!(finite(true, 750, -2).to_decimal(), Some(Decimal::new(-750, 2)));
        assert_eq!(finite(false, 12, 3).to_decimal(), Some(Decimal::new(12_000, 0)));
        assert_eq!(finite(false, 1, 6000).to_decimal(), None);
        assert_eq!(DecFloat::Infinite { negative: false }.to_decimal(), None);
    }
}
