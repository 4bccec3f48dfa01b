use std::fmt;

use crate::firebird::{SqlType, sql_type};

/// Fixed point decimal, `mantissa * 10^-scale`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

impl Decimal {
    /// Create new decimal.
    pub const fn new(mantissa: i128, scale: u32) -> Self {
        Self { mantissa, scale }
    }

    /// Returns the unscaled integer.
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Returns the number of fractional digits.
    pub const fn scale(&self) -> u32 {
        self.scale
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::new(value.into(), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(self.mantissa.unsigned_abs());
        let scale = self.scale as usize;

        if self.mantissa < 0 {
            f.write_str("-")?;
        }

        if scale == 0 {
            return f.write_str(digits);
        }

        if digits.len() > scale {
            let (int, frac) = digits.split_at(digits.len() - scale);
            return write!(f, "{int}.{frac}");
        }

        f.write_str("0.")?;
        for _ in digits.len()..scale {
            f.write_str("0")?;
        }
        f.write_str(digits)
    }
}

/// Decode a scaled integer column.
///
/// The scale is only applied to the scaled integer family (`SQL_SHORT`,
/// `SQL_LONG`, `SQL_QUAD`, `SQL_INT64`), the nullable bit of `sql_type` is
/// ignored. A non negative scale leaves the value unchanged.
pub fn decode_scaled_numeric(raw: i64, scale: i16, sql_type: SqlType) -> Decimal {
    if scale < 0 && sql_type::is_scaled_integer(sql_type) {
        Decimal::new(raw.into(), scale.unsigned_abs().into())
    } else {
        Decimal::from(raw)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::firebird::sql_type::*;

    #[test]
    fn negative_scale_divides() {
        let d = decode_scaled_numeric(12345, -2, SQL_LONG);
        assert_eq!(d, Decimal::new(12345, 2));
        assert_eq!(d.to_string(), "123.45");

        for ty in [SQL_SHORT, SQL_LONG, SQL_QUAD, SQL_INT64] {
            for scale in 1..=18i16 {
                let d = decode_scaled_numeric(-7, -scale, ty + 1);
                assert_eq!(d.mantissa(), -7);
                assert_eq!(d.scale(), scale as u32);
            }
        }
    }

    #[test]
    fn non_negative_scale_unchanged() {
        assert_eq!(decode_scaled_numeric(42, 0, SQL_INT64), Decimal::new(42, 0));
        assert_eq!(decode_scaled_numeric(42, 3, SQL_SHORT), Decimal::new(42, 0));
    }

    #[test]
    fn floating_types_bypass_scale() {
        for ty in [SQL_DOUBLE, SQL_FLOAT, SQL_D_FLOAT, SQL_DEC16, SQL_DEC34] {
            assert_eq!(decode_scaled_numeric(12345, -2, ty), Decimal::new(12345, 0));
        }
    }

    #[test]
    fn display() {
        assert_eq!(Decimal::new(5, 2).to_string(), "0.05");
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(-12345, 2).to_string(), "-123.45");
        assert_eq!(Decimal::new(100, 2).to_string(), "1.00");
        assert_eq!(Decimal::new(0, 0).to_string(), "0");
        assert_eq!(Decimal::new(i64::MIN.into(), 0).to_string(), "-9223372036854775808");
    }
}
