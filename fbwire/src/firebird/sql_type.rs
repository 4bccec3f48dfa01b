/// Firebird column wire type code.
///
/// The lowest bit of a type code announced by the server marks the column
/// as nullable, use [`base`] before comparing with the constants below.
pub type SqlType = i32;

macro_rules! sql_type {
    ($($name:ident = $code:literal $(, $doc:literal)?;)*) => {
        $(
            $(#[doc = $doc])?
            pub const $name: SqlType = $code;
        )*
    };
}

sql_type! {
    SQL_VARYING = 448, "variable length string";
    SQL_TEXT = 452, "fixed length string";
    SQL_DOUBLE = 480, "double precision floating point";
    SQL_FLOAT = 482, "single precision floating point";
    SQL_LONG = 496, "32 bit integer, possibly scaled";
    SQL_SHORT = 500, "16 bit integer, possibly scaled";
    SQL_TIMESTAMP = 510, "date and time";
    SQL_BLOB = 520;
    SQL_D_FLOAT = 530, "vax double precision floating point";
    SQL_ARRAY = 540;
    SQL_QUAD = 550, "64 bit quad, possibly scaled";
    SQL_TYPE_TIME = 560, "time of day";
    SQL_TYPE_DATE = 570, "calendar date";
    SQL_INT64 = 580, "64 bit integer, possibly scaled";
    SQL_TIMESTAMP_TZ_EX = 32748;
    SQL_TIME_TZ_EX = 32750;
    SQL_INT128 = 32752, "128 bit integer";
    SQL_TIMESTAMP_TZ = 32754;
    SQL_TIME_TZ = 32756;
    SQL_DEC16 = 32760, "16 digit decimal floating point";
    SQL_DEC34 = 32762, "34 digit decimal floating point";
    SQL_BOOLEAN = 32764;
    SQL_NULL = 32766;
}

/// Strip the nullable bit.
pub const fn base(sql_type: SqlType) -> SqlType {
    sql_type & !1
}

/// Returns `true` if the nullable bit is set.
pub const fn is_nullable(sql_type: SqlType) -> bool {
    sql_type & 1 == 1
}

/// Returns `true` for integer types whose value is stored with a decimal scale.
pub const fn is_scaled_integer(sql_type: SqlType) -> bool {
    matches!(base(sql_type), SQL_SHORT | SQL_LONG | SQL_QUAD | SQL_INT64)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn nullable_bit() {
        assert_eq!(base(SQL_LONG + 1), SQL_LONG);
        assert!(is_nullable(SQL_LONG + 1));
        assert!(!is_nullable(SQL_LONG));
    }

    #[test]
    fn scaled_family() {
        for ty in [SQL_SHORT, SQL_LONG, SQL_QUAD, SQL_INT64] {
            assert!(is_scaled_integer(ty));
            assert!(is_scaled_integer(ty + 1));
        }
        for ty in [SQL_DOUBLE, SQL_FLOAT, SQL_D_FLOAT, SQL_DEC16, SQL_DEC34, SQL_INT128] {
            assert!(!is_scaled_integer(ty));
        }
    }
}
