use time::{Date, Month, Time};

use super::FormatError;

/// Time units per second, the wire time is in ten-thousandths of a second.
pub(crate) const TIME_UNITS_PER_SECOND: i32 = 10_000;

/// Nanoseconds per wire time unit.
pub(crate) const NANOS_PER_TIME_UNIT: u32 = 100_000;

const SECONDS_PER_DAY: i32 = 86_400;

/// Decode a day count into calendar date.
///
/// Day `0` is `1858-11-17`. The arithmetic is the classical julian day
/// conversion working on march based years, with the same truncating integer
/// division the server uses, so it must not be "simplified".
pub fn decode_date(raw: i32) -> Result<Date, FormatError> {
    let mut sql_date = raw as i64;

    sql_date -= 1_721_119 - 2_400_001;
    let century = (4 * sql_date - 1) / 146_097;
    sql_date = 4 * sql_date - 1 - 146_097 * century;
    let mut day = sql_date / 4;

    sql_date = (4 * day + 3) / 1_461;
    day = 4 * day + 3 - 1_461 * sql_date;
    day = (day + 4) / 4;

    let mut month = (5 * day - 3) / 153;
    day = 5 * day - 3 - 153 * month;
    day = (day + 5) / 5;

    let mut year = 100 * century + sql_date;

    if month < 10 {
        month += 3;
    } else {
        month -= 9;
        year += 1;
    }

    let year = i32::try_from(year).map_err(|_| FormatError::OutOfRange("year"))?;
    let month = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(FormatError::OutOfRange("month"))?;
    let day = u8::try_from(day).map_err(|_| FormatError::OutOfRange("day"))?;

    Date::from_calendar_date(year, month, day).map_err(|_| FormatError::OutOfRange("date"))
}

/// Decode ten-thousandths of a second since midnight into time of day.
pub fn decode_time(raw: i32) -> Result<Time, FormatError> {
    if !(0..SECONDS_PER_DAY * TIME_UNITS_PER_SECOND).contains(&raw) {
        return Err(FormatError::OutOfRange("time of day"));
    }

    let secs = raw / TIME_UNITS_PER_SECOND;
    let frac = (raw % TIME_UNITS_PER_SECOND) as u32;

    Time::from_hms_nano(
        (secs / 3600) as u8,
        (secs / 60 % 60) as u8,
        (secs % 60) as u8,
        frac * NANOS_PER_TIME_UNIT,
    )
    .map_err(|_| FormatError::OutOfRange("time of day"))
}

#[cfg(test)]
mod test {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn epoch() {
        assert_eq!(decode_date(0).unwrap(), date!(1858 - 11 - 17));
        assert_eq!(decode_date(-1).unwrap(), date!(1858 - 11 - 16));
        assert_eq!(decode_date(1).unwrap(), date!(1858 - 11 - 18));
    }

    #[test]
    fn reference_dates() {
        // modified julian day numbers
        let vectors = [
            (15_078, date!(1900 - 02 - 28)),
            (15_079, date!(1900 - 03 - 01)),
            (40_587, date!(1970 - 01 - 01)),
            (51_543, date!(1999 - 12 - 31)),
            (51_544, date!(2000 - 01 - 01)),
            (51_603, date!(2000 - 02 - 29)),
            (60_369, date!(2024 - 02 - 29)),
        ];
        for (raw, expected) in vectors {
            assert_eq!(decode_date(raw).unwrap(), expected, "day {raw}");
        }
    }

    #[test]
    fn date_agrees_with_julian_day() {
        // julian day = modified julian day + 2400001
        for raw in (-600_000..2_000_000).step_by(997) {
            let expected = Date::from_julian_day(raw + 2_400_001).unwrap();
            assert_eq!(decode_date(raw).unwrap(), expected, "day {raw}");
        }
    }

    #[test]
    fn date_out_of_range() {
        assert_eq!(decode_date(i32::MAX).unwrap_err(), FormatError::OutOfRange("date"));
    }

    #[test]
    fn time_of_day() {
        assert_eq!(decode_time(0).unwrap(), Time::MIDNIGHT);
        assert_eq!(decode_time(1).unwrap(), time!(0:00:00.0001));
        assert_eq!(decode_time(453_015_000).unwrap(), time!(12:35:01.5));
        assert_eq!(decode_time(863_999_999).unwrap(), time!(23:59:59.9999));
    }

    #[test]
    fn time_within_one_day() {
        assert!(decode_time(864_000_000).is_err());
        assert!(decode_time(-1).is_err());
    }
}
