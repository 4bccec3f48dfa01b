//! Scalar wire encoding.
//!
//! The inverse of [`decode`][crate::decode], used when sending parameters.
use bytes::BufMut;
use time::{Date, Time};
use uuid::Uuid;

use crate::decode::GUID_LEN;

/// Encode calendar date into day count since `1858-11-17`.
pub fn encode_date(date: Date) -> i32 {
    let day = date.day() as i32;
    let mut month = date.month() as i32;
    let mut year = date.year();

    if month > 2 {
        month -= 3;
    } else {
        month += 9;
        year -= 1;
    }

    let century = year / 100;
    let ya = year - 100 * century;

    (146_097 * century) / 4
        + (1_461 * ya) / 4
        + (153 * month + 2) / 5
        + day
        + 1_721_119
        - 2_400_001
}

/// Encode time of day into ten-thousandths of a second since midnight.
///
/// Precision below 100 microseconds is truncated.
pub fn encode_time(time: Time) -> i32 {
    use crate::decode::calendar::{NANOS_PER_TIME_UNIT, TIME_UNITS_PER_SECOND};

    let (h, m, s, nanos) = time.as_hms_nano();
    let secs = h as i32 * 3600 + m as i32 * 60 + s as i32;
    secs * TIME_UNITS_PER_SECOND + (nanos / NANOS_PER_TIME_UNIT) as i32
}

/// Encode boolean.
pub fn encode_boolean(value: bool) -> [u8; 1] {
    [value as u8]
}

/// Encode 4 byte big endian integer.
pub fn encode_int32(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Encode 8 byte big endian integer.
pub fn encode_int64(value: i64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Encode 128 bit integer in wire order.
pub fn encode_int128(value: i128) -> [u8; 16] {
    value.to_be_bytes()
}

/// Encode GUID with its mixed endian layout.
pub fn encode_guid(guid: &Uuid) -> [u8; GUID_LEN] {
    let (d1, d2, d3, d4) = guid.as_fields();
    let mut out = [0u8; GUID_LEN];
    let mut buf = &mut out[..];
    buf.put_u32(d1);
    buf.put_u16(d2);
    buf.put_u16(d3);
    buf.put_slice(d4);
    out
}
