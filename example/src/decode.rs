use fbwire::{
    FromWire, Result,
    decode::{self, DecFloat},
    encode,
    firebird::sql_type::{SQL_INT64, SQL_LONG},
};
use time::macros::date;

pub fn main() -> Result<()> {
    assert_eq!(decode::decode_int32(&[0xff, 0xff, 0xff, 0xfe])?, -2);
    assert_eq!(i64::from_wire(&encode::encode_int64(1 << 40))?, 1 << 40);
    assert!(decode::decode_int16(&[1, 2, 3]).is_err());

    let raw = encode::encode_date(date!(2024 - 02 - 29));
    assert_eq!(raw, 60_369);
    assert_eq!(decode::decode_date(raw)?, date!(2024 - 02 - 29));
    tracing::info!(time = %decode::decode_time(453_015_000)?, "time");

    let price = decode::decode_scaled_numeric(-12345, -2, SQL_LONG + 1);
    assert_eq!(price.to_string(), "-123.45");
    let count = decode::decode_scaled_numeric(7, 0, SQL_INT64);
    assert_eq!(count.to_string(), "7");

    let value = decode::decode_dec_float16(&[0xa2, 0x30, 0, 0, 0, 0, 0x03, 0xd0])?;
    assert_eq!(value.to_string(), "-750E-2");
    tracing::info!(%value, decimal = ?value.to_decimal().map(|d| d.to_string()), "decfloat");

    let nan = decode::decode_dec_float34(&[0x7c; 16])?;
    assert!(matches!(nan, DecFloat::NaN { signaling: false, .. }));

    let guid = uuid_bytes();
    tracing::info!(guid = %decode::decode_guid(&guid)?, "guid");

    Ok(())
}

fn uuid_bytes() -> [u8; 16] {
    let mut guid = [0u8; 16];
    for (i, b) in guid.iter_mut().enumerate() {
        *b = i as u8;
    }
    guid
}
