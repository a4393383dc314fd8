//! Row decoding into column → value records

use std::error::Error;
use std::fmt::Write;
use std::net::IpAddr;

use crate::error::{StmtError, StmtResult};
use rust_decimal::Decimal;
use serde_json::Value;
use tokio_postgres::Row;
use tokio_postgres::types::{FromSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// One fetched row: column name → value, in column order.
pub type Record = serde_json::Map<String, Value>;

/// Decode every column of a PostgreSQL row.
///
/// Numbers, booleans, text and JSON map to their JSON counterparts. `NUMERIC`,
/// temporal types, UUIDs and addresses become strings, `BYTEA` becomes `\x`-prefixed
/// hex and one-dimensional arrays of common scalars become JSON arrays. `NULL`
/// becomes [`Value::Null`]. Any other type is rendered from its wire bytes: as text
/// when they are valid UTF-8, as hex otherwise.
pub fn record_from_row(row: &Row) -> StmtResult<Record> {
    let mut record = Record::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let name = column.name();
        let raw = row
            .try_get::<_, Option<RawColumn<'_>>>(idx)
            .map_err(|e| StmtError::decode(name, e.to_string()))?;
        let value = decode_value(column.type_(), raw.map(|r| r.0))
            .map_err(|e| StmtError::decode(name, e.to_string()))?;
        record.insert(name.to_string(), value);
    }
    Ok(record)
}

/// Wire bytes of one column, accepted for any type.
struct RawColumn<'a>(&'a [u8]);

impl<'a> FromSql<'a> for RawColumn<'a> {
    fn from_sql(_: &Type, raw: &'a [u8]) -> Result<Self, BoxError> {
        Ok(Self(raw))
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

fn decode_value(ty: &Type, raw: Option<&[u8]>) -> Result<Value, BoxError> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let value = match *ty {
        Type::BOOL => Value::from(bool::from_sql(ty, raw)?),
        Type::INT2 => Value::from(i16::from_sql(ty, raw)?),
        Type::INT4 => Value::from(i32::from_sql(ty, raw)?),
        Type::INT8 => Value::from(i64::from_sql(ty, raw)?),
        Type::OID => Value::from(u32::from_sql(ty, raw)?),
        Type::FLOAT4 => Value::from(f32::from_sql(ty, raw)?),
        Type::FLOAT8 => Value::from(f64::from_sql(ty, raw)?),
        Type::NUMERIC => Value::from(Decimal::from_sql(ty, raw)?.to_string()),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            Value::from(String::from_sql(ty, raw)?)
        }
        Type::JSON | Type::JSONB => Value::from_sql(ty, raw)?,
        Type::UUID => Value::from(uuid::Uuid::from_sql(ty, raw)?.to_string()),
        Type::TIMESTAMP => Value::from(chrono::NaiveDateTime::from_sql(ty, raw)?.to_string()),
        Type::TIMESTAMPTZ => {
            Value::from(chrono::DateTime::<chrono::Utc>::from_sql(ty, raw)?.to_rfc3339())
        }
        Type::DATE => Value::from(chrono::NaiveDate::from_sql(ty, raw)?.to_string()),
        Type::TIME => Value::from(chrono::NaiveTime::from_sql(ty, raw)?.to_string()),
        Type::INET => Value::from(IpAddr::from_sql(ty, raw)?.to_string()),
        Type::BYTEA => Value::from(hex(raw)),
        Type::BOOL_ARRAY => Value::from(Vec::<Option<bool>>::from_sql(ty, raw)?),
        Type::INT2_ARRAY => Value::from(Vec::<Option<i16>>::from_sql(ty, raw)?),
        Type::INT4_ARRAY => Value::from(Vec::<Option<i32>>::from_sql(ty, raw)?),
        Type::INT8_ARRAY => Value::from(Vec::<Option<i64>>::from_sql(ty, raw)?),
        Type::FLOAT8_ARRAY => Value::from(Vec::<Option<f64>>::from_sql(ty, raw)?),
        Type::TEXT_ARRAY | Type::VARCHAR_ARRAY => {
            Value::from(Vec::<Option<String>>::from_sql(ty, raw)?)
        }
        _ => match std::str::from_utf8(raw) {
            Ok(text) => Value::from(text),
            Err(_) => Value::from(hex(raw)),
        },
    };
    Ok(value)
}

fn hex(raw: &[u8]) -> String {
    let mut out = String::with_capacity(2 + raw.len() * 2);
    out.push_str("\\x");
    for byte in raw {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(ty: &Type, raw: &[u8]) -> Value {
        decode_value(ty, Some(raw)).unwrap()
    }

    #[test]
    fn null_is_null_for_any_type() {
        assert_eq!(decode_value(&Type::NUMERIC, None).unwrap(), Value::Null);
        assert_eq!(decode_value(&Type::INT4, None).unwrap(), Value::Null);
    }

    #[test]
    fn scalars_decode_from_wire_bytes() {
        assert_eq!(decode(&Type::INT4, &[0, 0, 0, 42]), json!(42));
        assert_eq!(decode(&Type::BOOL, &[1]), json!(true));
        assert_eq!(decode(&Type::TEXT, b"ann"), json!("ann"));
    }

    #[test]
    fn numeric_becomes_a_decimal_string() {
        // 12.50: two base-10000 digits [12, 5000], weight 0, positive, scale 2.
        let raw: [u8; 12] = [0, 2, 0, 0, 0, 0, 0, 2, 0, 12, 0x13, 0x88];
        assert_eq!(decode(&Type::NUMERIC, &raw), json!("12.50"));
    }

    #[test]
    fn time_and_bytea_are_rendered_as_text() {
        // One hour in microseconds.
        let raw = 3_600_000_000_i64.to_be_bytes();
        assert_eq!(decode(&Type::TIME, &raw), json!("01:00:00"));
        assert_eq!(decode(&Type::BYTEA, &[0xde, 0xad]), json!("\\xdead"));
    }

    #[test]
    fn other_types_fall_back_to_their_bytes() {
        assert_eq!(decode(&Type::XML, b"<a/>"), json!("<a/>"));
        assert_eq!(
            decode(&Type::MACADDR, &[0, 0xff, 0x10, 0, 0, 1]),
            json!("\\x00ff10000001")
        );
    }

    #[test]
    fn malformed_bytes_are_an_error() {
        assert!(decode_value(&Type::INT4, Some(&[0_u8, 1][..])).is_err());
    }
}
