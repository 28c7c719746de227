use std::{fmt::Display, str::FromStr};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use mysql::Value as MysqlValue;
use mysql::consts::ColumnType;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Float(f64),
    Int(i64),
    UInt(u64),
    BigDecimal(BigDecimal),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
    Null,
}

impl Display for Value {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => i.fmt(formatter),
            Value::UInt(u) => u.fmt(formatter),
            Value::Float(f) => f.fmt(formatter),
            Value::BigDecimal(b) => b.fmt(formatter),
            Value::Date(d) => d.format("%Y-%m-%d").fmt(formatter),
            Value::Timestamp(d) => d.format("%Y-%m-%d %H:%M:%S%.f").fmt(formatter),
            Value::Str(str) => str.fmt(formatter),
            Value::Bytes(bytes) => {
                write!(formatter, "0x")?;
                for b in bytes {
                    write!(formatter, "{:02x}", b)?;
                }
                Ok(())
            }
            Value::Null => write!(formatter, "NULL"),
        }
    }
}

impl Value {
    /// Converts a value received from the server, using the column type to
    /// recover numbers and dates from the text protocol. Text that would not
    /// print back unchanged is kept as received.
    pub fn from_column(value: MysqlValue, column_type: ColumnType) -> Self {
        match value {
            MysqlValue::NULL => Value::Null,
            MysqlValue::Int(i) => Value::Int(i),
            MysqlValue::UInt(u) => Value::UInt(u),
            MysqlValue::Float(f) => Value::Float(f as f64),
            MysqlValue::Double(f) => Value::Float(f),
            MysqlValue::Date(year, month, day, hour, minute, second, micros) => {
                let Some(date) = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                else {
                    return Value::Str(format!("{:04}-{:02}-{:02}", year, month, day));
                };
                if column_type == ColumnType::MYSQL_TYPE_DATE {
                    return Value::Date(date);
                }
                match date.and_hms_micro_opt(hour as u32, minute as u32, second as u32, micros) {
                    Some(timestamp) => Value::Timestamp(timestamp),
                    None => Value::Date(date),
                }
            }
            MysqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
                let hours = days * 24 + hours as u32;
                let sign = if negative { "-" } else { "" };
                if micros == 0 {
                    Value::Str(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
                } else {
                    Value::Str(format!(
                        "{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
                    ))
                }
            }
            MysqlValue::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Self::from_text(text, column_type),
                Err(err) => Value::Bytes(err.into_bytes()),
            },
        }
    }

    fn from_text(text: String, column_type: ColumnType) -> Self {
        use ColumnType::*;
        let parsed = match column_type {
            MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_INT24 | MYSQL_TYPE_LONG
            | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => i64::from_str(&text)
                .map(Value::Int)
                .ok()
                .or_else(|| u64::from_str(&text).map(Value::UInt).ok()),
            MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => f64::from_str(&text).map(Value::Float).ok(),
            MYSQL_TYPE_DECIMAL | MYSQL_TYPE_NEWDECIMAL => {
                BigDecimal::from_str(&text).map(Value::BigDecimal).ok()
            }
            MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE => NaiveDate::parse_from_str(&text, "%Y-%m-%d")
                .map(Value::Date)
                .ok(),
            MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2 | MYSQL_TYPE_TIMESTAMP
            | MYSQL_TYPE_TIMESTAMP2 => {
                NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f")
                    .map(Value::Timestamp)
                    .ok()
            }
            _ => None,
        };
        // A typed value must print exactly as the server sent it.
        parsed
            .filter(|value| value.to_string() == text)
            .unwrap_or(Value::Str(text))
    }
}

#[cfg(test)]
impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}
