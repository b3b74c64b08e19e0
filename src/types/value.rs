//! Typed scalar values
//!
//! Values carry their own type. Strings can also be read as timestamps,
//! which is how AS OF snapshots are compared.

use crate::common::error::{PrismError, PrismResult};
use crate::types::logical_type::LogicalType;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single value with type information
/// Values are the fundamental unit of data in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value (type is stored separately)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Integer(i32),
    /// 64-bit signed integer
    BigInt(i64),
    /// 64-bit double precision
    Double(f64),
    /// String value
    Varchar(String),
    /// Timestamp value (microseconds since 1970-01-01 00:00:00 UTC)
    Timestamp(i64),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the logical type of this value
    pub fn get_type(&self) -> LogicalType {
        match self {
            Value::Null => LogicalType::Null,
            Value::Boolean(_) => LogicalType::Boolean,
            Value::Integer(_) => LogicalType::Integer,
            Value::BigInt(_) => LogicalType::BigInt,
            Value::Double(_) => LogicalType::Double,
            Value::Varchar(_) => LogicalType::Varchar,
            Value::Timestamp(_) => LogicalType::Timestamp,
        }
    }

    /// Check whether this value can be stored in a column of the given type
    pub fn fits(&self, data_type: &LogicalType) -> bool {
        match (self, data_type) {
            (Value::Null, _) => true,
            (Value::Integer(_), LogicalType::BigInt) => true,
            (value, ty) => &value.get_type() == ty,
        }
    }

    /// Interpret the value as a point in time, in microseconds since the epoch.
    /// Strings are accepted as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
    pub fn to_timestamp_micros(&self) -> PrismResult<i64> {
        match self {
            Value::Timestamp(micros) => Ok(*micros),
            Value::BigInt(micros) => Ok(*micros),
            Value::Varchar(s) => {
                let parsed = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .or_else(|_| {
                        NaiveDate::parse_from_str(s, "%Y-%m-%d")
                            .map(|date| date.and_hms_opt(0, 0, 0).unwrap_or_default())
                    })
                    .map_err(|_| PrismError::Type(format!("cannot interpret '{}' as a timestamp", s)))?;
                Ok(parsed.and_utc().timestamp_micros())
            }
            other => Err(PrismError::Type(format!(
                "cannot interpret {} as a timestamp",
                other.get_type()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::BigInt(value) => write!(f, "{}", value),
            Value::Double(value) => write!(f, "{}", value),
            Value::Varchar(value) => write!(f, "'{}'", value),
            Value::Timestamp(value) => match chrono::DateTime::from_timestamp_micros(*value) {
                Some(ts) => write!(f, "TIMESTAMP('{}')", ts.naive_utc()),
                None => write!(f, "TIMESTAMP({})", value),
            },
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::BigInt(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Varchar(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Varchar(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}
