//! SQL-level column and value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical types represent the SQL-level types that users interact with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// Type not yet known (unresolved expressions)
    Invalid,
    /// NULL type
    Null,
    /// Boolean type (TRUE/FALSE)
    Boolean,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    BigInt,
    /// 64-bit double precision
    Double,
    /// Variable length string
    Varchar,
    /// Timestamp value (microseconds since 1970-01-01 00:00:00 UTC)
    Timestamp,
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogicalType::Invalid => "INVALID",
            LogicalType::Null => "NULL",
            LogicalType::Boolean => "BOOLEAN",
            LogicalType::Integer => "INTEGER",
            LogicalType::BigInt => "BIGINT",
            LogicalType::Double => "DOUBLE",
            LogicalType::Varchar => "VARCHAR",
            LogicalType::Timestamp => "TIMESTAMP",
        };
        write!(f, "{}", name)
    }
}
