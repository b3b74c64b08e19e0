//! Scalar Functions
//!
//! Implementations bound by the function resolution rule. Each function
//! receives already evaluated argument values.

use crate::common::error::{PrismError, PrismResult};
use crate::types::{LogicalType, Value};
use std::fmt;

/// A callable scalar function
pub trait ScalarFunction: fmt::Debug + Send + Sync {
    /// Canonical function name
    fn name(&self) -> &str;

    /// Result type for the given argument types
    fn return_type(&self, arg_types: &[LogicalType]) -> LogicalType;

    /// Evaluate the function on one row's argument values
    fn invoke(&self, args: &[Value]) -> PrismResult<Value>;
}

/// UPPER - Convert string to uppercase
#[derive(Debug, Default)]
pub struct Upper;

impl ScalarFunction for Upper {
    fn name(&self) -> &str {
        "upper"
    }

    fn return_type(&self, _arg_types: &[LogicalType]) -> LogicalType {
        LogicalType::Varchar
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        match args {
            [Value::Varchar(s)] => Ok(Value::Varchar(s.to_uppercase())),
            [Value::Null] => Ok(Value::Null),
            _ => Err(PrismError::Type("UPPER requires a string argument".to_string())),
        }
    }
}

/// LOWER - Convert string to lowercase
#[derive(Debug, Default)]
pub struct Lower;

impl ScalarFunction for Lower {
    fn name(&self) -> &str {
        "lower"
    }

    fn return_type(&self, _arg_types: &[LogicalType]) -> LogicalType {
        LogicalType::Varchar
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        match args {
            [Value::Varchar(s)] => Ok(Value::Varchar(s.to_lowercase())),
            [Value::Null] => Ok(Value::Null),
            _ => Err(PrismError::Type("LOWER requires a string argument".to_string())),
        }
    }
}

/// LENGTH - Number of characters in a string
#[derive(Debug, Default)]
pub struct Length;

impl ScalarFunction for Length {
    fn name(&self) -> &str {
        "length"
    }

    fn return_type(&self, _arg_types: &[LogicalType]) -> LogicalType {
        LogicalType::BigInt
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        match args {
            [Value::Varchar(s)] => Ok(Value::BigInt(s.chars().count() as i64)),
            [Value::Null] => Ok(Value::Null),
            _ => Err(PrismError::Type("LENGTH requires a string argument".to_string())),
        }
    }
}

/// ABS - Absolute value
#[derive(Debug, Default)]
pub struct Abs;

impl ScalarFunction for Abs {
    fn name(&self) -> &str {
        "abs"
    }

    fn return_type(&self, arg_types: &[LogicalType]) -> LogicalType {
        arg_types.first().cloned().unwrap_or(LogicalType::Invalid)
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        match args {
            [Value::Integer(v)] => v
                .checked_abs()
                .map(Value::Integer)
                .ok_or_else(|| PrismError::Execution("ABS overflow".to_string())),
            [Value::BigInt(v)] => v
                .checked_abs()
                .map(Value::BigInt)
                .ok_or_else(|| PrismError::Execution("ABS overflow".to_string())),
            [Value::Double(v)] => Ok(Value::Double(v.abs())),
            [Value::Null] => Ok(Value::Null),
            _ => Err(PrismError::Type("ABS requires a numeric argument".to_string())),
        }
    }
}

/// CONCAT - Concatenate strings; NULL if any argument is NULL
#[derive(Debug, Default)]
pub struct Concat;

impl ScalarFunction for Concat {
    fn name(&self) -> &str {
        "concat"
    }

    fn return_type(&self, _arg_types: &[LogicalType]) -> LogicalType {
        LogicalType::Varchar
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        let mut result = String::new();
        for arg in args {
            match arg {
                Value::Null => return Ok(Value::Null),
                Value::Varchar(s) => result.push_str(s),
                other => result.push_str(&other.to_string()),
            }
        }
        Ok(Value::Varchar(result))
    }
}

/// COALESCE - First non-NULL argument
#[derive(Debug, Default)]
pub struct Coalesce;

impl ScalarFunction for Coalesce {
    fn name(&self) -> &str {
        "coalesce"
    }

    fn return_type(&self, arg_types: &[LogicalType]) -> LogicalType {
        arg_types
            .iter()
            .find(|ty| **ty != LogicalType::Null)
            .cloned()
            .unwrap_or(LogicalType::Null)
    }

    fn invoke(&self, args: &[Value]) -> PrismResult<Value> {
        Ok(args
            .iter()
            .find(|value| !value.is_null())
            .cloned()
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_functions() -> PrismResult<()> {
        assert_eq!(Upper.invoke(&[Value::from("abc")])?, Value::from("ABC"));
        assert_eq!(Lower.invoke(&[Value::from("AbC")])?, Value::from("abc"));
        assert_eq!(Length.invoke(&[Value::from("héllo")])?, Value::BigInt(5));
        assert_eq!(Upper.invoke(&[Value::Null])?, Value::Null);
        assert!(Upper.invoke(&[Value::Integer(1)]).is_err());
        Ok(())
    }

    #[test]
    fn test_abs() -> PrismResult<()> {
        assert_eq!(Abs.invoke(&[Value::Integer(-3)])?, Value::Integer(3));
        assert_eq!(Abs.invoke(&[Value::Double(-1.5)])?, Value::Double(1.5));
        assert!(Abs.invoke(&[Value::Integer(i32::MIN)]).is_err());
        assert_eq!(Abs.return_type(&[LogicalType::BigInt]), LogicalType::BigInt);
        Ok(())
    }

    #[test]
    fn test_concat_and_coalesce() -> PrismResult<()> {
        assert_eq!(
            Concat.invoke(&[Value::from("a"), Value::Integer(1)])?,
            Value::from("a1")
        );
        assert_eq!(Concat.invoke(&[Value::from("a"), Value::Null])?, Value::Null);
        assert_eq!(
            Coalesce.invoke(&[Value::Null, Value::Integer(2), Value::Integer(3)])?,
            Value::Integer(2)
        );
        assert_eq!(
            Coalesce.return_type(&[LogicalType::Null, LogicalType::Varchar]),
            LogicalType::Varchar
        );
        Ok(())
    }
}
