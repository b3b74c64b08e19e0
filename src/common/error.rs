//! Error handling for the analyzer and execution core

use thiserror::Error;

/// Main error type for analysis and execution
#[derive(Error, Debug)]
pub enum PrismError {
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table {table} not found as of {as_of}")]
    TableAsOfNotFound { table: String, as_of: String },

    #[error("no database selected")]
    NoDatabaseSelected,

    #[error("database not found: {0}")]
    DatabaseNotFound(String),

    #[error("database {0} does not support AS OF queries")]
    AsOfNotSupported(String),

    #[error("{node}: invalid children number, got {given}, expected {expected}")]
    InvalidChildrenNumber {
        node: String,
        given: usize,
        expected: usize,
    },

    #[error("{node}: invalid expression number, got {given}, expected {expected}")]
    InvalidExpressionNumber {
        node: String,
        given: usize,
        expected: usize,
    },

    #[error("function {function} expects {expected} arguments, got {given}")]
    InvalidArgumentCount {
        function: String,
        given: usize,
        expected: String,
    },

    #[error("exceeded max analysis iterations ({0})")]
    MaxAnalysisIterations(usize),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrismError {
    /// Build a wrong-child-count error for the named operator
    pub fn invalid_children(node: impl Into<String>, given: usize, expected: usize) -> Self {
        PrismError::InvalidChildrenNumber {
            node: node.into(),
            given,
            expected,
        }
    }

    /// Build a wrong-expression-count error for the named operator
    pub fn invalid_expressions(node: impl Into<String>, given: usize, expected: usize) -> Self {
        PrismError::InvalidExpressionNumber {
            node: node.into(),
            given,
            expected,
        }
    }
}

/// Result type alias for convenience
pub type PrismResult<T> = std::result::Result<T, PrismError>;

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_err {
    ($msg:expr) => {
        $crate::common::error::PrismError::Internal($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::PrismError::Internal(format!($fmt, $($arg)*))
    };
}

/// Macro for creating execution errors
#[macro_export]
macro_rules! execution_err {
    ($msg:expr) => {
        $crate::common::error::PrismError::Execution($msg.to_string())
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::common::error::PrismError::Execution(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_names_operator_and_counts() {
        let err = PrismError::invalid_children("CrossJoin", 3, 2);
        assert_eq!(
            err.to_string(),
            "CrossJoin: invalid children number, got 3, expected 2"
        );
    }

    #[test]
    fn test_resolution_errors_carry_names() {
        assert!(PrismError::TableNotFound("foo".into())
            .to_string()
            .contains("foo"));
        assert!(PrismError::DatabaseNotFound("db1".into())
            .to_string()
            .contains("db1"));
        let err = PrismError::TableAsOfNotFound {
            table: "t".into(),
            as_of: "'2019-01-02'".into(),
        };
        assert_eq!(err.to_string(), "table t not found as of '2019-01-02'");
    }

    #[test]
    fn test_macros() {
        let err = internal_err!("boom {}", 1);
        assert!(matches!(err, PrismError::Internal(msg) if msg == "boom 1"));
        let err = execution_err!("stop");
        assert!(matches!(err, PrismError::Execution(msg) if msg == "stop"));
    }
}
