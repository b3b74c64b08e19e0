//! Constants used throughout the analyzer

/// Name of the built-in single row pseudo-table
pub const DUAL_TABLE_NAME: &str = "dual";

/// Column name of the dual table
pub const DUAL_COLUMN_NAME: &str = "dummy";

/// Value stored in the single dual row
pub const DUAL_ROW_VALUE: &str = "x";

/// Upper bound on analyzer passes before giving up on a fixed point
pub const DEFAULT_MAX_ANALYSIS_ITERATIONS: usize = 1000;

/// Span label for cross join iterator construction
pub const CROSS_JOIN_SPAN: &str = "plan.CrossJoin";
