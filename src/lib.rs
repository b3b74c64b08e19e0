//! Prism Analyzer - plan resolution and streaming execution
//!
//! Prism Analyzer takes the unresolved logical plan produced by a SQL parser,
//! binds its table references and function calls against a catalog, and runs
//! the resolved plan through pull-based row iterators.
//!
pub mod analyzer;
pub mod catalog;
pub mod common;
pub mod execution;
pub mod expression;
pub mod planner;
pub mod types;

// Re-export the analyzer for convenience
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerRule};

// Re-export catalog system for convenience
pub use catalog::{Catalog, Database, HistoryDatabase, MemoryDatabase, MemoryTable, Table};

// Re-export common types for convenience
pub use common::{AnalyzerConfig, PrismError, PrismResult};

// Re-export execution for convenience
pub use execution::{collect_rows, BoxedRowIter, ExecutionContext, RowIter};

// Re-export expression and plan types for convenience
pub use expression::Expression;
pub use planner::{LogicalPlan, UnresolvedTable};

// Re-export type system for convenience
pub use types::{Column, LogicalType, Row, Schema, Value};
