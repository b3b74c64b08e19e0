//! Query plans
//!
//! This module provides the plan tree the analyzer rewrites and the executor
//! walks:
//!
//! 1. **Plan nodes**: unresolved and resolved tables, projections, cross joins
//! 2. **Transformation**: bottom-up rewrites over nodes and their expressions
//! 3. **Rendering**: single-line and debug tree output

pub mod logical_plan;
pub mod transform;
pub mod tree_printer;

pub use logical_plan::*;
pub use tree_printer::TreePrinter;
