//! Expression system
//!
//! Scalar expressions embedded in plan nodes, the bottom-up rewrite over
//! them, and the built-in scalar functions.

pub mod expression;
pub mod function;
pub mod transform;

pub use expression::*;
pub use function::ScalarFunction;
