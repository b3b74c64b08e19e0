//! Data model shared by the analyzer and the execution layer
//!
//! Values, logical types, schemas and rows.

pub mod logical_type;
pub mod row;
pub mod schema;
pub mod value;

pub use logical_type::*;
pub use row::*;
pub use schema::*;
pub use value::*;
