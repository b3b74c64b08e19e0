//! Execution
//!
//! Plans execute through pull-based row iterators. Every node opens its own
//! iterator, its children's iterators are opened by the parent, and closing
//! an iterator closes everything beneath it.

pub mod context;
pub mod cross_join;
pub mod iterator;
pub mod operators;
pub mod span;

pub use context::*;
pub use cross_join::CrossJoinIter;
pub use iterator::{collect_rows, BoxedRowIter, MemoryRowIter, RowIter, SpanIter};
pub use operators::{ProjectIter, TableScanIter};
pub use span::{ActiveSpan, SpanGuard, Tracer, TracingTracer};
