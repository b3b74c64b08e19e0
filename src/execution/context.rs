//! Execution Context
//!
//! Carries the catalog, the session's current database and the span factory
//! through every rule application and iterator construction.

use crate::catalog::Catalog;
use crate::execution::span::{SpanGuard, Tracer, TracingTracer};
use std::sync::Arc;

/// Context for analysis and query execution
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Catalog used to resolve names
    pub catalog: Arc<Catalog>,
    /// Database selected for the session, if any
    current_database: Option<String>,
    /// Span factory
    tracer: Arc<dyn Tracer>,
}

impl ExecutionContext {
    /// Create a new execution context with no database selected
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            current_database: None,
            tracer: Arc::new(TracingTracer),
        }
    }

    /// Select the current database
    pub fn with_current_database(mut self, database: impl Into<String>) -> Self {
        self.current_database = Some(database.into());
        self
    }

    /// Replace the span factory
    pub fn with_tracer(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    /// Get the current database
    pub fn current_database(&self) -> Option<&str> {
        self.current_database.as_deref()
    }

    /// Set the current database
    pub fn set_current_database(&mut self, database: Option<String>) {
        self.current_database = database;
    }

    /// Open a span without tags
    pub fn span(&self, label: &str) -> SpanGuard {
        self.span_with_tags(label, &[])
    }

    /// Open a span carrying key/value tags
    pub fn span_with_tags(&self, label: &str, tags: &[(&str, String)]) -> SpanGuard {
        SpanGuard::new(label, self.tracer.start_span(label, tags))
    }
}
