//! Diagnostic spans
//!
//! Rule applications and iterator construction each open a span through the
//! context's [`Tracer`]. The returned [`SpanGuard`] finishes the span exactly
//! once, either explicitly or when it goes out of scope, so every exit path
//! (including `?` returns) releases it.

use std::fmt;

/// A span that has been opened and not yet finished
pub trait ActiveSpan: Send {
    fn finish(self: Box<Self>);
}

/// Factory for diagnostic spans
pub trait Tracer: fmt::Debug + Send + Sync {
    fn start_span(&self, label: &str, tags: &[(&str, String)]) -> Box<dyn ActiveSpan>;
}

/// Default tracer backed by the `tracing` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTracer;

struct TracingSpan {
    span: tracing::Span,
}

impl ActiveSpan for TracingSpan {
    fn finish(self: Box<Self>) {
        tracing::trace!(parent: &self.span, "span finished");
        drop(self.span);
    }
}

impl Tracer for TracingTracer {
    fn start_span(&self, label: &str, tags: &[(&str, String)]) -> Box<dyn ActiveSpan> {
        let tags = tags
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");
        let span = tracing::debug_span!("span", label = %label, tags = %tags);
        Box::new(TracingSpan { span })
    }
}

/// Scoped handle on an open span
pub struct SpanGuard {
    span: Option<Box<dyn ActiveSpan>>,
    label: String,
}

impl SpanGuard {
    pub fn new(label: impl Into<String>, span: Box<dyn ActiveSpan>) -> Self {
        Self {
            span: Some(span),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Finish the span now. Later calls (and the drop) are no-ops.
    pub fn finish(&mut self) {
        if let Some(span) = self.span.take() {
            span.finish();
        }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        self.finish();
    }
}

impl fmt::Debug for SpanGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanGuard")
            .field("label", &self.label)
            .field("finished", &self.span.is_none())
            .finish()
    }
}
