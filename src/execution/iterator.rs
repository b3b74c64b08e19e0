//! Row iterators
//!
//! A row iterator is a single-pass, single-owner cursor. `next` yields
//! `Ok(Some(row))`, `Ok(None)` at end of stream, or an error. `close` releases
//! whatever the iterator (and any child iterator it opened) holds.

use crate::common::error::PrismResult;
use crate::execution::span::SpanGuard;
use crate::types::Row;

/// Pull-based row cursor
pub trait RowIter: Send {
    /// Produce the next row, or `None` once the stream is exhausted
    fn next(&mut self) -> PrismResult<Option<Row>>;

    /// Release resources held by this iterator and its children
    fn close(&mut self) -> PrismResult<()>;
}

/// Boxed row iterator
pub type BoxedRowIter = Box<dyn RowIter>;

impl RowIter for BoxedRowIter {
    fn next(&mut self) -> PrismResult<Option<Row>> {
        (**self).next()
    }

    fn close(&mut self) -> PrismResult<()> {
        (**self).close()
    }
}

/// Iterator over rows already held in memory
#[derive(Debug, Default)]
pub struct MemoryRowIter {
    rows: std::vec::IntoIter<Row>,
}

impl MemoryRowIter {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl RowIter for MemoryRowIter {
    fn next(&mut self) -> PrismResult<Option<Row>> {
        Ok(self.rows.next())
    }

    fn close(&mut self) -> PrismResult<()> {
        Ok(())
    }
}

/// Wraps an iterator and finishes its span when the iterator is closed
#[derive(Debug)]
pub struct SpanIter<I> {
    span: SpanGuard,
    inner: I,
}

impl<I: RowIter> SpanIter<I> {
    pub fn new(span: SpanGuard, inner: I) -> Self {
        Self { span, inner }
    }
}

impl<I: RowIter> RowIter for SpanIter<I> {
    fn next(&mut self) -> PrismResult<Option<Row>> {
        self.inner.next()
    }

    fn close(&mut self) -> PrismResult<()> {
        let result = self.inner.close();
        self.span.finish();
        result
    }
}

/// Drain an iterator into a vector, closing it afterwards.
/// The iterator is closed even when `next` fails; the `next` error wins.
pub fn collect_rows(mut iter: BoxedRowIter) -> PrismResult<Vec<Row>> {
    let mut rows = Vec::new();
    let drained = loop {
        match iter.next() {
            Ok(Some(row)) => rows.push(row),
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    let closed = iter.close();
    drained?;
    closed?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::PrismError;
    use crate::execution::span::testing::RecordingTracer;
    use crate::execution::span::Tracer;
    use crate::row;

    struct FailingIter {
        closed: bool,
    }

    impl RowIter for FailingIter {
        fn next(&mut self) -> PrismResult<Option<Row>> {
            Err(PrismError::Execution("disk on fire".to_string()))
        }

        fn close(&mut self) -> PrismResult<()> {
            self.closed = true;
            Ok(())
        }
    }

    #[test]
    fn test_collect_rows() -> PrismResult<()> {
        let rows = collect_rows(Box::new(MemoryRowIter::new(vec![row![1], row![2]])))?;
        assert_eq!(rows, vec![row![1], row![2]]);
        Ok(())
    }

    #[test]
    fn test_collect_rows_surfaces_next_error() {
        let err = collect_rows(Box::new(FailingIter { closed: false })).unwrap_err();
        assert!(matches!(err, PrismError::Execution(msg) if msg == "disk on fire"));
    }

    #[test]
    fn test_span_iter_finishes_on_close() -> PrismResult<()> {
        let tracer = RecordingTracer::default();
        let span = SpanGuard::new("scan", tracer.start_span("scan", &[]));
        let mut iter = SpanIter::new(span, MemoryRowIter::new(vec![row![1]]));

        assert_eq!(iter.next()?, Some(row![1]));
        assert!(tracer.log.lock().finished.is_empty());
        iter.close()?;
        assert_eq!(tracer.log.lock().finished, vec!["scan".to_string()]);
        Ok(())
    }
}
