//! Execution Operators
//!
//! Iterator constructors for table scans and projections.

use crate::common::error::PrismResult;
use crate::execution::context::ExecutionContext;
use crate::execution::iterator::{BoxedRowIter, RowIter, SpanIter};
use crate::expression::Expression;
use crate::planner::{Projection, ResolvedTable};
use crate::types::Row;

/// Table scan iterator: the table's own iterator inside a span
pub type TableScanIter = SpanIter<BoxedRowIter>;

/// Open a scan over a resolved table, handing it the outer row
pub fn table_scan_iter(
    table: &ResolvedTable,
    ctx: &ExecutionContext,
    row: &Row,
) -> PrismResult<BoxedRowIter> {
    let span = ctx.span_with_tags("plan.ResolvedTable", &[("table", table.table.name().to_string())]);
    let iter = table.table.scan(ctx, row)?;
    let scan: TableScanIter = SpanIter::new(span, iter);
    Ok(Box::new(scan))
}

/// Open a projection over its input. The outer row is passed through to the
/// input unchanged.
pub fn projection_iter(
    projection: &Projection,
    ctx: &ExecutionContext,
    row: &Row,
) -> PrismResult<BoxedRowIter> {
    let span = ctx.span("plan.Project");
    let child = projection.input.row_iter(ctx, row)?;
    Ok(Box::new(SpanIter::new(
        span,
        ProjectIter {
            expressions: projection.expressions.clone(),
            child,
        },
    )))
}

/// Evaluates the projection expressions on every input row
pub struct ProjectIter {
    expressions: Vec<Expression>,
    child: BoxedRowIter,
}

impl RowIter for ProjectIter {
    fn next(&mut self) -> PrismResult<Option<Row>> {
        let Some(input) = self.child.next()? else {
            return Ok(None);
        };

        let values = self
            .expressions
            .iter()
            .map(|expr| expr.eval(&input))
            .collect::<PrismResult<Vec<_>>>()?;
        Ok(Some(Row::new(values)))
    }

    fn close(&mut self) -> PrismResult<()> {
        self.child.close()
    }
}
