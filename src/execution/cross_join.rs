//! Cross Join Operator
//!
//! Nested-loop iteration over two inputs. The left input is opened once; the
//! right input is reopened for every left row, with that row as its outer
//! row, so a correlated right side may yield a different stream per left row.

use crate::common::constants::CROSS_JOIN_SPAN;
use crate::common::error::PrismResult;
use crate::execution::context::ExecutionContext;
use crate::execution::iterator::{BoxedRowIter, RowIter, SpanIter};
use crate::internal_err;
use crate::planner::{CrossJoin, LogicalPlan};
use crate::types::Row;

fn span_name(plan: &LogicalPlan) -> String {
    plan.table_name()
        .map(str::to_string)
        .unwrap_or_else(|| plan.kind().to_string())
}

/// Open a cross join. Only the left input is opened here.
pub fn cross_join_iter(
    join: &CrossJoin,
    ctx: &ExecutionContext,
    row: &Row,
) -> PrismResult<BoxedRowIter> {
    let span = ctx.span_with_tags(
        CROSS_JOIN_SPAN,
        &[
            ("left", span_name(join.left())),
            ("right", span_name(join.right())),
        ],
    );

    let left = join.left().row_iter(ctx, row)?;

    Ok(Box::new(SpanIter::new(
        span,
        CrossJoinIter {
            left: Some(left),
            right_plan: join.right().clone(),
            right: None,
            ctx: ctx.clone(),
            left_row: None,
        },
    )))
}

/// Nested-loop iterator producing `left_row ++ right_row` pairs in
/// left-row-major order
pub struct CrossJoinIter {
    left: Option<BoxedRowIter>,
    right_plan: LogicalPlan,
    right: Option<BoxedRowIter>,
    ctx: ExecutionContext,
    left_row: Option<Row>,
}

impl RowIter for CrossJoinIter {
    fn next(&mut self) -> PrismResult<Option<Row>> {
        loop {
            let left_row = match self.left_row.take() {
                Some(row) => row,
                None => {
                    let Some(left) = self.left.as_mut() else {
                        return Ok(None);
                    };
                    match left.next()? {
                        Some(row) => row,
                        None => return Ok(None),
                    }
                }
            };

            if self.right.is_none() {
                match self.right_plan.row_iter(&self.ctx, &left_row) {
                    Ok(iter) => self.right = Some(iter),
                    Err(e) => {
                        self.left_row = Some(left_row);
                        return Err(e);
                    }
                }
            }

            let Some(right) = self.right.as_mut() else {
                return Err(internal_err!("cross join right iterator missing"));
            };

            match right.next() {
                Ok(Some(right_row)) => {
                    let joined = left_row.concat(&right_row);
                    self.left_row = Some(left_row);
                    return Ok(Some(joined));
                }
                // Right side exhausted for this left row: drop it and move on
                Ok(None) => {
                    self.right = None;
                }
                Err(e) => {
                    self.left_row = Some(left_row);
                    return Err(e);
                }
            }
        }
    }

    /// Closes both inputs. The left error, if any, is returned; the right
    /// input is closed regardless and its error is dropped in that case.
    fn close(&mut self) -> PrismResult<()> {
        let left = match self.left.take() {
            Some(mut iter) => iter.close(),
            None => Ok(()),
        };
        let right = match self.right.take() {
            Some(mut iter) => iter.close(),
            None => Ok(()),
        };
        self.left_row = None;

        left.and(right)
    }
}
