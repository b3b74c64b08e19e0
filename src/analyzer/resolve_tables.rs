//! Table resolution
//!
//! Replaces unresolved table references with handles looked up in the
//! catalog. References without a database qualifier use the session's
//! current database, except `dual`, which always binds to the built-in
//! single-row table.

use crate::analyzer::{Analyzer, AnalyzerRule};
use crate::catalog::dual_table;
use crate::common::constants::DUAL_TABLE_NAME;
use crate::common::error::{PrismError, PrismResult};
use crate::execution::ExecutionContext;
use crate::planner::{LogicalPlan, UnresolvedTable};
use crate::types::Row;

pub struct ResolveTables;

impl AnalyzerRule for ResolveTables {
    fn name(&self) -> &str {
        "resolve_tables"
    }

    fn apply(
        &self,
        ctx: &ExecutionContext,
        analyzer: &Analyzer,
        plan: &LogicalPlan,
    ) -> PrismResult<LogicalPlan> {
        let _span = ctx.span(self.name());
        analyzer.log(format_args!("resolve tables, node of type {}", plan.kind()));

        plan.transform_unresolved_up(&mut |node| match node {
            LogicalPlan::UnresolvedTable(table) => resolve_table(ctx, analyzer, &table),
            other => Ok(other),
        })
    }
}

fn resolve_table(
    ctx: &ExecutionContext,
    analyzer: &Analyzer,
    unresolved: &UnresolvedTable,
) -> PrismResult<LogicalPlan> {
    if unresolved.name == DUAL_TABLE_NAME {
        analyzer.log(format_args!("resolved table {} to the dual table", unresolved.name));
        return Ok(LogicalPlan::resolved_table(dual_table()));
    }

    let database = match unresolved.database.as_deref().or(ctx.current_database()) {
        Some(database) => ctx.catalog.database(database)?,
        None => return Err(PrismError::NoDatabaseSelected),
    };

    let mut table = database.table(&unresolved.name, true)?;

    if let Some(as_of) = &unresolved.as_of {
        let snapshot = as_of.eval(&Row::empty())?;
        table = database.table_as_of(&unresolved.name, &snapshot)?;
        analyzer.log(format_args!(
            "resolved table {} as of {}",
            unresolved.name, snapshot
        ));
    } else {
        analyzer.log(format_args!("resolved table {}", unresolved.name));
    }

    Ok(LogicalPlan::resolved_table(table))
}
