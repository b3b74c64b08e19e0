//! Function resolution
//!
//! Binds every unresolved function call to the catalog function of the same
//! name. Arguments are bound before the calls that take them.

use crate::analyzer::{Analyzer, AnalyzerRule};
use crate::common::error::PrismResult;
use crate::execution::ExecutionContext;
use crate::expression::Expression;
use crate::planner::LogicalPlan;

pub struct ResolveFunctions;

impl AnalyzerRule for ResolveFunctions {
    fn name(&self) -> &str {
        "resolve_functions"
    }

    fn apply(
        &self,
        ctx: &ExecutionContext,
        analyzer: &Analyzer,
        plan: &LogicalPlan,
    ) -> PrismResult<LogicalPlan> {
        let _span = ctx.span(self.name());
        analyzer.log(format_args!("resolve functions, node of type {}", plan.kind()));

        plan.transform_unresolved_up(&mut |node| {
            node.transform_unresolved_expressions_up(&mut |expr| {
                resolve_function(ctx, analyzer, expr)
            })
        })
    }
}

fn resolve_function(
    ctx: &ExecutionContext,
    analyzer: &Analyzer,
    expr: Expression,
) -> PrismResult<Expression> {
    let Expression::UnresolvedFunction(call) = expr else {
        return Ok(expr);
    };

    let function = ctx.catalog.function(&call.name)?;
    let resolved = function.call(call.arguments)?;
    analyzer.log(format_args!("resolved function {:?}", call.name));
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerBuilder;
    use crate::catalog::{Catalog, MemoryTable};
    use crate::common::config::AnalyzerConfig;
    use crate::common::error::PrismError;
    use crate::execution::span::testing::RecordingTracer;
    use crate::expression::ScalarFunction;
    use crate::types::{Column, LogicalType, Schema};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn setup() -> (ExecutionContext, Analyzer, RecordingTracer) {
        let tracer = RecordingTracer::default();
        let ctx = ExecutionContext::new(Arc::new(Catalog::new())).with_tracer(Arc::new(tracer.clone()));
        let analyzer = AnalyzerBuilder::new(AnalyzerConfig::debug())
            .add_rule(Arc::new(ResolveFunctions))
            .build();
        (ctx, analyzer, tracer)
    }

    fn table() -> LogicalPlan {
        LogicalPlan::resolved_table(Arc::new(MemoryTable::new(
            "mytable",
            Schema::new(vec![Column::new("s", LogicalType::Varchar, false)]),
        )))
    }

    #[test]
    fn test_resolves_nested_calls() -> PrismResult<()> {
        let (ctx, analyzer, _) = setup();
        let plan = LogicalPlan::projection(
            vec![Expression::unresolved_function(
                "upper",
                vec![Expression::unresolved_function(
                    "Lower",
                    vec![Expression::get_field(0, LogicalType::Varchar, "s", false)],
                )],
            )],
            table(),
        );

        let resolved = ResolveFunctions.apply(&ctx, &analyzer, &plan)?;
        assert!(resolved.resolved());

        let lower = ctx
            .catalog
            .function("lower")?
            .call(vec![Expression::get_field(0, LogicalType::Varchar, "s", false)])?;
        let upper = ctx.catalog.function("upper")?.call(vec![lower])?;
        assert_eq!(resolved, LogicalPlan::projection(vec![upper], table()));
        Ok(())
    }

    #[test]
    fn test_idempotent() -> PrismResult<()> {
        let (ctx, analyzer, _) = setup();
        let plan = LogicalPlan::projection(
            vec![Expression::unresolved_function(
                "length",
                vec![Expression::literal("abc")],
            )],
            table(),
        );

        let once = ResolveFunctions.apply(&ctx, &analyzer, &plan)?;
        let twice = ResolveFunctions.apply(&ctx, &analyzer, &once)?;
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_resolved_calls_are_not_rebound() -> PrismResult<()> {
        let (ctx, analyzer, _) = setup();
        let bound = ctx.catalog.function("abs")?.call(vec![Expression::literal(-1)])?;
        let plan = LogicalPlan::projection(vec![bound.clone()], table());

        // Replacing the catalog entry must not affect already bound calls
        ctx.catalog.register_function(crate::catalog::Function::new(
            "abs",
            crate::catalog::FunctionArity::Exact(1),
            Arc::new(crate::expression::function::Lower),
        ));

        let out = ResolveFunctions.apply(&ctx, &analyzer, &plan)?;
        match &out.expressions()[..] {
            [Expression::Function(call)] => {
                assert_eq!(call.implementation().name(), "abs");
            }
            other => panic!("unexpected expressions: {:?}", other),
        }
        assert_eq!(out.expressions()[0], &bound);
        Ok(())
    }

    #[test]
    fn test_unknown_function() {
        let (ctx, analyzer, tracer) = setup();
        let plan = LogicalPlan::projection(
            vec![Expression::unresolved_function("nope", vec![])],
            table(),
        );

        let err = ResolveFunctions.apply(&ctx, &analyzer, &plan).unwrap_err();
        assert!(matches!(err, PrismError::FunctionNotFound(name) if name == "nope"));

        let log = tracer.log.lock();
        assert_eq!(log.opened, vec!["resolve_functions".to_string()]);
        assert_eq!(log.finished, vec!["resolve_functions".to_string()]);
    }

    #[test]
    fn test_arity_checked_at_binding() {
        let (ctx, analyzer, _) = setup();
        let plan = LogicalPlan::projection(
            vec![Expression::unresolved_function(
                "upper",
                vec![Expression::literal("a"), Expression::literal("b")],
            )],
            table(),
        );

        let err = ResolveFunctions.apply(&ctx, &analyzer, &plan).unwrap_err();
        assert!(matches!(
            err,
            PrismError::InvalidArgumentCount { function, given: 2, .. } if function == "upper"
        ));
    }

    #[test]
    fn test_tables_left_alone() -> PrismResult<()> {
        let (ctx, analyzer, _) = setup();
        let plan = LogicalPlan::cross_join(LogicalPlan::unresolved_table("a"), table());
        assert_eq!(ResolveFunctions.apply(&ctx, &analyzer, &plan)?, plan);
        Ok(())
    }
}
