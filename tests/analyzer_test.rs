//! End-to-end tests: analyze an unresolved plan, then execute it

use pretty_assertions::assert_eq;
use prism_analyzer::catalog::dual_table;
use prism_analyzer::{
    collect_rows, Analyzer, AnalyzerBuilder, AnalyzerConfig, Catalog, Column, ExecutionContext,
    Expression, HistoryDatabase, LogicalPlan, LogicalType, MemoryDatabase, MemoryTable,
    PrismError, PrismResult, Row, Schema, UnresolvedTable, Value,
};
use std::sync::Arc;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn people() -> PrismResult<MemoryTable> {
    MemoryTable::with_rows(
        "people",
        Schema::new(vec![
            Column::new("id", LogicalType::Integer, false),
            Column::new("name", LogicalType::Varchar, false),
        ]),
        vec![
            Row::new(vec![Value::Integer(1), Value::from("ann")]),
            Row::new(vec![Value::Integer(2), Value::from("bob")]),
        ],
    )
}

fn context() -> PrismResult<ExecutionContext> {
    let db = MemoryDatabase::new("shop");
    db.add_table("people", Arc::new(people()?));

    let catalog = Catalog::new();
    catalog.add_database(Arc::new(db));
    Ok(ExecutionContext::new(Arc::new(catalog)).with_current_database("shop"))
}

#[test]
fn test_project_over_cross_join_with_dual() -> PrismResult<()> {
    init_logging();
    let ctx = context()?;
    let analyzer = AnalyzerBuilder::new(AnalyzerConfig::debug())
        .with_default_rules()
        .build();

    // SELECT UPPER(name), dummy FROM People, dual
    let plan = LogicalPlan::projection(
        vec![
            Expression::unresolved_function(
                "UPPER",
                vec![Expression::get_field(1, LogicalType::Varchar, "name", false)],
            ),
            Expression::get_field(2, LogicalType::Varchar, "dummy", false),
        ],
        LogicalPlan::cross_join(
            LogicalPlan::unresolved_table("People"),
            LogicalPlan::unresolved_table("dual"),
        ),
    );
    assert!(!plan.resolved());

    let resolved = analyzer.analyze(&ctx, &plan)?;
    assert!(resolved.resolved());
    assert_eq!(
        resolved.to_string(),
        "Project(UPPER(name), dummy)\n \
         └─ CrossJoin\n     \
         ├─ ResolvedTable(people)\n     \
         └─ ResolvedTable(dual)"
    );

    let rows = collect_rows(resolved.row_iter(&ctx, &Row::empty())?)?;
    assert_eq!(
        rows,
        vec![
            Row::new(vec![Value::from("ANN"), Value::from("x")]),
            Row::new(vec![Value::from("BOB"), Value::from("x")]),
        ]
    );
    Ok(())
}

#[test]
fn test_analysis_is_idempotent() -> PrismResult<()> {
    let ctx = context()?;
    let analyzer = Analyzer::new();
    let plan = LogicalPlan::projection(
        vec![Expression::unresolved_function(
            "length",
            vec![Expression::get_field(1, LogicalType::Varchar, "name", false)],
        )],
        LogicalPlan::unresolved_table("people"),
    );

    let once = analyzer.analyze(&ctx, &plan)?;
    let twice = analyzer.analyze(&ctx, &once)?;
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_rule_order_does_not_matter() -> PrismResult<()> {
    let ctx = context()?;
    let default_order = Analyzer::new();
    let reversed = AnalyzerBuilder::new(AnalyzerConfig::default())
        .add_rule(Arc::new(prism_analyzer::analyzer::ResolveFunctions))
        .add_rule(Arc::new(prism_analyzer::analyzer::ResolveTables))
        .build();

    let plan = LogicalPlan::projection(
        vec![Expression::unresolved_function(
            "lower",
            vec![Expression::literal("A")],
        )],
        LogicalPlan::cross_join(
            LogicalPlan::unresolved_table("people"),
            LogicalPlan::unresolved_table("dual"),
        ),
    );

    assert_eq!(
        default_order.analyze(&ctx, &plan)?,
        reversed.analyze(&ctx, &plan)?
    );
    Ok(())
}

#[test]
fn test_no_database_selected() -> PrismResult<()> {
    let ctx = ExecutionContext::new(Arc::new(Catalog::new()));
    let analyzer = Analyzer::new();

    let err = analyzer
        .analyze(&ctx, &LogicalPlan::unresolved_table("people"))
        .unwrap_err();
    assert!(matches!(err, PrismError::NoDatabaseSelected));
    assert_eq!(err.to_string(), "no database selected");

    // dual needs no database
    let resolved = analyzer.analyze(&ctx, &LogicalPlan::unresolved_table("dual"))?;
    assert_eq!(resolved, LogicalPlan::resolved_table(dual_table()));
    Ok(())
}

#[test]
fn test_unknown_function_names_the_function() -> PrismResult<()> {
    let ctx = context()?;
    let plan = LogicalPlan::projection(
        vec![Expression::unresolved_function("soundex", vec![])],
        LogicalPlan::unresolved_table("people"),
    );

    let err = Analyzer::new().analyze(&ctx, &plan).unwrap_err();
    assert!(matches!(&err, PrismError::FunctionNotFound(name) if name == "soundex"));
    assert!(err.to_string().contains("soundex"));
    Ok(())
}

#[test]
fn test_as_of_reads_the_snapshot() -> PrismResult<()> {
    let schema = Schema::new(vec![Column::new("v", LogicalType::Integer, false)]);
    let old = MemoryTable::with_rows(
        "prices",
        schema.clone(),
        vec![Row::new(vec![Value::Integer(1)])],
    )?;
    let new = MemoryTable::with_rows(
        "prices",
        schema,
        vec![Row::new(vec![Value::Integer(2)])],
    )?;

    let db = HistoryDatabase::new("history");
    db.add_table_as_of("prices", Arc::new(old), "2019-01-01");
    db.add_table_as_of("prices", Arc::new(new), "2019-02-01 00:00:00");
    let catalog = Catalog::new();
    catalog.add_database(Arc::new(db));
    let ctx = ExecutionContext::new(Arc::new(catalog));

    let as_of = |snapshot: &str| -> LogicalPlan {
        UnresolvedTable::new("PRICES")
            .with_database("history")
            .with_as_of(Expression::literal(snapshot))
            .into()
    };

    let analyzer = Analyzer::new();
    let january = analyzer.analyze(&ctx, &as_of("2019-01-01 00:00:00"))?;
    assert_eq!(
        collect_rows(january.row_iter(&ctx, &Row::empty())?)?,
        vec![Row::new(vec![Value::Integer(1)])]
    );

    let latest: LogicalPlan = UnresolvedTable::new("prices").with_database("history").into();
    let latest = analyzer.analyze(&ctx, &latest)?;
    assert_eq!(
        collect_rows(latest.row_iter(&ctx, &Row::empty())?)?,
        vec![Row::new(vec![Value::Integer(2)])]
    );

    let err = analyzer.analyze(&ctx, &as_of("2020-01-01")).unwrap_err();
    assert!(matches!(err, PrismError::TableAsOfNotFound { .. }));
    Ok(())
}
