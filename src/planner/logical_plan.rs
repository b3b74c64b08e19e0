//! Plan Representation
//!
//! Plan nodes form a tree; every node owns its children. Nodes are never
//! mutated in place: rebuilding a node with new children or expressions
//! produces a new node.

use crate::catalog::{same_table, TableRef};
use crate::common::error::{PrismError, PrismResult};
use crate::execution::{cross_join, operators, BoxedRowIter, ExecutionContext};
use crate::execution_err;
use crate::expression::Expression;
use crate::planner::tree_printer::TreePrinter;
use crate::types::{Column, Row, Schema};
use std::fmt;

/// Plan node types
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalPlan {
    /// Table reference awaiting resolution against the catalog
    UnresolvedTable(UnresolvedTable),
    /// Table bound to a concrete handle
    ResolvedTable(ResolvedTable),
    /// Project (select) expressions over the input rows
    Projection(Projection),
    /// Cartesian product of two inputs
    CrossJoin(CrossJoin),
}

/// Unresolved table reference
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedTable {
    pub name: String,
    /// Explicit database qualifier
    pub database: Option<String>,
    /// Snapshot marker for AS OF queries
    pub as_of: Option<Expression>,
}

impl UnresolvedTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database: None,
            as_of: None,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_as_of(mut self, as_of: Expression) -> Self {
        self.as_of = Some(as_of);
        self
    }
}

/// Resolved table
#[derive(Debug, Clone)]
pub struct ResolvedTable {
    pub table: TableRef,
}

impl ResolvedTable {
    pub fn new(table: TableRef) -> Self {
        Self { table }
    }
}

impl PartialEq for ResolvedTable {
    fn eq(&self, other: &Self) -> bool {
        same_table(&self.table, &other.table)
    }
}

/// Projection operation
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub expressions: Vec<Expression>,
    pub input: Box<LogicalPlan>,
}

impl Projection {
    pub fn new(expressions: Vec<Expression>, input: LogicalPlan) -> Self {
        Self {
            expressions,
            input: Box::new(input),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::new(
            self.expressions
                .iter()
                .map(|expr| Column::new(expr.column_name(), expr.data_type(), expr.nullable()))
                .collect(),
        )
    }
}

/// Node with exactly two children
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    pub left: Box<LogicalPlan>,
    pub right: Box<LogicalPlan>,
}

impl BinaryNode {
    pub fn new(left: LogicalPlan, right: LogicalPlan) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn resolved(&self) -> bool {
        self.left.resolved() && self.right.resolved()
    }

    pub fn children(&self) -> Vec<&LogicalPlan> {
        vec![&self.left, &self.right]
    }
}

/// Cross join between two inputs
#[derive(Debug, Clone, PartialEq)]
pub struct CrossJoin {
    pub binary: BinaryNode,
}

impl CrossJoin {
    pub fn new(left: LogicalPlan, right: LogicalPlan) -> Self {
        Self {
            binary: BinaryNode::new(left, right),
        }
    }

    pub fn left(&self) -> &LogicalPlan {
        &self.binary.left
    }

    pub fn right(&self) -> &LogicalPlan {
        &self.binary.right
    }

    /// Left schema followed by right schema, computed on demand
    pub fn schema(&self) -> Schema {
        self.left().schema().concat(&self.right().schema())
    }

    pub fn resolved(&self) -> bool {
        self.binary.resolved()
    }
}

impl LogicalPlan {
    pub fn unresolved_table(name: impl Into<String>) -> Self {
        LogicalPlan::UnresolvedTable(UnresolvedTable::new(name))
    }

    pub fn resolved_table(table: TableRef) -> Self {
        LogicalPlan::ResolvedTable(ResolvedTable::new(table))
    }

    pub fn projection(expressions: Vec<Expression>, input: LogicalPlan) -> Self {
        LogicalPlan::Projection(Projection::new(expressions, input))
    }

    pub fn cross_join(left: LogicalPlan, right: LogicalPlan) -> Self {
        LogicalPlan::CrossJoin(CrossJoin::new(left, right))
    }

    /// Operator name, used in structural errors and spans
    pub fn kind(&self) -> &'static str {
        match self {
            LogicalPlan::UnresolvedTable(_) => "UnresolvedTable",
            LogicalPlan::ResolvedTable(_) => "ResolvedTable",
            LogicalPlan::Projection(_) => "Project",
            LogicalPlan::CrossJoin(_) => "CrossJoin",
        }
    }

    /// Table name for nodes that wrap or reference a table
    pub fn table_name(&self) -> Option<&str> {
        match self {
            LogicalPlan::UnresolvedTable(t) => Some(&t.name),
            LogicalPlan::ResolvedTable(t) => Some(t.table.name()),
            _ => None,
        }
    }

    /// Whether this node, its expressions and all of its children are bound
    pub fn resolved(&self) -> bool {
        match self {
            LogicalPlan::UnresolvedTable(_) => false,
            LogicalPlan::ResolvedTable(_) => true,
            LogicalPlan::Projection(proj) => {
                proj.input.resolved() && proj.expressions.iter().all(Expression::resolved)
            }
            LogicalPlan::CrossJoin(join) => join.resolved(),
        }
    }

    /// Get the schema (output columns) of this plan node.
    /// Unresolved tables have no known columns and report an empty schema.
    pub fn schema(&self) -> Schema {
        match self {
            LogicalPlan::UnresolvedTable(_) => Schema::empty(),
            LogicalPlan::ResolvedTable(t) => t.table.schema(),
            LogicalPlan::Projection(proj) => proj.schema(),
            LogicalPlan::CrossJoin(join) => join.schema(),
        }
    }

    /// Get all child plans of this plan node
    pub fn children(&self) -> Vec<&LogicalPlan> {
        match self {
            LogicalPlan::UnresolvedTable(_) | LogicalPlan::ResolvedTable(_) => vec![],
            LogicalPlan::Projection(proj) => vec![&proj.input],
            LogicalPlan::CrossJoin(join) => join.binary.children(),
        }
    }

    /// Rebuild this node over new children
    pub fn with_children(&self, children: Vec<LogicalPlan>) -> PrismResult<LogicalPlan> {
        let expected = self.children().len();
        if children.len() != expected {
            return Err(PrismError::invalid_children(self.kind(), children.len(), expected));
        }

        let mut children = children.into_iter();
        Ok(match self {
            LogicalPlan::UnresolvedTable(_) | LogicalPlan::ResolvedTable(_) => self.clone(),
            LogicalPlan::Projection(proj) => match children.next() {
                Some(input) => LogicalPlan::projection(proj.expressions.clone(), input),
                None => return Err(PrismError::invalid_children(self.kind(), 0, 1)),
            },
            LogicalPlan::CrossJoin(_) => match (children.next(), children.next()) {
                (Some(left), Some(right)) => LogicalPlan::cross_join(left, right),
                _ => return Err(PrismError::invalid_children(self.kind(), 0, 2)),
            },
        })
    }

    /// Expressions embedded in this node
    pub fn expressions(&self) -> Vec<&Expression> {
        match self {
            LogicalPlan::Projection(proj) => proj.expressions.iter().collect(),
            _ => vec![],
        }
    }

    /// Rebuild this node with new expressions
    pub fn with_expressions(&self, expressions: Vec<Expression>) -> PrismResult<LogicalPlan> {
        let expected = self.expressions().len();
        if expressions.len() != expected {
            return Err(PrismError::invalid_expressions(
                self.kind(),
                expressions.len(),
                expected,
            ));
        }

        Ok(match self {
            LogicalPlan::Projection(proj) => LogicalPlan::Projection(Projection {
                expressions,
                input: proj.input.clone(),
            }),
            other => other.clone(),
        })
    }

    /// Open an iterator over this node's rows. `row` is the outer row for
    /// correlated execution, empty otherwise.
    pub fn row_iter(&self, ctx: &ExecutionContext, row: &Row) -> PrismResult<BoxedRowIter> {
        match self {
            LogicalPlan::UnresolvedTable(t) => Err(execution_err!(
                "unresolved table {} cannot be executed",
                t.name
            )),
            LogicalPlan::ResolvedTable(t) => operators::table_scan_iter(t, ctx, row),
            LogicalPlan::Projection(proj) => operators::projection_iter(proj, ctx, row),
            LogicalPlan::CrossJoin(join) => cross_join::cross_join_iter(join, ctx, row),
        }
    }

    /// Multi-line rendering with types and table columns
    pub fn debug_string(&self) -> String {
        match self {
            LogicalPlan::UnresolvedTable(t) => unresolved_table_header(t),
            LogicalPlan::ResolvedTable(t) => {
                TreePrinter::new(format!("ResolvedTable({})", t.table.name()))
                    .children(
                        t.table
                            .schema()
                            .iter()
                            .map(|col| format!("{} {}", col.name, col.data_type)),
                    )
                    .render()
            }
            LogicalPlan::Projection(proj) => {
                let exprs: Vec<String> = proj
                    .expressions
                    .iter()
                    .map(|e| format!("{} : {}", e, e.data_type()))
                    .collect();
                TreePrinter::new(format!("Project({})", exprs.join(", ")))
                    .child(proj.input.debug_string())
                    .render()
            }
            LogicalPlan::CrossJoin(join) => TreePrinter::new("CrossJoin")
                .children([join.left().debug_string(), join.right().debug_string()])
                .render(),
        }
    }
}

fn unresolved_table_header(t: &UnresolvedTable) -> String {
    let mut header = match &t.database {
        Some(db) => format!("UnresolvedTable({}.{})", db, t.name),
        None => format!("UnresolvedTable({})", t.name),
    };
    if let Some(as_of) = &t.as_of {
        header.push_str(&format!(" AS OF {}", as_of));
    }
    header
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            LogicalPlan::UnresolvedTable(t) => unresolved_table_header(t),
            LogicalPlan::ResolvedTable(t) => format!("ResolvedTable({})", t.table.name()),
            LogicalPlan::Projection(proj) => {
                let exprs: Vec<String> = proj.expressions.iter().map(|e| e.to_string()).collect();
                TreePrinter::new(format!("Project({})", exprs.join(", ")))
                    .child(proj.input.to_string())
                    .render()
            }
            LogicalPlan::CrossJoin(join) => TreePrinter::new("CrossJoin")
                .children([join.left().to_string(), join.right().to_string()])
                .render(),
        };
        write!(f, "{}", rendered)
    }
}

impl From<UnresolvedTable> for LogicalPlan {
    fn from(table: UnresolvedTable) -> Self {
        LogicalPlan::UnresolvedTable(table)
    }
}

impl From<ResolvedTable> for LogicalPlan {
    fn from(table: ResolvedTable) -> Self {
        LogicalPlan::ResolvedTable(table)
    }
}
