//! Table Management
//!
//! Tables are opaque handles to the analyzer: a name, a schema and the
//! ability to open a row iterator over their contents.

use crate::common::constants::{DUAL_COLUMN_NAME, DUAL_ROW_VALUE, DUAL_TABLE_NAME};
use crate::common::error::{PrismError, PrismResult};
use crate::execution::{BoxedRowIter, ExecutionContext, MemoryRowIter};
use crate::types::{Column, LogicalType, Row, Schema, Value};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A concrete table handle
pub trait Table: fmt::Debug + Send + Sync {
    /// Table name as registered
    fn name(&self) -> &str;

    /// Columns produced by a scan
    fn schema(&self) -> Schema;

    /// Open an iterator over the table's rows. `row` is the outer row when
    /// the scan runs on the correlated side of a join, empty otherwise.
    fn scan(&self, ctx: &ExecutionContext, row: &Row) -> PrismResult<BoxedRowIter>;
}

/// Shared table handle
pub type TableRef = Arc<dyn Table>;

/// Identity comparison of two table handles
pub fn same_table(a: &TableRef, b: &TableRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// In-memory table
#[derive(Debug)]
pub struct MemoryTable {
    name: String,
    schema: Schema,
    rows: RwLock<Vec<Row>>,
}

impl MemoryTable {
    /// Create a new empty table
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        let schema = Schema::new(
            schema
                .iter()
                .cloned()
                .map(|col| {
                    if col.source.is_empty() {
                        col.with_source(name.clone())
                    } else {
                        col
                    }
                })
                .collect(),
        );

        Self {
            name,
            schema,
            rows: RwLock::new(Vec::new()),
        }
    }

    /// Create a table and fill it with rows
    pub fn with_rows(
        name: impl Into<String>,
        schema: Schema,
        rows: Vec<Row>,
    ) -> PrismResult<Self> {
        let table = Self::new(name, schema);
        for row in rows {
            table.insert(row)?;
        }
        Ok(table)
    }

    /// Append a row after checking it against the schema
    pub fn insert(&self, row: Row) -> PrismResult<()> {
        if row.len() != self.schema.len() {
            return Err(PrismError::Type(format!(
                "table '{}' expects {} values per row, got {}",
                self.name,
                self.schema.len(),
                row.len()
            )));
        }

        for (value, col) in row.values().iter().zip(self.schema.iter()) {
            if value.is_null() && !col.nullable {
                return Err(PrismError::Type(format!(
                    "column '{}' of table '{}' is not nullable",
                    col.name, self.name
                )));
            }
            if !value.fits(&col.data_type) {
                return Err(PrismError::Type(format!(
                    "value {} does not fit column '{}' of type {}",
                    value, col.name, col.data_type
                )));
            }
        }

        self.rows.write().push(row);
        Ok(())
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows.read().len()
    }
}

impl Table for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn scan(&self, _ctx: &ExecutionContext, _row: &Row) -> PrismResult<BoxedRowIter> {
        let snapshot = self.rows.read().clone();
        Ok(Box::new(MemoryRowIter::new(snapshot)))
    }
}

/// The built-in single row `dual` table
pub fn dual_table() -> TableRef {
    static DUAL: OnceLock<TableRef> = OnceLock::new();
    DUAL.get_or_init(|| {
        let schema = Schema::new(vec![Column::new(
            DUAL_COLUMN_NAME,
            LogicalType::Varchar,
            false,
        )]);
        let table = MemoryTable::new(DUAL_TABLE_NAME, schema);
        table
            .rows
            .write()
            .push(Row::new(vec![Value::from(DUAL_ROW_VALUE)]));
        Arc::new(table)
    })
    .clone()
}
