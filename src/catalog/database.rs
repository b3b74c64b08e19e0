//! Database Management
//!
//! A database is a named collection of tables. History databases also keep
//! older versions of their tables, addressable with an AS OF snapshot.

use crate::catalog::names_match;
use crate::catalog::table::TableRef;
use crate::common::error::{PrismError, PrismResult};
use crate::types::Value;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A named collection of tables
pub trait Database: fmt::Debug + Send + Sync {
    /// Database name
    fn name(&self) -> &str;

    /// All current tables, keyed by registered name
    fn tables(&self) -> BTreeMap<String, TableRef>;

    /// Look up a table. An exact match wins over a case-insensitive one.
    fn table(&self, name: &str, case_insensitive: bool) -> PrismResult<TableRef> {
        find_table(&self.tables(), name, case_insensitive)
    }

    /// Look up a table as it existed at the given snapshot
    fn table_as_of(&self, _name: &str, _as_of: &Value) -> PrismResult<TableRef> {
        Err(PrismError::AsOfNotSupported(self.name().to_string()))
    }
}

/// Shared database handle
pub type DatabaseRef = Arc<dyn Database>;

fn find_table(
    tables: &BTreeMap<String, TableRef>,
    name: &str,
    case_insensitive: bool,
) -> PrismResult<TableRef> {
    if let Some(table) = tables.get(name) {
        return Ok(table.clone());
    }

    if case_insensitive {
        if let Some((_, table)) = tables.iter().find(|(key, _)| names_match(key, name)) {
            return Ok(table.clone());
        }
    }

    Err(PrismError::TableNotFound(name.to_string()))
}

/// In-memory database
#[derive(Debug)]
pub struct MemoryDatabase {
    name: String,
    tables: RwLock<BTreeMap<String, TableRef>>,
}

impl MemoryDatabase {
    /// Create a new empty database
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a table under the given name, replacing any previous one
    pub fn add_table(&self, name: impl Into<String>, table: TableRef) {
        self.tables.write().insert(name.into(), table);
    }

    /// Drop a table
    pub fn drop_table(&self, name: &str) -> PrismResult<()> {
        self.tables
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| PrismError::TableNotFound(name.to_string()))
    }
}

impl Database for MemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn tables(&self) -> BTreeMap<String, TableRef> {
        self.tables.read().clone()
    }

    fn table(&self, name: &str, case_insensitive: bool) -> PrismResult<TableRef> {
        find_table(&self.tables.read(), name, case_insensitive)
    }
}

/// One historical version of a table
#[derive(Debug, Clone)]
struct TableVersion {
    as_of: Value,
    table: TableRef,
}

/// In-memory database that also remembers table versions by snapshot
#[derive(Debug)]
pub struct HistoryDatabase {
    current: MemoryDatabase,
    history: RwLock<BTreeMap<String, Vec<TableVersion>>>,
}

impl HistoryDatabase {
    /// Create a new empty history database
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            current: MemoryDatabase::new(name),
            history: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register the current version of a table
    pub fn add_table(&self, name: impl Into<String>, table: TableRef) {
        self.current.add_table(name, table);
    }

    /// Register a table version at the given snapshot. The most recently
    /// added version also becomes the current one.
    pub fn add_table_as_of(&self, name: impl Into<String>, table: TableRef, as_of: impl Into<Value>) {
        let name = name.into();
        self.history
            .write()
            .entry(name.clone())
            .or_default()
            .push(TableVersion {
                as_of: as_of.into(),
                table: table.clone(),
            });
        self.current.add_table(name, table);
    }
}

/// Snapshot equality: values that both read as timestamps compare as such,
/// everything else compares by value.
fn same_snapshot(a: &Value, b: &Value) -> bool {
    match (a.to_timestamp_micros(), b.to_timestamp_micros()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

impl Database for HistoryDatabase {
    fn name(&self) -> &str {
        self.current.name()
    }

    fn tables(&self) -> BTreeMap<String, TableRef> {
        self.current.tables()
    }

    fn table(&self, name: &str, case_insensitive: bool) -> PrismResult<TableRef> {
        self.current.table(name, case_insensitive)
    }

    fn table_as_of(&self, name: &str, as_of: &Value) -> PrismResult<TableRef> {
        let history = self.history.read();
        let versions = history.get(name).or_else(|| {
            history
                .iter()
                .find(|(key, _)| names_match(key, name))
                .map(|(_, versions)| versions)
        });

        versions
            .and_then(|versions| {
                versions
                    .iter()
                    .rev()
                    .find(|version| same_snapshot(&version.as_of, as_of))
            })
            .map(|version| version.table.clone())
            .ok_or_else(|| PrismError::TableAsOfNotFound {
                table: name.to_string(),
                as_of: as_of.to_string(),
            })
    }
}
