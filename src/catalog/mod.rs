//! Catalog System
//!
//! The catalog maps names to databases, tables and functions. The analyzer
//! treats it as read-only while resolving a plan.

pub mod database;
pub mod function;
pub mod table;

pub use database::*;
pub use function::*;
pub use table::*;

use crate::common::error::{PrismError, PrismResult};
use crate::types::Value;
use parking_lot::RwLock;
use std::sync::Arc;

/// Case-insensitive name comparison used for databases and tables
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Main catalog holding databases and functions
#[derive(Debug)]
pub struct Catalog {
    /// Databases in registration order
    databases: RwLock<Vec<DatabaseRef>>,
    /// Function registry
    functions: RwLock<FunctionRegistry>,
}

impl Catalog {
    /// Create a new catalog with the built-in functions and no databases
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(Vec::new()),
            functions: RwLock::new(FunctionRegistry::with_builtins()),
        }
    }

    /// Register a database, replacing one with the same name
    pub fn add_database(&self, database: DatabaseRef) {
        let mut databases = self.databases.write();
        databases.retain(|db| !names_match(db.name(), database.name()));
        databases.push(database);
    }

    /// Get a database by name, ignoring case
    pub fn database(&self, name: &str) -> PrismResult<DatabaseRef> {
        self.databases
            .read()
            .iter()
            .find(|db| names_match(db.name(), name))
            .cloned()
            .ok_or_else(|| PrismError::DatabaseNotFound(name.to_string()))
    }

    /// List all database names
    pub fn list_databases(&self) -> Vec<String> {
        self.databases
            .read()
            .iter()
            .map(|db| db.name().to_string())
            .collect()
    }

    /// Get a table from a database, matching the table name case-insensitively
    pub fn table(&self, database: &str, table: &str) -> PrismResult<TableRef> {
        self.database(database)?.table(table, true)
    }

    /// Get a table version from a database
    pub fn table_as_of(&self, database: &str, table: &str, as_of: &Value) -> PrismResult<TableRef> {
        self.database(database)?.table_as_of(table, as_of)
    }

    /// Register a function
    pub fn register_function(&self, function: Function) {
        self.functions.write().register(function);
    }

    /// Lookup a function by name
    pub fn function(&self, name: &str) -> PrismResult<Arc<Function>> {
        self.functions.read().lookup(name)
    }

    /// List all function names
    pub fn list_functions(&self) -> Vec<String> {
        self.functions.read().list_functions()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::function::Upper;
    use crate::types::{Column, LogicalType, Schema};

    fn catalog_with_table() -> (Catalog, TableRef) {
        let table: TableRef = Arc::new(MemoryTable::new(
            "mytable",
            Schema::new(vec![Column::new("i", LogicalType::Integer, false)]),
        ));
        let db = MemoryDatabase::new("mydb");
        db.add_table("mytable", table.clone());

        let catalog = Catalog::new();
        catalog.add_database(Arc::new(db));
        (catalog, table)
    }

    #[test]
    fn test_database_lookup() -> PrismResult<()> {
        let (catalog, table) = catalog_with_table();
        assert_eq!(catalog.database("MYDB")?.name(), "mydb");
        assert!(same_table(&catalog.table("mydb", "MyTable")?, &table));
        assert!(matches!(
            catalog.database("other"),
            Err(PrismError::DatabaseNotFound(name)) if name == "other"
        ));
        assert_eq!(catalog.list_databases(), vec!["mydb".to_string()]);
        Ok(())
    }

    #[test]
    fn test_non_ascii_database_names() -> PrismResult<()> {
        let catalog = Catalog::new();
        catalog.add_database(Arc::new(MemoryDatabase::new("straße_ö")));
        assert!(catalog.database("STRASSE_Ö").is_err());
        assert_eq!(catalog.database("STRAßE_Ö")?.name(), "straße_ö");
        Ok(())
    }

    #[test]
    fn test_add_database_replaces() {
        let (catalog, _) = catalog_with_table();
        catalog.add_database(Arc::new(MemoryDatabase::new("MyDb")));
        assert_eq!(catalog.list_databases(), vec!["MyDb".to_string()]);
        assert!(catalog.table("mydb", "mytable").is_err());
    }

    #[test]
    fn test_register_function() -> PrismResult<()> {
        let catalog = Catalog::new();
        catalog.register_function(Function::new(
            "shout",
            FunctionArity::Exact(1),
            Arc::new(Upper),
        ));
        assert_eq!(catalog.function("SHOUT")?.name, "shout");
        assert!(catalog.list_functions().contains(&"shout".to_string()));
        Ok(())
    }
}
