//! In-memory catalog with optional loading from disk
//!
//! Table definitions live one per file as `<dir>/<table>.json`.
//! Non-JSON files are skipped; a malformed file fails the whole load.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::errors::{CatalogError, CatalogResult};
use super::provider::SchemaProvider;
use super::types::{ColumnDescriptor, TableSchema};
use crate::observability::{log_event_with_fields, Event};

/// Catalog that keeps table definitions in memory, keyed by logical name.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: HashMap<String, TableSchema>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.json` table definition in `dir`.
    ///
    /// Returns the number of tables loaded.
    pub fn load_dir(&mut self, dir: &Path) -> CatalogResult<usize> {
        let entries = fs::read_dir(dir).map_err(|e| {
            CatalogError::malformed(
                dir.display().to_string(),
                format!("Failed to read catalog directory: {}", e),
            )
        })?;

        // Sorted so that duplicate detection reports the same file every run
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_file(path)?;
        }

        let dir_name = dir.display().to_string();
        let count = paths.len().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("dir", dir_name.as_str()), ("tables", count.as_str())],
        );

        Ok(paths.len())
    }

    /// Loads a single table definition file.
    pub fn load_file(&mut self, path: &Path) -> CatalogResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let table: TableSchema = serde_json::from_str(&content).map_err(|e| {
            CatalogError::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        table
            .validate_structure()
            .map_err(|e| CatalogError::malformed(path.display().to_string(), e))?;

        self.insert(table)
    }

    /// Registers a table definition directly.
    pub fn register(&mut self, table: TableSchema) -> CatalogResult<()> {
        table
            .validate_structure()
            .map_err(|e| CatalogError::malformed("<in-memory>", e))?;

        self.insert(table)
    }

    fn insert(&mut self, table: TableSchema) -> CatalogResult<()> {
        if self.tables.contains_key(&table.table) {
            return Err(CatalogError::DuplicateTable(table.table));
        }
        self.tables.insert(table.table.clone(), table);
        Ok(())
    }

    /// Gets a table definition by logical name.
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.tables.get(table)
    }

    /// Returns the number of registered tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    fn lookup(&self, table: &str) -> CatalogResult<&TableSchema> {
        self.get(table)
            .ok_or_else(|| CatalogError::UnknownTable(table.to_string()))
    }
}

impl SchemaProvider for MemoryCatalog {
    fn declared_attributes(&self, table: &str) -> CatalogResult<Vec<String>> {
        Ok(self.lookup(table)?.declared_attributes())
    }

    fn column_descriptors(&self, table: &str) -> CatalogResult<Vec<ColumnDescriptor>> {
        Ok(self.lookup(table)?.columns.clone())
    }

    fn physical_name(&self, table: &str) -> CatalogResult<String> {
        Ok(self.lookup(table)?.source_name().to_string())
    }
}
