//! Schema provider trait consumed by the validator

use super::errors::CatalogResult;
use super::types::ColumnDescriptor;

/// Read-only source of table metadata.
///
/// Implementations may be backed by an ORM metadata layer, a live database
/// connection or an in-memory catalog. The validator calls these methods on
/// every `verify` and never caches the answers.
pub trait SchemaProvider {
    /// Column names known to the model layer for `table`, in declared order.
    fn declared_attributes(&self, table: &str) -> CatalogResult<Vec<String>>;

    /// Live column definitions for `table`, in schema order.
    fn column_descriptors(&self, table: &str) -> CatalogResult<Vec<ColumnDescriptor>>;

    /// Physical (source) name for the logical table identifier.
    fn physical_name(&self, table: &str) -> CatalogResult<String>;
}

