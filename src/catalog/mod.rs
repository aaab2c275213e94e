//! Schema catalog subsystem
//!
//! Supplies the table metadata the validator reconciles requests against:
//! declared attributes, live column descriptors and physical table names.
//!
//! # Design Principles
//!
//! - Read-only from the validator's point of view
//! - Every lookup is fallible; failures surface as `SchemaUnavailable`
//! - No caching across validator calls
//! - Deterministic ordering (declared order, schema order)

mod errors;
mod memory;
mod provider;
mod types;

pub use errors::{CatalogError, CatalogResult};
pub use memory::MemoryCatalog;
pub use provider::SchemaProvider;
pub use types::{ColumnDescriptor, ColumnType, TableSchema};
