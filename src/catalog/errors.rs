//! # Catalog Errors
//!
//! Error types for schema metadata lookups and catalog loading.

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog lookup and loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Table is not known to the catalog
    #[error("Table '{0}' is not registered")]
    UnknownTable(String),

    /// Table registered twice
    #[error("Table '{0}' is already registered")]
    DuplicateTable(String),

    /// Catalog file or table definition is malformed
    #[error("Malformed table definition '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Backend could not be read
    #[error("Catalog I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure reported by an external provider
    #[error("Schema backend failure: {0}")]
    Backend(String),
}

impl CatalogError {
    /// Create a malformed definition error
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a backend failure error
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend(reason.into())
    }
}
