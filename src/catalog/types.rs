//! Catalog type definitions
//!
//! Storage type tags follow the relational driver vocabulary:
//! - integer, bigint: whole numbers
//! - decimal, float, double: fractional numbers
//! - varchar, char, text: character data
//! - date, datetime, timestamp: temporal data
//! - boolean, blob, json: everything else a driver may report

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Column storage type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Varchar,
    Char,
    Text,
    Date,
    Datetime,
    Bigint,
    Decimal,
    Float,
    Double,
    Boolean,
    Timestamp,
    Blob,
    Json,
}

impl ColumnType {
    /// Every known tag, in declaration order
    pub const ALL: [ColumnType; 14] = [
        ColumnType::Integer,
        ColumnType::Varchar,
        ColumnType::Char,
        ColumnType::Text,
        ColumnType::Date,
        ColumnType::Datetime,
        ColumnType::Bigint,
        ColumnType::Decimal,
        ColumnType::Float,
        ColumnType::Double,
        ColumnType::Boolean,
        ColumnType::Timestamp,
        ColumnType::Blob,
        ColumnType::Json,
    ];

    /// Returns the tag used in results and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Varchar => "varchar",
            ColumnType::Char => "char",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Datetime => "datetime",
            ColumnType::Bigint => "bigint",
            ColumnType::Decimal => "decimal",
            ColumnType::Float => "float",
            ColumnType::Double => "double",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Blob => "blob",
            ColumnType::Json => "json",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ColumnType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("Unknown column type '{}'", s))
    }
}

/// Live column definition as reported by schema introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Storage type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// In-memory model of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Logical table identifier used by callers
    pub table: String,
    /// Physical table name; defaults to `table`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Declared model attributes; defaults to the column names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,
    /// Column definitions in schema order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableSchema {
    /// Create a table whose physical name equals its logical name
    pub fn new(table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            table: table.into(),
            source: None,
            attributes: None,
            columns,
        }
    }

    /// Set the physical table name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Override the declared attribute list
    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Physical table name
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.table)
    }

    /// Declared attributes in declared order
    pub fn declared_attributes(&self) -> Vec<String> {
        match &self.attributes {
            Some(attributes) => attributes.clone(),
            None => self.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }

    /// Validates the table definition itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.table.trim().is_empty() {
            return Err("Table name must not be empty".into());
        }

        if self.source.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err("Source name must not be empty".into());
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(format!("Duplicate column '{}'", column.name));
            }
        }

        if let Some(attributes) = &self.attributes {
            let mut seen = HashSet::new();
            for attribute in attributes {
                if !seen.insert(attribute.as_str()) {
                    return Err(format!("Duplicate attribute '{}'", attribute));
                }
            }
        }

        Ok(())
    }
}
