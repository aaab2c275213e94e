//! Validation error taxonomy
//!
//! Error codes:
//! - DATA_TYPE (REJECT)
//! - INVALID_LENGTH (REJECT)
//! - EMPTY_LIST (REJECT)
//! - TABLE_DOES_NOT_EXISTS (REJECT)
//! - COLUMN_DOES_NOT_EXISTS (REJECT)
//! - COLUMN_DOES_NOT_SUPPORT (REJECT)
//! - ORDER_TYPES_DOES_NOT_EXISTS (REJECT)
//! - SCHEMA_UNAVAILABLE (ERROR)
//! - INVALID_CONFIG (ERROR)
//! - UNKNOWN_RULE (ERROR)

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{CatalogError, ColumnType};

/// Severity levels for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The caller's request is invalid (400-equivalent)
    Reject,
    /// The validator or its collaborators failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Broad error families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DataType,
    InvalidLength,
    Column,
    SchemaUnavailable,
    Configuration,
}

/// Specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    DataType,
    InvalidLength,
    EmptyList,
    TableDoesNotExist,
    ColumnDoesNotExist,
    ColumnDoesNotSupport,
    OrderTypesDoesNotExist,
    SchemaUnavailable,
    InvalidConfig,
    UnknownRule,
}

impl ValidationErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::DataType => "DATA_TYPE",
            ValidationErrorCode::InvalidLength => "INVALID_LENGTH",
            ValidationErrorCode::EmptyList => "EMPTY_LIST",
            ValidationErrorCode::TableDoesNotExist => "TABLE_DOES_NOT_EXISTS",
            ValidationErrorCode::ColumnDoesNotExist => "COLUMN_DOES_NOT_EXISTS",
            ValidationErrorCode::ColumnDoesNotSupport => "COLUMN_DOES_NOT_SUPPORT",
            ValidationErrorCode::OrderTypesDoesNotExist => "ORDER_TYPES_DOES_NOT_EXISTS",
            ValidationErrorCode::SchemaUnavailable => "SCHEMA_UNAVAILABLE",
            ValidationErrorCode::InvalidConfig => "INVALID_CONFIG",
            ValidationErrorCode::UnknownRule => "UNKNOWN_RULE",
        }
    }

    /// Returns the error family
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationErrorCode::DataType => ErrorKind::DataType,
            ValidationErrorCode::InvalidLength => ErrorKind::InvalidLength,
            ValidationErrorCode::EmptyList
            | ValidationErrorCode::TableDoesNotExist
            | ValidationErrorCode::ColumnDoesNotExist
            | ValidationErrorCode::ColumnDoesNotSupport
            | ValidationErrorCode::OrderTypesDoesNotExist => ErrorKind::Column,
            ValidationErrorCode::SchemaUnavailable => ErrorKind::SchemaUnavailable,
            ValidationErrorCode::InvalidConfig | ValidationErrorCode::UnknownRule => {
                ErrorKind::Configuration
            }
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self.kind() {
            ErrorKind::SchemaUnavailable | ErrorKind::Configuration => Severity::Error,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Shape a rule expected to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    String,
    Array,
}

impl ExpectedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Array => "array",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the length window was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthBound {
    /// Value must be at least the bound (too short)
    Greater,
    /// Value must be at most the bound (too long)
    Less,
}

impl LengthBound {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthBound::Greater => "greater",
            LengthBound::Less => "less",
        }
    }
}

impl fmt::Display for LengthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} than or equal to", self.as_str())
    }
}

/// A violated validation rule, with enough context to render a precise message
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid data type: expected {expected}, got {actual}")]
    DataType {
        value: Value,
        expected: ExpectedType,
        actual: &'static str,
    },

    #[error("Invalid length of '{value}': must be {bound} {limit} characters")]
    InvalidLength {
        value: String,
        bound: LengthBound,
        limit: usize,
    },

    #[error("Search list must not contain empty values")]
    EmptyList,

    #[error("Table '{table}' does not exist")]
    TableDoesNotExist { table: String },

    #[error(
        "Columns [{}] do not exist in table '{table}'; declared: [{}]",
        .columns.join(", "),
        .declared.join(", ")
    )]
    ColumnDoesNotExist {
        columns: Vec<String>,
        table: String,
        declared: Vec<String>,
    },

    #[error("Column '{column}' in table '{table}' has unsupported type '{column_type}'")]
    ColumnDoesNotSupport {
        column: String,
        column_type: ColumnType,
        table: String,
    },

    #[error(
        "Sort directions [{}] are not recognized; allowed: [{}]",
        .tokens.join(", "),
        .allowed.join(", ")
    )]
    OrderTypesDoesNotExist {
        tokens: Vec<String>,
        allowed: Vec<String>,
    },

    #[error("Schema for table '{table}' is unavailable: {reason}")]
    SchemaUnavailable { table: String, reason: String },

    #[error("Invalid validator configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown validation rule '{0}'")]
    UnknownRule(String),
}

impl ValidationError {
    /// Create a data type error for `value`
    pub fn data_type(value: &Value, expected: ExpectedType) -> Self {
        Self::DataType {
            value: value.clone(),
            expected,
            actual: json_type_name(value),
        }
    }

    /// Map a catalog failure for `table`.
    ///
    /// An unknown table is the caller's mistake; every other catalog
    /// failure means the schema source itself is unavailable.
    pub fn from_catalog(table: impl Into<String>, source: &CatalogError) -> Self {
        match source {
            CatalogError::UnknownTable(_) => Self::TableDoesNotExist {
                table: table.into(),
            },
            other => Self::schema_unavailable(table, other),
        }
    }

    /// Create a schema unavailable error from a catalog failure
    pub fn schema_unavailable(table: impl Into<String>, source: &CatalogError) -> Self {
        Self::SchemaUnavailable {
            table: table.into(),
            reason: source.to_string(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        match self {
            ValidationError::DataType { .. } => ValidationErrorCode::DataType,
            ValidationError::InvalidLength { .. } => ValidationErrorCode::InvalidLength,
            ValidationError::EmptyList => ValidationErrorCode::EmptyList,
            ValidationError::TableDoesNotExist { .. } => ValidationErrorCode::TableDoesNotExist,
            ValidationError::ColumnDoesNotExist { .. } => ValidationErrorCode::ColumnDoesNotExist,
            ValidationError::ColumnDoesNotSupport { .. } => {
                ValidationErrorCode::ColumnDoesNotSupport
            }
            ValidationError::OrderTypesDoesNotExist { .. } => {
                ValidationErrorCode::OrderTypesDoesNotExist
            }
            ValidationError::SchemaUnavailable { .. } => ValidationErrorCode::SchemaUnavailable,
            ValidationError::InvalidConfig(_) => ValidationErrorCode::InvalidConfig,
            ValidationError::UnknownRule(_) => ValidationErrorCode::UnknownRule,
        }
    }

    /// Returns the error family
    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code().severity()
    }

    /// Returns true if the caller's input caused the failure
    pub fn is_rejection(&self) -> bool {
        self.severity() == Severity::Reject
    }
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(ValidationErrorCode::EmptyList.code(), "EMPTY_LIST");
        assert_eq!(ValidationErrorCode::ColumnDoesNotExist.code(), "COLUMN_DOES_NOT_EXISTS");
        assert_eq!(ValidationErrorCode::ColumnDoesNotSupport.code(), "COLUMN_DOES_NOT_SUPPORT");
        assert_eq!(
            ValidationErrorCode::OrderTypesDoesNotExist.code(),
            "ORDER_TYPES_DOES_NOT_EXISTS"
        );
    }

    #[test]
    fn test_kinds_group_column_errors() {
        assert_eq!(ValidationErrorCode::EmptyList.kind(), ErrorKind::Column);
        assert_eq!(ValidationErrorCode::OrderTypesDoesNotExist.kind(), ErrorKind::Column);
        assert_eq!(ValidationErrorCode::UnknownRule.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(ValidationErrorCode::DataType.severity(), Severity::Reject);
        assert_eq!(ValidationErrorCode::InvalidLength.severity(), Severity::Reject);
        assert_eq!(ValidationErrorCode::SchemaUnavailable.severity(), Severity::Error);
        assert_eq!(ValidationErrorCode::InvalidConfig.severity(), Severity::Error);
    }

    #[test]
    fn test_data_type_reports_actual_shape() {
        let err = ValidationError::data_type(&json!(42), ExpectedType::Array);
        assert_eq!(err.to_string(), "Invalid data type: expected array, got int");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_column_does_not_exist_display() {
        let err = ValidationError::ColumnDoesNotExist {
            columns: vec!["qty".into()],
            table: "products".into(),
            declared: vec!["id".into(), "name".into()],
        };
        let display = err.to_string();
        assert!(display.contains("[qty]"));
        assert!(display.contains("'products'"));
        assert!(display.contains("[id, name]"));
    }

    #[test]
    fn test_invalid_length_display() {
        let err = ValidationError::InvalidLength {
            value: "ab".into(),
            bound: LengthBound::Greater,
            limit: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid length of 'ab': must be greater than or equal to 3 characters"
        );
    }

    #[test]
    fn test_unknown_table_is_a_rejection() {
        let err = ValidationError::from_catalog("nope", &CatalogError::UnknownTable("nope".into()));
        assert_eq!(err.code(), ValidationErrorCode::TableDoesNotExist);
        assert_eq!(err.kind(), ErrorKind::Column);
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Table 'nope' does not exist");
    }

    #[test]
    fn test_backend_failure_stays_schema_unavailable() {
        let err = ValidationError::from_catalog("products", &CatalogError::backend("timeout"));
        assert_eq!(err.code(), ValidationErrorCode::SchemaUnavailable);
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_schema_unavailable_wraps_catalog_error() {
        let err = ValidationError::schema_unavailable(
            "products",
            &CatalogError::UnknownTable("products".into()),
        );
        assert_eq!(err.code(), ValidationErrorCode::SchemaUnavailable);
        assert!(!err.is_rejection());
        assert!(err.to_string().contains("not registered"));
    }
}
