//! Validator configuration
//!
//! All fields are optional in the JSON file and default to:
//! - min_length: 3
//! - max_length: 128
//! - allowed_column_types: integer, varchar, char, text, date, datetime
//! - allowed_sort_tokens: asc, desc, ascending, descending
//!
//! Invariants, enforced on load and by every setter:
//! - min_length <= max_length
//! - at least one allowed column type
//! - at least one allowed sort token

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ValidationError, ValidationResult};
use crate::catalog::ColumnType;
use crate::observability::{log_event_with_fields, Event};

/// Length and vocabulary bounds applied by the rule functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum search value length, in characters
    #[serde(default = "default_min_length")]
    min_length: usize,

    /// Maximum search value length, in characters
    #[serde(default = "default_max_length")]
    max_length: usize,

    /// Column storage types a search may target
    #[serde(default = "default_column_types")]
    allowed_column_types: BTreeSet<ColumnType>,

    /// Recognized sort directions (lowercase)
    #[serde(default = "default_sort_tokens")]
    allowed_sort_tokens: BTreeSet<String>,
}

fn default_min_length() -> usize {
    3
}
fn default_max_length() -> usize {
    128
}
fn default_column_types() -> BTreeSet<ColumnType> {
    [
        ColumnType::Integer,
        ColumnType::Varchar,
        ColumnType::Char,
        ColumnType::Text,
        ColumnType::Date,
        ColumnType::Datetime,
    ]
    .into_iter()
    .collect()
}
fn default_sort_tokens() -> BTreeSet<String> {
    ["asc", "desc", "ascending", "descending"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            allowed_column_types: default_column_types(),
            allowed_sort_tokens: default_sort_tokens(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ValidationResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ValidationError::invalid_config(format!("Failed to read config: {}", e))
        })?;

        let config = Self::from_json(&content)?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);

        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        let mut config: ValidatorConfig = serde_json::from_str(json).map_err(|e| {
            ValidationError::invalid_config(format!("Invalid config JSON: {}", e))
        })?;

        config.allowed_sort_tokens = normalize_tokens(config.allowed_sort_tokens);
        config.validate()?;

        Ok(config)
    }

    /// Check every invariant
    pub fn validate(&self) -> ValidationResult<()> {
        check_bounds(self.min_length, self.max_length)?;

        if self.allowed_column_types.is_empty() {
            return Err(ValidationError::invalid_config(
                "allowed_column_types must not be empty",
            ));
        }

        if self.allowed_sort_tokens.is_empty() {
            return Err(ValidationError::invalid_config(
                "allowed_sort_tokens must not be empty",
            ));
        }

        Ok(())
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn allowed_column_types(&self) -> &BTreeSet<ColumnType> {
        &self.allowed_column_types
    }

    pub fn allowed_sort_tokens(&self) -> &BTreeSet<String> {
        &self.allowed_sort_tokens
    }

    /// Returns true if `column_type` may be searched
    pub fn allows_column_type(&self, column_type: ColumnType) -> bool {
        self.allowed_column_types.contains(&column_type)
    }

    /// Returns true if the lowercase `token` is a recognized sort direction
    pub fn allows_sort_token(&self, token: &str) -> bool {
        self.allowed_sort_tokens.contains(token)
    }

    /// Set the minimum length; fails if it would exceed the maximum
    pub fn set_min_length(&mut self, min_length: usize) -> ValidationResult<&mut Self> {
        check_bounds(min_length, self.max_length)?;
        self.min_length = min_length;
        Ok(self)
    }

    /// Set the maximum length; fails if it would fall below the minimum
    pub fn set_max_length(&mut self, max_length: usize) -> ValidationResult<&mut Self> {
        check_bounds(self.min_length, max_length)?;
        self.max_length = max_length;
        Ok(self)
    }

    /// Set both bounds at once
    pub fn set_length_bounds(&mut self, min_length: usize, max_length: usize) -> ValidationResult<&mut Self> {
        check_bounds(min_length, max_length)?;
        self.min_length = min_length;
        self.max_length = max_length;
        Ok(self)
    }

    /// Replace the allowed column types
    pub fn set_allowed_column_types(
        &mut self,
        types: impl IntoIterator<Item = ColumnType>,
    ) -> ValidationResult<&mut Self> {
        let types: BTreeSet<ColumnType> = types.into_iter().collect();
        if types.is_empty() {
            return Err(ValidationError::invalid_config(
                "allowed_column_types must not be empty",
            ));
        }
        self.allowed_column_types = types;
        Ok(self)
    }

    /// Replace the allowed sort tokens; tokens are stored lowercase
    pub fn set_allowed_sort_tokens(
        &mut self,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> ValidationResult<&mut Self> {
        let tokens = normalize_tokens(tokens.into_iter().map(Into::into));
        if tokens.is_empty() {
            return Err(ValidationError::invalid_config(
                "allowed_sort_tokens must not be empty",
            ));
        }
        self.allowed_sort_tokens = tokens;
        Ok(self)
    }
}

fn check_bounds(min_length: usize, max_length: usize) -> ValidationResult<()> {
    if min_length > max_length {
        return Err(ValidationError::invalid_config(format!(
            "min_length ({}) must not exceed max_length ({})",
            min_length, max_length
        )));
    }
    Ok(())
}

fn normalize_tokens(tokens: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    tokens
        .into_iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
