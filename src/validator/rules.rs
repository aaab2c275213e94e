//! Rule identifiers and the scalar rule functions
//!
//! Each rule either passes or fails with a specific error; there is no
//! boolean "false" outcome. The schema-aware rules (`Exists`, `Ordered`)
//! live in `reconcile`.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::config::ValidatorConfig;
use super::errors::{ExpectedType, LengthBound, ValidationError, ValidationResult};

/// A named validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Value is non-null and non-blank
    NotNull,
    /// Value is a list or a mapping
    IsArray,
    /// Value has at least one entry
    NotEmpty,
    /// Text is at least `min_length` characters
    NotFew,
    /// Text is at most `max_length` characters
    NotMuch,
    /// Requested columns exist with a searchable type
    Exists,
    /// Sort columns exist and directions are recognized
    Ordered,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::NotNull,
        Rule::IsArray,
        Rule::NotEmpty,
        Rule::NotFew,
        Rule::NotMuch,
        Rule::Exists,
        Rule::Ordered,
    ];

    /// Canonical rule name
    pub fn name(&self) -> &'static str {
        match self {
            Rule::NotNull => "not_null",
            Rule::IsArray => "is_array",
            Rule::NotEmpty => "not_empty",
            Rule::NotFew => "not_few",
            Rule::NotMuch => "not_much",
            Rule::Exists => "exists",
            Rule::Ordered => "ordered",
        }
    }

    /// Callback-style alias accepted for compatibility with older rule lists
    pub fn legacy_name(&self) -> &'static str {
        match self {
            Rule::NotNull => "isNotNull",
            Rule::IsArray => "isArray",
            Rule::NotEmpty => "isNotEmpty",
            Rule::NotFew => "isNotFew",
            Rule::NotMuch => "isNotMuch",
            Rule::Exists => "isExists",
            Rule::Ordered => "isOrdered",
        }
    }

    /// Returns true if the rule consults the schema provider and records results
    pub fn is_schema_aware(&self) -> bool {
        matches!(self, Rule::Exists | Rule::Ordered)
    }

    /// Resolve a list of rule names, failing on the first unknown one
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> ValidationResult<Vec<Rule>> {
        names.iter().map(|n| n.as_ref().parse()).collect()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Rule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rule::ALL
            .iter()
            .copied()
            .find(|r| r.name() == s || r.legacy_name() == s)
            .ok_or_else(|| ValidationError::UnknownRule(s.to_string()))
    }
}

/// Number of Unicode scalar values in `text`.
///
/// Multi-byte characters count once; combining marks count separately.
pub fn text_length(text: &str) -> usize {
    text.chars().count()
}

/// Null, empty string, empty list and empty mapping are blank
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub fn not_null(value: &Value) -> ValidationResult<()> {
    if is_blank(value) {
        return Err(ValidationError::data_type(value, ExpectedType::String));
    }
    Ok(())
}

pub fn is_array(value: &Value) -> ValidationResult<()> {
    if !(value.is_array() || value.is_object()) {
        return Err(ValidationError::data_type(value, ExpectedType::Array));
    }
    Ok(())
}

pub fn not_empty(value: &Value) -> ValidationResult<()> {
    if is_blank(value) {
        return Err(ValidationError::EmptyList);
    }
    Ok(())
}

pub fn not_few(value: &Value, config: &ValidatorConfig) -> ValidationResult<()> {
    let text = measured_text(value)?;
    if text_length(&text) < config.min_length() {
        return Err(ValidationError::InvalidLength {
            value: text.into_owned(),
            bound: LengthBound::Greater,
            limit: config.min_length(),
        });
    }
    Ok(())
}

pub fn not_much(value: &Value, config: &ValidatorConfig) -> ValidationResult<()> {
    let text = measured_text(value)?;
    if text_length(&text) > config.max_length() {
        return Err(ValidationError::InvalidLength {
            value: text.into_owned(),
            bound: LengthBound::Less,
            limit: config.max_length(),
        });
    }
    Ok(())
}

/// Text a length rule measures; numbers are measured by their decimal form
fn measured_text(value: &Value) -> ValidationResult<Cow<'_, str>> {
    match value {
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Ok(Cow::Owned(n.to_string())),
        other => Err(ValidationError::data_type(other, ExpectedType::String)),
    }
}
