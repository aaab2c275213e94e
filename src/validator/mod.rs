//! Field and sort validator for search queries
//!
//! Confirms that requested columns exist on their tables with a searchable
//! storage type and that sort directions come from a fixed vocabulary.
//!
//! # Design Principles
//!
//! - Rules are a closed set, composed as data (`&[Rule]`)
//! - Fail fast: the first violated rule ends the call with a typed error
//! - No partial success: a failed call records nothing
//! - Results accumulate in a caller-owned `Fields`
//! - Schema metadata is re-read on every call

mod config;
mod errors;
mod fields;
mod reconcile;
mod rules;
mod validator;

pub use config::ValidatorConfig;
pub use errors::{
    ErrorKind, ExpectedType, LengthBound, Severity, ValidationError, ValidationErrorCode,
    ValidationResult,
};
pub use fields::{Fields, FieldsDelta, TABLES_KEY};
pub use rules::{is_blank, text_length, Rule};
pub use validator::{ValidationSession, Validator};
