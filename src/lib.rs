//! search-validator - Field and sort validation for search queries
//!
//! Confirms requested columns exist on their tables with a searchable storage
//! type, and that sort directions come from a fixed vocabulary, before any
//! query is built.

pub mod catalog;
pub mod observability;
pub mod validator;
