//! Schema-aware rules: reconcile requested columns and sort specifications
//! against the live schema.
//!
//! For each (table, request) pair, in input order:
//! 1. Resolve the table's declared attributes
//!    (an unregistered table fails with TABLE_DOES_NOT_EXISTS)
//! 2. Requested names outside that set fail with COLUMN_DOES_NOT_EXISTS
//! 3. `exists`: walk live column descriptors in schema order, check each
//!    requested column's storage type and stage `column -> type`
//! 4. `ordered`: lowercase every direction, check it against the allowed
//!    tokens and stage the normalized mapping
//! 5. Stage `tables[physical] = logical`

use serde_json::{Map, Value};

use super::config::ValidatorConfig;
use super::errors::{ExpectedType, ValidationError, ValidationResult};
use super::fields::FieldsDelta;
use crate::catalog::SchemaProvider;
use crate::observability::MetricsRegistry;

/// Everything a schema-aware rule reads during one `verify` call
pub(crate) struct RuleContext<'c, P: SchemaProvider + ?Sized> {
    pub config: &'c ValidatorConfig,
    pub provider: &'c P,
    pub metrics: &'c MetricsRegistry,
    /// Category the staged results are filed under
    pub category: &'c str,
}

/// Check a `table -> [column, ...]` mapping
pub(crate) fn exists<P: SchemaProvider + ?Sized>(
    value: &Value,
    ctx: &RuleContext<'_, P>,
    delta: &mut FieldsDelta,
) -> ValidationResult<()> {
    let tables = as_mapping(value)?;

    for (table, requested) in tables {
        let requested = column_list(requested)?;
        let declared = declared_attributes(ctx, table)?;
        check_declared(table, &requested, &declared)?;

        let physical = ctx
            .provider
            .physical_name(table)
            .map_err(|e| ValidationError::from_catalog(table, &e))?;
        let descriptors = ctx
            .provider
            .column_descriptors(table)
            .map_err(|e| ValidationError::from_catalog(table, &e))?;

        if let Some(orphan) = requested
            .iter()
            .find(|name| !descriptors.iter().any(|d| d.name == **name))
        {
            return Err(ValidationError::SchemaUnavailable {
                table: table.clone(),
                reason: format!("column '{}' is declared but has no live definition", orphan),
            });
        }

        delta.record_table(&physical, table);

        for descriptor in descriptors.iter().filter(|d| requested.contains(&d.name.as_str())) {
            if !ctx.config.allows_column_type(descriptor.column_type) {
                return Err(ValidationError::ColumnDoesNotSupport {
                    column: descriptor.name.clone(),
                    column_type: descriptor.column_type,
                    table: table.clone(),
                });
            }
            delta.record_column(ctx.category, &physical, &descriptor.name, descriptor.column_type);
        }
    }

    Ok(())
}

/// Check a `table -> {column: direction}` mapping
pub(crate) fn ordered<P: SchemaProvider + ?Sized>(
    value: &Value,
    ctx: &RuleContext<'_, P>,
    delta: &mut FieldsDelta,
) -> ValidationResult<()> {
    let tables = as_mapping(value)?;

    for (table, sort) in tables {
        let sort = as_mapping(sort)?;
        let columns: Vec<&str> = sort.keys().map(String::as_str).collect();
        let declared = declared_attributes(ctx, table)?;
        check_declared(table, &columns, &declared)?;

        let mut normalized = Map::new();
        let mut unknown: Vec<String> = Vec::new();
        for (column, direction) in sort {
            let direction = direction
                .as_str()
                .ok_or_else(|| ValidationError::data_type(direction, ExpectedType::String))?
                .to_lowercase();
            if !ctx.config.allows_sort_token(&direction) && !unknown.contains(&direction) {
                unknown.push(direction.clone());
            }
            normalized.insert(column.clone(), Value::String(direction));
        }

        if !unknown.is_empty() {
            return Err(ValidationError::OrderTypesDoesNotExist {
                tokens: unknown,
                allowed: ctx.config.allowed_sort_tokens().iter().cloned().collect(),
            });
        }

        let physical = ctx
            .provider
            .physical_name(table)
            .map_err(|e| ValidationError::from_catalog(table, &e))?;

        delta.record_table(&physical, table);
        delta.record_sort(ctx.category, &physical, normalized);
    }

    Ok(())
}

fn as_mapping(value: &Value) -> ValidationResult<&Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::data_type(value, ExpectedType::Array))
}

fn column_list(value: &Value) -> ValidationResult<Vec<&str>> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::data_type(value, ExpectedType::Array))?;

    items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| ValidationError::data_type(item, ExpectedType::String))
        })
        .collect()
}

fn declared_attributes<P: SchemaProvider + ?Sized>(
    ctx: &RuleContext<'_, P>,
    table: &str,
) -> ValidationResult<Vec<String>> {
    ctx.metrics.increment_schema_lookups();
    ctx.provider
        .declared_attributes(table)
        .map_err(|e| ValidationError::from_catalog(table, &e))
}

/// Fails with every requested name missing from `declared`, in request order
fn check_declared(table: &str, requested: &[&str], declared: &[String]) -> ValidationResult<()> {
    let mut missing: Vec<String> = Vec::new();
    for name in requested {
        if !declared.iter().any(|d| d == name) && !missing.iter().any(|m| m == name) {
            missing.push((*name).to_string());
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    Err(ValidationError::ColumnDoesNotExist {
        columns: missing,
        table: table.to_string(),
        declared: declared.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, CatalogResult, ColumnDescriptor, ColumnType, MemoryCatalog, TableSchema};
    use crate::validator::errors::ValidationErrorCode;
    use crate::validator::fields::Fields;
    use serde_json::json;

    fn catalog() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog
            .register(
                TableSchema::new(
                    "Products",
                    vec![
                        ColumnDescriptor::new("id", ColumnType::Integer),
                        ColumnDescriptor::new("name", ColumnType::Varchar),
                        ColumnDescriptor::new("price", ColumnType::Integer),
                        ColumnDescriptor::new("photo", ColumnType::Blob),
                    ],
                )
                .with_source("products"),
            )
            .unwrap();
        catalog
    }

    fn run<F>(rule: F, value: Value) -> ValidationResult<Fields>
    where
        F: Fn(&Value, &RuleContext<'_, MemoryCatalog>, &mut FieldsDelta) -> ValidationResult<()>,
    {
        let catalog = catalog();
        let config = ValidatorConfig::default();
        let metrics = MetricsRegistry::new();
        let ctx = RuleContext {
            config: &config,
            provider: &catalog,
            metrics: &metrics,
            category: "cast",
        };
        let mut delta = FieldsDelta::new();
        rule(&value, &ctx, &mut delta)?;

        let mut fields = Fields::new();
        fields.apply(delta);
        Ok(fields)
    }

    #[test]
    fn test_exists_records_schema_order() {
        let fields = run(exists, json!({"Products": ["price", "name"]})).unwrap();

        assert_eq!(
            fields.columns("cast", "products").unwrap(),
            vec![("name", ColumnType::Varchar), ("price", ColumnType::Integer)]
        );
        assert_eq!(fields.logical_table("products"), Some("Products"));
    }

    #[test]
    fn test_exists_reports_missing_names_once() {
        let err = run(exists, json!({"Products": ["qty", "name", "qty", "sku"]})).unwrap_err();

        match err {
            ValidationError::ColumnDoesNotExist { columns, table, declared } => {
                assert_eq!(columns, vec!["qty", "sku"]);
                assert_eq!(table, "Products");
                assert_eq!(declared, vec!["id", "name", "price", "photo"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exists_rejects_unsupported_type() {
        let err = run(exists, json!({"Products": ["photo"]})).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ColumnDoesNotSupport { ref column, column_type: ColumnType::Blob, .. } if column == "photo"
        ));
    }

    #[test]
    fn test_exists_requires_lists_of_names() {
        let err = run(exists, json!({"Products": "name"})).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::DataType);

        let err = run(exists, json!({"Products": ["name", 7]})).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::DataType);

        let err = run(exists, json!(["name"])).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::DataType);
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let err = run(exists, json!({"Orders": ["id"]})).unwrap_err();
        assert_eq!(err, ValidationError::TableDoesNotExist { table: "Orders".into() });
        assert!(err.is_rejection());

        let err = run(ordered, json!({"Orders": {"id": "asc"}})).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::TableDoesNotExist);
    }

    #[test]
    fn test_declared_without_descriptor_is_schema_unavailable() {
        let mut catalog = MemoryCatalog::new();
        catalog
            .register(
                TableSchema::new("Products", vec![ColumnDescriptor::new("id", ColumnType::Integer)])
                    .with_attributes(["id", "legacy"]),
            )
            .unwrap();
        let config = ValidatorConfig::default();
        let metrics = MetricsRegistry::new();
        let ctx = RuleContext {
            config: &config,
            provider: &catalog,
            metrics: &metrics,
            category: "cast",
        };

        let err = exists(&json!({"Products": ["legacy"]}), &ctx, &mut FieldsDelta::new()).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::SchemaUnavailable);
        assert!(err.to_string().contains("legacy"));
    }

    #[test]
    fn test_ordered_normalizes_case() {
        let fields = run(ordered, json!({"Products": {"price": "DESC", "name": "Asc"}})).unwrap();

        assert_eq!(
            fields.sort("cast", "products").unwrap(),
            vec![("price", "desc"), ("name", "asc")]
        );
        assert_eq!(fields.logical_table("products"), Some("Products"));
    }

    #[test]
    fn test_ordered_rejects_unknown_direction() {
        let err = run(ordered, json!({"Products": {"price": "sideways", "name": "SIDEWAYS"}})).unwrap_err();

        match err {
            ValidationError::OrderTypesDoesNotExist { tokens, allowed } => {
                assert_eq!(tokens, vec!["sideways"]);
                assert_eq!(allowed, vec!["asc", "ascending", "desc", "descending"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ordered_rejects_undeclared_column() {
        let err = run(ordered, json!({"Products": {"qty": "asc"}})).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::ColumnDoesNotExist);
    }

    #[test]
    fn test_ordered_requires_string_directions() {
        let err = run(ordered, json!({"Products": {"price": 1}})).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::DataType);
    }

    struct Offline;

    impl SchemaProvider for Offline {
        fn declared_attributes(&self, _table: &str) -> CatalogResult<Vec<String>> {
            Err(CatalogError::backend("connection refused"))
        }

        fn column_descriptors(&self, _table: &str) -> CatalogResult<Vec<ColumnDescriptor>> {
            Err(CatalogError::backend("connection refused"))
        }

        fn physical_name(&self, table: &str) -> CatalogResult<String> {
            Ok(table.to_string())
        }
    }

    #[test]
    fn test_provider_failure_propagates() {
        let config = ValidatorConfig::default();
        let metrics = MetricsRegistry::new();
        let ctx = RuleContext {
            config: &config,
            provider: &Offline,
            metrics: &metrics,
            category: "sort",
        };

        let err = ordered(&json!({"Products": {"id": "asc"}}), &ctx, &mut FieldsDelta::new()).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::SchemaUnavailable);
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(metrics.snapshot().schema_lookups, 1);
    }
}
