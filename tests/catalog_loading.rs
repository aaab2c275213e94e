//! Catalog Loading Tests
//!
//! File-backed catalogs and configuration feeding a validator.

use std::fs;

use search_validator::catalog::{CatalogError, ColumnType, MemoryCatalog, SchemaProvider};
use search_validator::validator::{Fields, Rule, ValidationErrorCode, Validator, ValidatorConfig};
use serde_json::json;
use tempfile::TempDir;

fn write_catalog(dir: &std::path::Path) {
    fs::write(
        dir.join("products.json"),
        json!({
            "table": "Products",
            "source": "shop_products",
            "columns": [
                {"name": "id", "type": "integer"},
                {"name": "title", "type": "text"},
                {"name": "added", "type": "date"}
            ]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(
        dir.join("orders.json"),
        json!({
            "table": "Orders",
            "attributes": ["id", "total"],
            "columns": [
                {"name": "id", "type": "bigint"},
                {"name": "total", "type": "decimal"},
                {"name": "internal_flag", "type": "boolean"}
            ]
        })
        .to_string(),
    )
    .unwrap();
}

#[test]
fn test_loaded_catalog_serves_validator() {
    let tmp = TempDir::new().unwrap();
    write_catalog(tmp.path());

    let mut catalog = MemoryCatalog::new();
    assert_eq!(catalog.load_dir(tmp.path()).unwrap(), 2);

    let validator = Validator::new(&catalog);
    let mut fields = Fields::new();
    validator
        .verify(&json!({"Products": ["added", "title"]}), &[Rule::Exists], "select", &mut fields)
        .unwrap();

    assert_eq!(fields.logical_table("shop_products"), Some("Products"));
    assert_eq!(
        fields.columns("select", "shop_products").unwrap(),
        vec![("title", ColumnType::Text), ("added", ColumnType::Date)]
    );
}

#[test]
fn test_attributes_narrow_searchable_columns() {
    let tmp = TempDir::new().unwrap();
    write_catalog(tmp.path());

    let mut catalog = MemoryCatalog::new();
    catalog.load_dir(tmp.path()).unwrap();

    assert_eq!(catalog.declared_attributes("Orders").unwrap(), vec!["id", "total"]);

    let validator = Validator::new(&catalog);
    let mut fields = Fields::new();
    let err = validator
        .verify(&json!({"Orders": ["internal_flag"]}), &[Rule::Exists], "select", &mut fields)
        .unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::ColumnDoesNotExist);
}

#[test]
fn test_config_file_drives_type_whitelist() {
    let tmp = TempDir::new().unwrap();
    write_catalog(tmp.path());
    let config_path = tmp.path().join("validator.cfg");
    fs::write(&config_path, r#"{"allowed_column_types": ["bigint", "decimal"]}"#).unwrap();

    let mut catalog = MemoryCatalog::new();
    catalog.load_dir(tmp.path()).unwrap();
    let config = ValidatorConfig::load(&config_path).unwrap();
    let validator = Validator::with_config(&catalog, config);
    let mut fields = Fields::new();

    assert!(validator
        .verify(&json!({"Orders": ["id", "total"]}), &[Rule::Exists], "select", &mut fields)
        .is_ok());

    let err = validator
        .verify(&json!({"Products": ["title"]}), &[Rule::Exists], "select", &mut fields)
        .unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::ColumnDoesNotSupport);
}

#[test]
fn test_duplicate_table_across_files() {
    let tmp = TempDir::new().unwrap();
    write_catalog(tmp.path());
    fs::write(
        tmp.path().join("products_copy.json"),
        json!({"table": "Products", "columns": []}).to_string(),
    )
    .unwrap();

    let mut catalog = MemoryCatalog::new();
    let err = catalog.load_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateTable(name) if name == "Products"));
}

#[test]
fn test_unknown_column_type_in_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("geo.json"),
        json!({"table": "Places", "columns": [{"name": "area", "type": "polygon"}]}).to_string(),
    )
    .unwrap();

    let mut catalog = MemoryCatalog::new();
    let err = catalog.load_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Malformed { .. }));
    assert!(err.to_string().contains("geo.json"));
}
