//! Accumulated validation results
//!
//! Layout:
//! - `tables.<physical>` = logical table identifier
//! - `<category>.<physical>.<column>` = storage type tag (column checks)
//! - `<category>.<physical>` = normalized sort mapping (sort checks)
//! - `<category>` = raw value (pass-through registration)
//!
//! Entries keep insertion order, so columns appear in schema order.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::ColumnType;

/// Key under which physical-to-logical table names are recorded
pub const TABLES_KEY: &str = "tables";

/// Validated tables, columns and sort specifications.
///
/// Only grows through `apply`; never reset except by `clear`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields {
    root: Map<String, Value>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Physical table name -> logical identifier
    pub fn tables(&self) -> Option<&Map<String, Value>> {
        self.root.get(TABLES_KEY).and_then(Value::as_object)
    }

    /// Logical identifier recorded for a physical table
    pub fn logical_table(&self, physical: &str) -> Option<&str> {
        self.tables()?.get(physical)?.as_str()
    }

    /// Everything recorded under `category`
    pub fn category(&self, category: &str) -> Option<&Value> {
        self.root.get(category)
    }

    /// Column name -> type recorded for `table` under `category`, in schema order
    pub fn columns(&self, category: &str, table: &str) -> Option<Vec<(&str, ColumnType)>> {
        let entries = self.category(category)?.get(table)?.as_object()?;
        Some(
            entries
                .iter()
                .filter_map(|(name, ty)| {
                    let ty: ColumnType = ty.as_str()?.parse().ok()?;
                    Some((name.as_str(), ty))
                })
                .collect(),
        )
    }

    /// Column name -> lowercase direction recorded for `table` under `category`
    pub fn sort(&self, category: &str, table: &str) -> Option<Vec<(&str, &str)>> {
        let entries = self.category(category)?.get(table)?.as_object()?;
        Some(
            entries
                .iter()
                .filter_map(|(column, dir)| Some((column.as_str(), dir.as_str()?)))
                .collect(),
        )
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Drop everything accumulated so far
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Apply every pending assignment, in the order it was staged
    pub fn apply(&mut self, delta: FieldsDelta) {
        for assignment in delta.assignments {
            match assignment {
                Assignment::Table { physical, logical } => {
                    object_entry(&mut self.root, TABLES_KEY).insert(physical, Value::String(logical));
                }
                Assignment::Column {
                    category,
                    table,
                    column,
                    column_type,
                } => {
                    let by_table = object_entry(&mut self.root, &category);
                    object_entry(by_table, &table)
                        .insert(column, Value::String(column_type.as_str().to_string()));
                }
                Assignment::Sort {
                    category,
                    table,
                    sort,
                } => {
                    object_entry(&mut self.root, &category).insert(table, Value::Object(sort));
                }
                Assignment::Category { category, value } => {
                    self.root.insert(category, value);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Assignment {
    Table {
        physical: String,
        logical: String,
    },
    Column {
        category: String,
        table: String,
        column: String,
        column_type: ColumnType,
    },
    Sort {
        category: String,
        table: String,
        sort: Map<String, Value>,
    },
    Category {
        category: String,
        value: Value,
    },
}

/// Assignments staged by one `verify` call.
///
/// Discarded on failure, applied to `Fields` on success.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldsDelta {
    assignments: Vec<Assignment>,
}

impl FieldsDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_table(&mut self, physical: impl Into<String>, logical: impl Into<String>) {
        self.assignments.push(Assignment::Table {
            physical: physical.into(),
            logical: logical.into(),
        });
    }

    pub fn record_column(
        &mut self,
        category: impl Into<String>,
        table: impl Into<String>,
        column: impl Into<String>,
        column_type: ColumnType,
    ) {
        self.assignments.push(Assignment::Column {
            category: category.into(),
            table: table.into(),
            column: column.into(),
            column_type,
        });
    }

    pub fn record_sort(
        &mut self,
        category: impl Into<String>,
        table: impl Into<String>,
        sort: Map<String, Value>,
    ) {
        self.assignments.push(Assignment::Sort {
            category: category.into(),
            table: table.into(),
            sort,
        });
    }

    pub fn record_category(&mut self, category: impl Into<String>, value: Value) {
        self.assignments.push(Assignment::Category {
            category: category.into(),
            value,
        });
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Mapping stored under `key`, replacing any non-mapping value found there
fn object_entry<'m>(map: &'m mut Map<String, Value>, key: &str) -> &'m mut Map<String, Value> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    as_object_slot(slot)
}

fn as_object_slot(slot: &mut Value) -> &mut Map<String, Value> {
    match slot {
        Value::Object(entries) => entries,
        other => {
            *other = Value::Object(Map::new());
            as_object_slot(other)
        }
    }
}
