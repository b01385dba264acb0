//! Column definitions derived from a sample row

use super::encode::{literal_cell, raw_cell};
use super::types::{ColumnDefinition, ColumnRef, Schema, SqlType};
use crate::error::Result;
use crate::types::{is_id_column, PersistProperties};
use serde_json::Value;
use std::sync::Arc;

/// Column whose SQL type is pinned by the first value it saw
///
/// The type is decided once at creation and never revisited, even when later
/// rows carry values of another kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredColumn {
    name: String,
    sql_type: SqlType,
}

impl InferredColumn {
    /// Create a column from its name and a sample value
    pub fn from_sample(name: impl Into<String>, sample: Option<&Value>) -> Self {
        Self {
            name: name.into(),
            sql_type: SqlType::infer(sample),
        }
    }

    /// Get the pinned SQL type
    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    /// Whether cells are written raw (`id` and `*_id` columns)
    pub fn is_raw(&self) -> bool {
        is_id_column(&self.name)
    }
}

impl ColumnDefinition for InferredColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_content(&self, row: &PersistProperties) -> Result<String> {
        let value = row.get(&self.name);
        if self.is_raw() {
            raw_cell(&self.name, value)
        } else {
            literal_cell(&self.name, value)
        }
    }

    fn sql_column_clause(&self, indent: &str) -> Option<String> {
        Some(format!("{indent}{} {}", self.name, self.sql_type))
    }

    fn sql_table_clause(&self, indent: &str) -> Option<String> {
        (self.name == "id").then(|| format!("{indent}PRIMARY KEY ({})", self.name))
    }
}

/// Build one inferred column per key of a sample row, in the row's key order
pub fn infer_columns(sample: &PersistProperties) -> Schema {
    sample
        .iter()
        .map(|(name, value)| Arc::new(InferredColumn::from_sample(name, Some(value))) as ColumnRef)
        .collect()
}
