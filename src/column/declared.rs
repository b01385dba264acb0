//! Explicitly declared columns

use super::encode::{literal_cell, raw_cell};
use super::types::{ColumnDefinition, SqlType};
use crate::error::Result;
use crate::types::{is_id_column, PersistProperties};

/// Column supplied up front by the caller
///
/// Nothing about it is sampled from data. Cells are raw for identifier
/// names unless overridden with [`DeclaredColumn::with_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredColumn {
    name: String,
    sql_type: SqlType,
    primary_key: bool,
    raw: bool,
}

impl DeclaredColumn {
    /// Create a declared column
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        let name = name.into();
        let raw = is_id_column(&name);
        Self {
            name,
            sql_type,
            primary_key: false,
            raw,
        }
    }

    /// Mark the column as (part of) the primary key
    #[must_use]
    pub fn with_primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    /// Write cells raw instead of as JSON literals
    #[must_use]
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Get the declared SQL type
    pub fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    /// Whether the column is part of the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

impl ColumnDefinition for DeclaredColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn cell_content(&self, row: &PersistProperties) -> Result<String> {
        let value = row.get(&self.name);
        if self.raw {
            raw_cell(&self.name, value)
        } else {
            literal_cell(&self.name, value)
        }
    }

    fn sql_column_clause(&self, indent: &str) -> Option<String> {
        Some(format!("{indent}{} {}", self.name, self.sql_type))
    }

    fn sql_table_clause(&self, indent: &str) -> Option<String> {
        self.primary_key
            .then(|| format!("{indent}PRIMARY KEY ({})", self.name))
    }
}
