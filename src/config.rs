//! Export job configuration
//!
//! An export job is described in YAML: where the file goes, how it is
//! delimited, which namespace ids hang off, and optionally an explicit
//! column list and required fields.

use crate::column::{ColumnRef, DeclaredColumn, Schema, SqlType};
use crate::error::{Error, Result};
use crate::namespace::IdNamespace;
use crate::writer::{RequireFields, WriterConfig, DEFAULT_DELIMITER, DEFAULT_RECORD_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Top-Level Export Config
// ============================================================================

/// Complete export job loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory
    pub destination: PathBuf,

    /// Output file name inside `destination`
    pub file_name: String,

    /// Parent namespace: UUID text, or any other text used as a seed
    pub namespace: String,

    /// Table name for DDL (defaults to the file stem)
    #[serde(default)]
    pub table_name: Option<String>,

    /// Column delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Record separator
    #[serde(default = "default_record_separator")]
    pub record_separator: String,

    /// Explicit columns; inferred from the first row when absent
    #[serde(default)]
    pub columns: Option<Vec<ColumnConfig>>,

    /// Fields that must be present and non-null for a row to be written
    #[serde(default)]
    pub require: Vec<String>,

    /// Where to write the `CREATE TABLE` statement, if anywhere
    #[serde(default)]
    pub ddl_file: Option<PathBuf>,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_record_separator() -> String {
    DEFAULT_RECORD_SEPARATOR.to_string()
}

// ============================================================================
// Columns
// ============================================================================

/// Explicit column declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,

    /// Part of the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Write cells raw; defaults to true for `id` and `*_id` columns
    #[serde(default)]
    pub raw: Option<bool>,
}

/// Declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Decimal,
    #[default]
    String,
}

impl From<ColumnType> for SqlType {
    fn from(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Integer => SqlType::Integer,
            ColumnType::Decimal => SqlType::decimal(),
            ColumnType::String => SqlType::varchar(),
        }
    }
}

impl ColumnConfig {
    /// Build the column definition
    pub fn to_column(&self) -> DeclaredColumn {
        let column = DeclaredColumn::new(&self.name, self.column_type.into())
            .with_primary_key(self.primary_key);
        match self.raw {
            Some(raw) => column.with_raw(raw),
            None => column,
        }
    }
}

// ============================================================================
// Derived Settings
// ============================================================================

impl ExportConfig {
    /// Parent namespace for this job
    pub fn parent_namespace(&self) -> IdNamespace {
        IdNamespace::parse_or_seed(&self.namespace)
    }

    /// Writer configuration
    pub fn writer_config(&self) -> WriterConfig {
        let config = WriterConfig::new()
            .with_delimiter(&self.delimiter)
            .with_record_separator(&self.record_separator);
        match &self.table_name {
            Some(name) => config.with_table_name(name),
            None => config,
        }
    }

    /// Explicit schema, if columns were declared
    pub fn schema(&self) -> Option<Schema> {
        self.columns.as_ref().map(|columns| {
            columns
                .iter()
                .map(|c| Arc::new(c.to_column()) as ColumnRef)
                .collect()
        })
    }

    /// Required-field filter, if any fields are required
    pub fn row_filter(&self) -> Option<RequireFields> {
        (!self.require.is_empty()).then(|| RequireFields::new(self.require.iter().cloned()))
    }

    /// Path of the output file
    pub fn output_path(&self) -> PathBuf {
        self.destination.join(&self.file_name)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(Error::invalid_value("file_name", "cannot be empty"));
        }

        if self.namespace.is_empty() {
            return Err(Error::invalid_value("namespace", "cannot be empty"));
        }

        self.writer_config().validate()?;

        if let Some(columns) = &self.columns {
            let mut seen = HashSet::new();
            for column in columns {
                if column.name.is_empty() {
                    return Err(Error::config("Column name cannot be empty"));
                }
                if !seen.insert(column.name.as_str()) {
                    return Err(Error::config(format!(
                        "Duplicate column name: {}",
                        column.name
                    )));
                }
            }
        }

        Ok(())
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load an export config from a YAML file
pub fn load_export_config(path: impl AsRef<Path>) -> Result<ExportConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read export config '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_export_config_from_str(&content)
}

/// Load an export config from a YAML string
pub fn load_export_config_from_str(yaml: &str) -> Result<ExportConfig> {
    let config: ExportConfig = serde_yaml::from_str(yaml)?;

    config.validate()?;
    Ok(config)
}
