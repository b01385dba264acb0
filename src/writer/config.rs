//! Writer configuration

use crate::error::{Error, Result};
use std::path::Path;

/// Default column delimiter
pub const DEFAULT_DELIMITER: &str = ",";

/// Default record separator
pub const DEFAULT_RECORD_SEPARATOR: &str = "\n";

/// Default indent for DDL clauses
pub const DEFAULT_INDENT: &str = "  ";

/// Characters that can appear outside quotes in a JSON literal cell
fn in_bare_literal(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '"' | '.' | '-' | '+')
}

/// Configuration for the tabular writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    delimiter: String,
    record_separator: String,
    table_name: Option<String>,
    indent: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            record_separator: DEFAULT_RECORD_SEPARATOR.to_string(),
            table_name: None,
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl WriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the record separator
    #[must_use]
    pub fn with_record_separator(mut self, separator: impl Into<String>) -> Self {
        self.record_separator = separator.into();
        self
    }

    /// Set the table name used in DDL (defaults to the file stem)
    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Set the indent placed before each DDL clause
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Get the column delimiter
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Get the record separator
    pub fn record_separator(&self) -> &str {
        &self.record_separator
    }

    /// Get the explicit table name, if any
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Table name for a file: the explicit name, or the file stem
    pub fn table_name_for(&self, file_name: &str) -> String {
        if let Some(name) = &self.table_name {
            return name.clone();
        }
        Path::new(file_name)
            .file_stem()
            .map_or_else(|| file_name.to_string(), |s| s.to_string_lossy().to_string())
    }

    /// Get the DDL indent
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Check that delimiter and record separator stay distinguishable from cells
    ///
    /// The delimiter must be one character and neither it nor any separator
    /// character may occur in an unquoted number, boolean or `null`.
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.delimiter.chars();
        let delimiter = match (chars.next(), chars.next()) {
            (Some(ch), None) => ch,
            _ => {
                return Err(Error::invalid_value(
                    "delimiter",
                    format!("must be a single character, got {:?}", self.delimiter),
                ))
            }
        };
        if delimiter == '"' {
            return Err(Error::invalid_value("delimiter", "cannot be a double quote"));
        }
        if in_bare_literal(delimiter) {
            return Err(Error::invalid_value(
                "delimiter",
                format!("{delimiter:?} can appear in unquoted numeric or boolean cells"),
            ));
        }

        if self.record_separator.is_empty() {
            return Err(Error::invalid_value("record_separator", "cannot be empty"));
        }
        if self.record_separator.contains(delimiter) {
            return Err(Error::invalid_value(
                "record_separator",
                "cannot contain the delimiter",
            ));
        }
        if let Some(ch) = self.record_separator.chars().find(|&ch| in_bare_literal(ch)) {
            return Err(Error::invalid_value(
                "record_separator",
                format!("{ch:?} can appear in cell content"),
            ));
        }
        Ok(())
    }
}
