//! Column definition trait and SQL column types

use crate::error::Result;
use crate::types::PersistProperties;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Total digits of the inferred decimal type
pub const DECIMAL_PRECISION: u8 = 16;

/// Fractional digits of the inferred decimal type
pub const DECIMAL_SCALE: u8 = 2;

/// Upper bound for the inferred string type
pub const VARCHAR_LENGTH: u32 = 8192;

/// SQL type of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Decimal { precision: u8, scale: u8 },
    Varchar { length: u32 },
}

impl SqlType {
    /// Fixed-precision decimal with the default precision and scale
    pub const fn decimal() -> Self {
        SqlType::Decimal {
            precision: DECIMAL_PRECISION,
            scale: DECIMAL_SCALE,
        }
    }

    /// Bounded string with the default length
    pub const fn varchar() -> Self {
        SqlType::Varchar {
            length: VARCHAR_LENGTH,
        }
    }

    /// Classify a sample value
    ///
    /// Integral numbers map to `INTEGER`, fractional numbers to `DECIMAL(16,2)`,
    /// everything else (including null, booleans, arrays and objects) to `VARCHAR(8192)`.
    /// Strings that parse fully as a finite float count as numbers.
    pub fn infer(sample: Option<&Value>) -> Self {
        match sample.and_then(numeric_value) {
            Some(n) if n.fract() == 0.0 => SqlType::Integer,
            Some(_) => SqlType::decimal(),
            None => SqlType::varchar(),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Integer => write!(f, "INTEGER"),
            SqlType::Decimal { precision, scale } => write!(f, "DECIMAL({precision},{scale})"),
            SqlType::Varchar { length } => write!(f, "VARCHAR({length})"),
        }
    }
}

/// Numeric reading of a value, if it has one
///
/// Numbers are taken as-is; strings must parse completely as a finite float.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// One column of a tabular export
///
/// Implementations render the header, the cell for a given row and
/// optionally their part of the `CREATE TABLE` statement.
/// Definitions are immutable once created.
pub trait ColumnDefinition: fmt::Debug + Send + Sync {
    /// Column name
    fn name(&self) -> &str;

    /// Header text for this column
    fn header(&self) -> String {
        self.name().to_string()
    }

    /// Serialized cell value for a row
    ///
    /// Rows that lack this column must still render a cell.
    fn cell_content(&self, row: &PersistProperties) -> Result<String>;

    /// Column clause such as `amount DECIMAL(16,2)`
    fn sql_column_clause(&self, _indent: &str) -> Option<String> {
        None
    }

    /// Table-level clause such as `PRIMARY KEY (id)`
    fn sql_table_clause(&self, _indent: &str) -> Option<String> {
        None
    }
}

/// Shared handle to a column definition
pub type ColumnRef = Arc<dyn ColumnDefinition>;

/// Ordered list of column definitions
pub type Schema = Vec<ColumnRef>;
