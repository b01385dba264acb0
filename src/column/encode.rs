//! Cell encodings
//!
//! Identifier columns are written raw. Every other column is written as a
//! JSON literal, which keeps delimiters and line breaks inside quotes.

use crate::error::{Error, Result};
use serde_json::Value;

/// Render a value as-is
///
/// Absent and null values render empty. Composite values have no raw form.
pub fn raw_cell(column: &str, value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(Value::Array(_) | Value::Object(_)) => Err(Error::cell(
            column,
            "composite values cannot be written to an identifier column",
        )),
    }
}

/// Render a value as a JSON literal
///
/// Absent values render `null`. Arrays and objects are stringified first and
/// written as a quoted string so the cell stays a scalar.
pub fn literal_cell(column: &str, value: Option<&Value>) -> Result<String> {
    let encoded = match value {
        None => return Ok("null".to_string()),
        Some(v @ (Value::Array(_) | Value::Object(_))) => {
            let text = serde_json::to_string(v).map_err(|e| Error::cell(column, e.to_string()))?;
            serde_json::to_string(&Value::String(text))
        }
        Some(v) => serde_json::to_string(v),
    };
    encoded.map_err(|e| Error::cell(column, e.to_string()))
}
