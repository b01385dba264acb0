//! Common types used throughout tabular export
//!
//! Row projections are plain `serde_json` maps built with the `preserve_order`
//! feature, so key insertion order survives and drives inferred column order.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Flat, insertion-ordered mapping from column name to value for one output row
pub type PersistProperties = serde_json::Map<String, JsonValue>;

// ============================================================================
// Row Context
// ============================================================================

/// One candidate row handed to the writer
///
/// Bundles the exportable projection with the record it was built from.
/// The source is only visible to row transforms and is never serialized.
#[derive(Debug, Clone)]
pub struct RowContext<'a, S: ?Sized = JsonValue> {
    /// Projection destined for the output row
    pub persist: PersistProperties,
    /// Originating source record
    pub source: &'a S,
}

impl<'a, S: ?Sized> RowContext<'a, S> {
    /// Create a new row context
    pub fn new(persist: PersistProperties, source: &'a S) -> Self {
        Self { persist, source }
    }
}

impl<'a> RowContext<'a, JsonValue> {
    /// Build a context whose projection is the source object itself
    ///
    /// Non-object sources yield an empty projection.
    pub fn from_object(source: &'a JsonValue) -> Self {
        let persist = source.as_object().cloned().unwrap_or_default();
        Self { persist, source }
    }
}

/// Check whether a column name marks an identifier column (`id` or `*_id`)
pub fn is_id_column(name: &str) -> bool {
    name == "id" || name.ends_with("_id")
}
