//! Column definitions
//!
//! A column knows how to render its header, its cell for a given row and its
//! part of a `CREATE TABLE` statement.
//!
//! # Variants
//!
//! - **InferredColumn**: type pinned from the first accepted row's value
//! - **DeclaredColumn**: type and constraints supplied by the caller
//! - Any other [`ColumnDefinition`] implementation

mod declared;
mod encode;
mod inferred;
mod types;

pub use declared::DeclaredColumn;
pub use encode::{literal_cell, raw_cell};
pub use inferred::{infer_columns, InferredColumn};
pub use types::{
    numeric_value, ColumnDefinition, ColumnRef, Schema, SqlType, DECIMAL_PRECISION,
    DECIMAL_SCALE, VARCHAR_LENGTH,
};
