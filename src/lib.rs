//! # Tabular Export
//!
//! Writes schema-less records into a delimited tabular file while deriving a
//! best-effort relational schema from the data it sees.
//!
//! ## Features
//!
//! - **Schema Inference**: Column order and SQL types pinned by the first accepted row
//! - **Explicit Schemas**: Caller-supplied column definitions, never sampled
//! - **Row Transforms**: Pluggable filter/mapper run before every write
//! - **SQL DDL**: `CREATE TABLE` text for the current schema
//! - **Deterministic Ids**: Name-based UUIDs chained parent → file → row
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabular_export::{IdNamespace, RowContext, TabularWriter, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let parent = IdNamespace::from_seed("crm");
//!     let mut writer: TabularWriter = TabularWriter::new("out", "users.csv", parent)?;
//!
//!     let record = json!({"id": "1", "name": "a", "amount": 10});
//!     writer.write(RowContext::from_object(&record))?;
//!     writer.close()?;
//!
//!     println!("{}", writer.sql_ddl_create_table());
//!     println!("{}", writer.create_id("user-1"));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      TabularWriter                       │
//! │  write(row) → bool    sql_ddl_create_table()   close()   │
//! │  guess_schema(row)    create_id(name)                    │
//! └──────────────────────────────────────────────────────────┘
//!                │                  │                │
//! ┌──────────────┴───┬──────────────┴─────┬──────────┴──────┐
//! │     Columns      │     Transforms     │    Namespace    │
//! ├──────────────────┼────────────────────┼─────────────────┤
//! │ InferredColumn   │ closures           │ UUID v5         │
//! │ DeclaredColumn   │ Chain              │ parent → file   │
//! │ custom impls     │ RequireFields      │ file → row      │
//! └──────────────────┴────────────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Column definitions and SQL types
pub mod column;

/// Deterministic id namespaces
pub mod namespace;

/// Delimited file writer and DDL rendering
pub mod writer;

/// Export job configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use column::{ColumnDefinition, DeclaredColumn, InferredColumn, SqlType};
pub use config::{load_export_config, load_export_config_from_str, ExportConfig};
pub use namespace::IdNamespace;
pub use writer::{RequireFields, RowTransform, TabularWriter, WriterConfig};
