//! Tabular writer module
//!
//! Writes rows of [`PersistProperties`](crate::types::PersistProperties) into
//! a delimited text file and renders matching SQL DDL.
//!
//! # Output format
//!
//! ```text
//! id,name,amount
//! 1,"a",10
//! 2,"b",10.5
//! ```
//!
//! The header has no leading separator, each row is preceded by one, and
//! the file has no trailing separator.

mod config;
mod ddl;
mod tabular;
mod transform;

pub use config::{WriterConfig, DEFAULT_DELIMITER, DEFAULT_INDENT, DEFAULT_RECORD_SEPARATOR};
pub use ddl::create_table_statement;
pub use tabular::{TabularWriter, TabularWriterBuilder};
pub use transform::{Chain, RequireFields, RowTransform};
