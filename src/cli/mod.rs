//! CLI module
//!
//! Command-line interface for running export jobs.
//!
//! # Commands
//!
//! - `export` - Write NDJSON records to the job's delimited file
//! - `ddl` - Print the CREATE TABLE statement for the job
//! - `id` - Derive a deterministic id
//! - `validate` - Check the job file

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{derive_id, run_export, Runner};
