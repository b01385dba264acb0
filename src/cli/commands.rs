//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Delimited tabular export CLI
#[derive(Parser, Debug)]
#[command(name = "tabular-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Export job file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export newline-delimited JSON records to a delimited file
    Export {
        /// Input file, one JSON object per line
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the CREATE TABLE statement for the job
    ///
    /// Without declared columns the schema is inferred from the first
    /// accepted input record.
    Ddl {
        /// Input file, one JSON object per line
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Derive a deterministic id
    Id {
        /// Parent namespace (UUID, or any text used as a seed)
        #[arg(long)]
        namespace: String,

        /// Output file name the id belongs to
        #[arg(long)]
        file_name: String,

        /// Name local to the file
        local_name: String,
    },

    /// Validate the export job file
    Validate,
}
