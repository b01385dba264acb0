//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::column::{infer_columns, Schema};
use crate::config::{load_export_config, ExportConfig};
use crate::error::{Error, Result};
use crate::namespace::IdNamespace;
use crate::types::{JsonValue, RowContext};
use crate::writer::{create_table_statement, RowTransform, TabularWriter};
use serde_json::json;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Export { input } => self.export(input),
            Commands::Ddl { input } => self.ddl(input.as_deref()),
            Commands::Id {
                namespace,
                file_name,
                local_name,
            } => {
                println!("{}", derive_id(namespace, file_name, local_name));
                Ok(())
            }
            Commands::Validate => self.validate(),
        }
    }

    /// Load the export job
    fn load_config(&self) -> Result<ExportConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Export job file not specified (use -c flag)"))?;
        load_export_config(path)
    }

    /// Export input records to the job's output file
    fn export(&self, input: &Path) -> Result<()> {
        let job = self.load_config()?;
        let summary = run_export(&job, input)?;
        println!("{summary}");
        Ok(())
    }

    /// Print the CREATE TABLE statement
    fn ddl(&self, input: Option<&Path>) -> Result<()> {
        let job = self.load_config()?;
        let writer_config = job.writer_config();

        let schema = match job.schema() {
            Some(schema) => schema,
            None => {
                let input = input.ok_or_else(|| {
                    Error::config("No columns declared; pass --input to infer them")
                })?;
                sample_schema(&job, input)?
            }
        };

        println!(
            "{}",
            create_table_statement(
                &writer_config.table_name_for(&job.file_name),
                &schema,
                writer_config.indent()
            )
        );
        Ok(())
    }

    /// Validate the export job
    fn validate(&self) -> Result<()> {
        let job = self.load_config()?;
        let columns = match &job.columns {
            Some(columns) => json!(columns.len()),
            None => json!("inferred"),
        };
        println!(
            "{}",
            json!({
                "status": "valid",
                "path": job.output_path().display().to_string(),
                "namespace": job.parent_namespace().to_string(),
                "columns": columns,
            })
        );
        Ok(())
    }
}

/// Deterministic id for `local_name` in the file's namespace
pub fn derive_id(namespace: &str, file_name: &str, local_name: &str) -> uuid::Uuid {
    IdNamespace::parse_or_seed(namespace)
        .child(file_name)
        .create_id(local_name)
}

/// Write every input record through a writer built from the job
///
/// Returns a JSON summary of the run.
pub fn run_export(job: &ExportConfig, input: &Path) -> Result<JsonValue> {
    let mut builder = TabularWriter::<JsonValue>::builder(
        &job.destination,
        job.file_name.clone(),
        job.parent_namespace(),
    )
    .with_config(job.writer_config());
    if let Some(schema) = job.schema() {
        builder = builder.with_schema(schema);
    }
    if let Some(filter) = job.row_filter() {
        builder = builder.with_transform(filter);
    }

    let mut writer = builder.open()?;
    if let Err(e) = write_records(&mut writer, input) {
        tracing::error!(
            "Export to {} stopped after {} row(s): {}",
            writer.path().display(),
            writer.rows_written(),
            e
        );
        writer.close()?;
        return Err(e);
    }
    writer.close()?;

    if let Some(ddl_path) = &job.ddl_file {
        fs::write(ddl_path, writer.sql_ddl_create_table()).map_err(|source| Error::SinkOpen {
            path: ddl_path.display().to_string(),
            source,
        })?;
    }

    Ok(json!({
        "path": writer.path().display().to_string(),
        "table": writer.table_name(),
        "rows_written": writer.rows_written(),
        "rows_filtered": writer.rows_filtered(),
        "ddl_file": job.ddl_file.as_ref().map(|p| p.display().to_string()),
    }))
}

fn write_records(writer: &mut TabularWriter, input: &Path) -> Result<()> {
    for record in read_records(input)? {
        let (_, record) = record?;
        writer.write(RowContext::from_object(&record))?;
    }
    Ok(())
}

/// Infer a schema from the first input record the job's filter accepts
fn sample_schema(job: &ExportConfig, input: &Path) -> Result<Schema> {
    let filter = job.row_filter();
    for record in read_records(input)? {
        let (_, record) = record?;
        let persist = record.as_object().cloned().unwrap_or_default();
        let accepted = match &filter {
            Some(filter) => filter.transform(&record, persist),
            None => Some(persist),
        };
        if let Some(persist) = accepted {
            return Ok(infer_columns(&persist));
        }
    }
    Ok(Schema::new())
}

/// Read newline-delimited JSON objects, skipping blank lines
fn read_records(path: &Path) -> Result<impl Iterator<Item = Result<(usize, JsonValue)>>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    let records = BufReader::new(file)
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_no = index + 1;
            match line {
                Err(e) => Some(Err(Error::Io(e))),
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(parse_record(line_no, &text)),
            }
        });
    Ok(records)
}

fn parse_record(line_no: usize, text: &str) -> Result<(usize, JsonValue)> {
    let value: JsonValue =
        serde_json::from_str(text).map_err(|e| Error::input(line_no, e.to_string()))?;
    if !value.is_object() {
        return Err(Error::input(line_no, "expected a JSON object"));
    }
    Ok((line_no, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnDefinition;
    use crate::config::load_export_config_from_str;
    use tempfile::tempdir;

    #[test]
    fn test_parse_record() {
        let (line, value) = parse_record(3, r#"{"a": 1}"#).unwrap();
        assert_eq!(line, 3);
        assert_eq!(value["a"], 1);

        let err = parse_record(4, "[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input at line 4: expected a JSON object");

        let err = parse_record(5, "{broken").unwrap_err();
        assert!(matches!(err, Error::Input { line: 5, .. }));
    }

    #[test]
    fn test_derive_id_matches_namespace_chain() {
        let expected = IdNamespace::from_seed("crm").child("users.csv").create_id("42");
        assert_eq!(derive_id("crm", "users.csv", "42"), expected);
    }

    #[test]
    fn test_sample_schema_skips_filtered_records() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.ndjson");
        fs::write(&input, "{\"name\": \"x\"}\n\n{\"id\": \"1\", \"qty\": 2.5}\n").unwrap();

        let job = load_export_config_from_str(
            "destination: .\nfile_name: t.csv\nnamespace: n\nrequire: [id]\n",
        )
        .unwrap();
        let schema = sample_schema(&job, &input).unwrap();
        let names: Vec<&str> = schema.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["id", "qty"]);
    }
}
