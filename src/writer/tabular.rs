//! Delimited tabular file writer
//!
//! The writer infers its schema from the first accepted row unless one was
//! supplied, writes the header exactly once together with that row, then one
//! line per accepted row. The first accepted row pins column order and types
//! for the rest of the file.

use super::config::WriterConfig;
use super::ddl::create_table_statement;
use super::transform::RowTransform;
use crate::column::{infer_columns, Schema};
use crate::error::{Error, Result};
use crate::namespace::IdNamespace;
use crate::types::{JsonValue, PersistProperties, RowContext};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Builder for [`TabularWriter`]
pub struct TabularWriterBuilder<S: ?Sized = JsonValue> {
    destination: PathBuf,
    file_name: String,
    parent: IdNamespace,
    schema: Option<Schema>,
    transform: Option<Box<dyn RowTransform<S>>>,
    config: WriterConfig,
}

impl<S: ?Sized> TabularWriterBuilder<S> {
    /// Use an explicit schema; no inference happens for this writer
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Run every candidate row through a transform before writing
    #[must_use]
    pub fn with_transform<T>(mut self, transform: T) -> Self
    where
        T: RowTransform<S> + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }

    /// Set writer configuration
    #[must_use]
    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Create (or truncate) the output file and return the writer
    ///
    /// Fails before touching the file when the config's delimiter or record
    /// separator could be confused with cell content.
    pub fn open(self) -> Result<TabularWriter<S>> {
        self.config.validate()?;
        let path = self.destination.join(&self.file_name);
        let file = File::create(&path).map_err(|source| Error::SinkOpen {
            path: path.display().to_string(),
            source,
        })?;

        let namespace = self.parent.child(&self.file_name);
        let table_name = self.config.table_name_for(&self.file_name);
        let explicit_schema = self.schema.is_some();

        tracing::info!(
            "Opened {} (namespace {}, {} schema)",
            path.display(),
            namespace,
            if explicit_schema { "explicit" } else { "inferred" }
        );

        Ok(TabularWriter {
            path,
            table_name,
            namespace,
            schema: self.schema.unwrap_or_default(),
            explicit_schema,
            transform: self.transform,
            config: self.config,
            sink: Some(BufWriter::new(file)),
            rows_written: 0,
            rows_filtered: 0,
        })
    }
}

/// Writer for one delimited output file
///
/// Exclusively owns its sink. Not meant to be shared between threads.
pub struct TabularWriter<S: ?Sized = JsonValue> {
    path: PathBuf,
    table_name: String,
    namespace: IdNamespace,
    schema: Schema,
    explicit_schema: bool,
    transform: Option<Box<dyn RowTransform<S>>>,
    config: WriterConfig,
    sink: Option<BufWriter<File>>,
    rows_written: u64,
    rows_filtered: u64,
}

impl<S: ?Sized> TabularWriter<S> {
    /// Start building a writer for `destination/file_name`
    pub fn builder(
        destination: impl AsRef<Path>,
        file_name: impl Into<String>,
        parent: IdNamespace,
    ) -> TabularWriterBuilder<S> {
        TabularWriterBuilder {
            destination: destination.as_ref().to_path_buf(),
            file_name: file_name.into(),
            parent,
            schema: None,
            transform: None,
            config: WriterConfig::default(),
        }
    }

    /// Open a writer with an inferred schema, no transform and default config
    pub fn new(
        destination: impl AsRef<Path>,
        file_name: impl Into<String>,
        parent: IdNamespace,
    ) -> Result<Self> {
        Self::builder(destination, file_name, parent).open()
    }

    /// Deterministic id for a name local to this file
    pub fn create_id(&self, local_name: &str) -> Uuid {
        self.namespace.create_id(local_name)
    }

    /// Populate the schema from a sample row's keys, in the row's order
    ///
    /// Does nothing once a schema exists, when one was supplied up front, or
    /// after the header has been written.
    pub fn guess_schema(&mut self, sample: &PersistProperties) {
        if self.explicit_schema || !self.schema.is_empty() || self.rows_written > 0 {
            return;
        }
        self.schema = infer_columns(sample);
        tracing::debug!(
            "Inferred {} column(s) for {}",
            self.schema.len(),
            self.path.display()
        );
    }

    /// Write one row
    ///
    /// Returns `Ok(false)` when the transform rejects the row; nothing is
    /// written in that case. The header goes out with the first accepted row.
    /// A row is rendered completely before any byte of it reaches the sink.
    pub fn write(&mut self, context: RowContext<'_, S>) -> Result<bool> {
        if self.sink.is_none() {
            return Err(Error::WriterClosed {
                path: self.path.display().to_string(),
            });
        }

        let RowContext { persist, source } = context;
        let persist = match &self.transform {
            Some(transform) => transform.transform(source, persist),
            None => Some(persist),
        };
        let Some(persist) = persist else {
            self.rows_filtered += 1;
            tracing::debug!("Row filtered out of {}", self.path.display());
            return Ok(false);
        };

        // An inferred schema is only kept once its header and row are on disk
        let first_row = self.rows_written == 0;
        let pending = (first_row && !self.explicit_schema && self.schema.is_empty())
            .then(|| infer_columns(&persist));
        let schema = pending.as_ref().unwrap_or(&self.schema);
        let delimiter = self.config.delimiter();

        let mut line = String::new();
        if first_row {
            line.push_str(&header_line(schema, delimiter));
        }
        line.push_str(self.config.record_separator());
        line.push_str(&row_line(schema, &persist, delimiter)?);

        let sink = self.sink.as_mut().ok_or_else(|| Error::WriterClosed {
            path: self.path.display().to_string(),
        })?;
        sink.write_all(line.as_bytes())?;

        if let Some(schema) = pending {
            tracing::debug!(
                "Inferred {} column(s) for {}",
                schema.len(),
                self.path.display()
            );
            self.schema = schema;
        }
        if first_row {
            tracing::debug!("Header written to {}", self.path.display());
        }
        self.rows_written += 1;
        Ok(true)
    }

    /// Render the `CREATE TABLE` statement for the current schema
    ///
    /// Before the first row of an inferred writer the schema is empty and
    /// the statement has no clauses.
    pub fn sql_ddl_create_table(&self) -> String {
        create_table_statement(&self.table_name, &self.schema, self.config.indent())
    }

    /// Flush and release the output file
    ///
    /// Calling it again is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
            tracing::info!(
                "Closed {} ({} rows written, {} filtered)",
                self.path.display(),
                self.rows_written,
                self.rows_filtered
            );
        }
        Ok(())
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Get the current schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get this writer's id namespace
    pub fn namespace(&self) -> IdNamespace {
        self.namespace
    }

    /// Get the output file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the table name used in DDL
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Number of rows written so far
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Number of rows rejected by the transform so far
    pub fn rows_filtered(&self) -> u64 {
        self.rows_filtered
    }

}

fn header_line(schema: &Schema, delimiter: &str) -> String {
    schema
        .iter()
        .map(|c| c.header())
        .collect::<Vec<_>>()
        .join(delimiter)
}

fn row_line(schema: &Schema, row: &PersistProperties, delimiter: &str) -> Result<String> {
    let cells = schema
        .iter()
        .map(|c| c.cell_content(row))
        .collect::<Result<Vec<_>>>()?;
    Ok(cells.join(delimiter))
}
