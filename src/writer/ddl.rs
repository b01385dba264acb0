//! `CREATE TABLE` rendering

use crate::column::Schema;

/// Render a `CREATE TABLE` statement for a schema
///
/// Column clauses come first in schema order, then every table-level clause
/// the columns provide. Columns without a column clause are left out.
/// An empty schema renders a statement with no clauses.
pub fn create_table_statement(table_name: &str, schema: &Schema, indent: &str) -> String {
    let column_clauses = schema.iter().filter_map(|c| c.sql_column_clause(indent));
    let table_clauses = schema.iter().filter_map(|c| c.sql_table_clause(indent));
    let clauses: Vec<String> = column_clauses.chain(table_clauses).collect();

    if clauses.is_empty() {
        return format!("CREATE TABLE {table_name} (\n);");
    }
    format!("CREATE TABLE {table_name} (\n{}\n);", clauses.join(",\n"))
}
