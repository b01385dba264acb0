//! Integration tests
//!
//! Tests the full flow: YAML job → NDJSON records → delimited file + DDL

use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tabular_export::cli::{derive_id, run_export};
use tabular_export::column::{ColumnRef, InferredColumn};
use tabular_export::{
    load_export_config_from_str, IdNamespace, JsonValue, PersistProperties, RequireFields,
    RowContext, RowTransform, TabularWriter, WriterConfig,
};
use tempfile::tempdir;

fn job_yaml(destination: &std::path::Path, extra: &str) -> String {
    format!(
        "destination: {}\nfile_name: users.csv\nnamespace: crm\n{extra}",
        destination.display()
    )
}

// ============================================================================
// Job Tests
// ============================================================================

#[test]
fn test_export_job_inferred_schema() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("users.ndjson");
    fs::write(
        &input,
        concat!(
            "{\"id\": \"1\", \"name\": \"a\", \"amount\": 10}\n",
            "\n",
            "{\"id\": \"2\", \"name\": \"b\", \"amount\": 10.5}\n",
        ),
    )
    .unwrap();

    let ddl_path = dir.path().join("users.sql");
    let yaml = job_yaml(dir.path(), &format!("ddl_file: {}\n", ddl_path.display()));
    let job = load_export_config_from_str(&yaml).unwrap();

    let summary = run_export(&job, &input).unwrap();
    assert_eq!(summary["rows_written"], 2);
    assert_eq!(summary["rows_filtered"], 0);
    assert_eq!(summary["table"], "users");

    assert_eq!(
        fs::read_to_string(dir.path().join("users.csv")).unwrap(),
        "id,name,amount\n1,\"a\",10\n2,\"b\",10.5"
    );
    assert_eq!(
        fs::read_to_string(&ddl_path).unwrap(),
        "CREATE TABLE users (\n  id INTEGER,\n  name VARCHAR(8192),\n  amount INTEGER,\n  PRIMARY KEY (id)\n);"
    );
}

#[test]
fn test_export_job_explicit_columns_and_filter() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("orders.ndjson");
    fs::write(
        &input,
        concat!(
            "{\"note\": \"no order id\"}\n",
            "{\"order_id\": 17, \"total\": \"12.5\", \"note\": \"gift; wrap\"}\n",
            "{\"order_id\": null, \"total\": 1}\n",
        ),
    )
    .unwrap();

    let yaml = job_yaml(
        dir.path(),
        concat!(
            "table_name: orders\n",
            "delimiter: \";\"\n",
            "require: [order_id]\n",
            "columns:\n",
            "  - name: order_id\n",
            "    type: integer\n",
            "    primary_key: true\n",
            "  - name: total\n",
            "    type: decimal\n",
            "  - name: note\n",
        ),
    );
    let job = load_export_config_from_str(&yaml).unwrap();

    let summary = run_export(&job, &input).unwrap();
    assert_eq!(summary["rows_written"], 1);
    assert_eq!(summary["rows_filtered"], 2);
    assert_eq!(summary["ddl_file"], JsonValue::Null);

    assert_eq!(
        fs::read_to_string(dir.path().join("users.csv")).unwrap(),
        "order_id;total;note\n17;\"12.5\";\"gift; wrap\""
    );
}

#[test]
fn test_export_job_rejects_non_object_line() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.ndjson");
    fs::write(&input, "{\"id\": \"1\"}\n42\n").unwrap();

    let job = load_export_config_from_str(&job_yaml(dir.path(), "")).unwrap();
    let err = run_export(&job, &input).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid input at line 2: expected a JSON object"
    );

    // Rows accepted before the bad line are flushed to the file
    assert_eq!(
        fs::read_to_string(dir.path().join("users.csv")).unwrap(),
        "id\n1"
    );
}

#[test]
fn test_export_job_flushes_rows_before_cell_failure() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("nested.ndjson");
    fs::write(
        &input,
        concat!(
            "{\"id\": \"1\", \"tags\": [\"a\"]}\n",
            "{\"id\": \"2\", \"tags\": []}\n",
            "{\"id\": {\"nested\": true}, \"tags\": []}\n",
            "{\"id\": \"4\", \"tags\": []}\n",
        ),
    )
    .unwrap();

    let job = load_export_config_from_str(&job_yaml(dir.path(), "")).unwrap();
    let err = run_export(&job, &input).unwrap_err();
    assert!(matches!(err, tabular_export::Error::CellSerialization { .. }));

    assert_eq!(
        fs::read_to_string(dir.path().join("users.csv")).unwrap(),
        "id,tags\n1,\"[\\\"a\\\"]\"\n2,\"[]\""
    );
}

#[test]
fn test_repeated_runs_produce_same_ids() {
    let dir = tempdir().unwrap();
    let first: TabularWriter =
        TabularWriter::new(dir.path(), "users.csv", IdNamespace::from_seed("crm")).unwrap();
    let second: TabularWriter =
        TabularWriter::new(dir.path(), "users.csv", IdNamespace::from_seed("crm")).unwrap();

    assert_eq!(first.create_id("user-9"), second.create_id("user-9"));
    assert_eq!(first.create_id("user-9"), derive_id("crm", "users.csv", "user-9"));
}

// ============================================================================
// Writer API Tests
// ============================================================================

#[test]
fn test_transform_assigns_deterministic_ids() {
    let dir = tempdir().unwrap();
    let ns = IdNamespace::from_seed("shop").child("items.csv");

    // Ids are derived in the transform from a natural key on the source record
    let assign_id = move |source: &JsonValue, persist: PersistProperties| {
        let key = source.get("sku")?.as_str()?;
        let mut out = PersistProperties::new();
        out.insert("id".to_string(), json!(ns.create_id(key).to_string()));
        out.extend(persist);
        Some(out)
    };

    let mut writer: TabularWriter =
        TabularWriter::builder(dir.path(), "items.csv", IdNamespace::from_seed("shop"))
            .with_transform(assign_id)
            .open()
            .unwrap();

    let with_sku = json!({"sku": "A-1", "price": 2.5});
    let without_sku = json!({"price": 1});
    assert!(writer.write(RowContext::from_object(&with_sku)).unwrap());
    assert!(!writer.write(RowContext::from_object(&without_sku)).unwrap());
    writer.close().unwrap();

    let expected_id = writer.create_id("A-1");
    assert_eq!(
        fs::read_to_string(writer.path()).unwrap(),
        format!("id,sku,price\n{expected_id},\"A-1\",2.5")
    );
    assert!(writer
        .sql_ddl_create_table()
        .contains("  id VARCHAR(8192)"));
}

#[test]
fn test_caller_schema_of_inferred_columns() {
    let dir = tempdir().unwrap();
    let schema: Vec<ColumnRef> = vec![
        Arc::new(InferredColumn::from_sample("id", Some(&json!(1)))),
        Arc::new(InferredColumn::from_sample("score", Some(&json!(0.5)))),
    ];
    let mut writer: TabularWriter =
        TabularWriter::builder(dir.path(), "scores.csv", IdNamespace::from_seed("t"))
            .with_schema(schema)
            .with_config(WriterConfig::new().with_table_name("scores"))
            .open()
            .unwrap();

    let record = json!({"score": "7", "id": 3});
    writer.write(RowContext::from_object(&record)).unwrap();
    writer.close().unwrap();

    assert_eq!(
        fs::read_to_string(writer.path()).unwrap(),
        "id,score\n3,\"7\""
    );
    assert_eq!(
        writer.sql_ddl_create_table(),
        "CREATE TABLE scores (\n  id INTEGER,\n  score DECIMAL(16,2),\n  PRIMARY KEY (id)\n);"
    );
}

#[test]
fn test_require_fields_on_custom_source_type() {
    #[derive(Debug)]
    struct Customer {
        active: bool,
    }

    let only_active = |source: &Customer, persist: PersistProperties| {
        source.active.then_some(persist)
    };
    let transform = RowTransform::<Customer>::and_then(RequireFields::new(["email"]), only_active);

    let dir = tempdir().unwrap();
    let mut writer: TabularWriter<Customer> =
        TabularWriter::builder(dir.path(), "customers.csv", IdNamespace::from_seed("t"))
            .with_transform(transform)
            .open()
            .unwrap();

    let active = Customer { active: true };
    let inactive = Customer { active: false };
    let row = |email: JsonValue| {
        let mut persist = PersistProperties::new();
        persist.insert("email".to_string(), email);
        persist
    };

    assert!(writer
        .write(RowContext::new(row(json!("a@x.io")), &active))
        .unwrap());
    assert!(!writer
        .write(RowContext::new(row(json!("b@x.io")), &inactive))
        .unwrap());
    assert!(!writer
        .write(RowContext::new(row(JsonValue::Null), &active))
        .unwrap());
    writer.close().unwrap();

    assert_eq!(
        fs::read_to_string(writer.path()).unwrap(),
        "email\n\"a@x.io\""
    );
    assert_eq!(writer.rows_filtered(), 2);

    // Transforms can also be used on their own
    let source = Customer { active: true };
    assert!(only_active.transform(&source, row(json!("c"))).is_some());
}
