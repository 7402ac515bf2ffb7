//! Integration tests for the session store workflow: import, select, diagram.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn erd_infer(session: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_erd-infer"))
        .args(args)
        .arg("--session-dir")
        .arg(session)
        .output()
        .expect("Failed to run erd-infer")
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_listing(dir: &TempDir) -> String {
    let path = dir.path().join("listing.json");
    fs::write(
        &path,
        r#"{"tables": [
  {"name": "customers", "columns": [{"name": "id", "type": "int4"}]},
  {"name": "orders", "columns": [
    {"name": "id", "type": "int4"},
    {"name": "customer_id", "type": "int4"}
  ]},
  {"name": "order_notes", "columns": [
    {"name": "id", "type": "int4"},
    {"name": "order_id", "type": "int4"}
  ]},
  {"name": "audit_log", "columns": [{"name": "id", "type": "int4"}]}
]}"#,
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_import_select_diagram() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));
    assert!(session.join("table_data.json").exists());

    assert_ok(&erd_infer(
        &session,
        &["session", "select", "customers", "--search", "order", "--project", "shop"],
    ));
    assert!(session.join("modeling_data.json").exists());

    let output = erd_infer(&session, &["diagram"]);
    assert_ok(&output);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let ids: Vec<&str> = doc["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["customers", "orders", "order_notes"]);
    assert_eq!(doc["nodes"][0]["data"]["projectName"], "shop");
    assert_eq!(doc["stats"]["relationshipCount"], 2);
}

#[test]
fn test_show_reports_selection() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));
    assert_ok(&erd_infer(
        &session,
        &["session", "select", "orders", "--project", "shop"],
    ));

    let output = erd_infer(&session, &["session", "show", "--json"]);
    assert_ok(&output);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["tableCount"], 4);
    assert_eq!(doc["projectName"], "shop");
    assert_eq!(doc["selectedTables"], serde_json::json!(["orders"]));
}

#[test]
fn test_select_reset_replaces_selection() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));
    assert_ok(&erd_infer(
        &session,
        &["session", "select", "orders", "--project", "shop"],
    ));
    assert_ok(&erd_infer(&session, &["session", "select", "customers"]));
    assert_ok(&erd_infer(
        &session,
        &["session", "select", "audit_log", "--reset"],
    ));

    let output = erd_infer(&session, &["session", "show", "--json"]);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["selectedTables"], serde_json::json!(["audit_log"]));
    assert_eq!(doc["projectName"], "shop");
}

#[test]
fn test_diagram_without_import_fails() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");

    let output = erd_infer(&session, &["diagram"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no table data found"));
}

#[test]
fn test_diagram_without_selection_fails() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));

    let output = erd_infer(&session, &["diagram"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing modeling data"));
}

#[test]
fn test_clear_removes_keys() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));
    assert_ok(&erd_infer(
        &session,
        &["session", "select", "orders", "--project", "shop"],
    ));
    assert_ok(&erd_infer(&session, &["session", "clear"]));

    assert!(!session.join("table_data.json").exists());
    assert!(!session.join("modeling_data.json").exists());

    let output = erd_infer(&session, &["session", "show", "--json"]);
    assert_ok(&output);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(doc["tableCount"].is_null());
}

#[test]
fn test_relationships_from_session() {
    let dir = TempDir::new().unwrap();
    let session = dir.path().join("session");
    let listing = write_listing(&dir);

    assert_ok(&erd_infer(&session, &["session", "import", &listing]));

    let output = erd_infer(&session, &["relationships", "--json"]);
    assert_ok(&output);
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["stats"]["tableCount"], 4);
    assert_eq!(doc["stats"]["suffix"], 2);
}
