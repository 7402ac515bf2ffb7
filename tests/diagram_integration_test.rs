//! Integration tests for the diagram and relationships commands.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> String {
    std::env::var("CARGO_BIN_EXE_erd-infer")
        .unwrap_or_else(|_| "target/debug/erd-infer".to_string())
}

fn create_test_listing(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("tables.json");
    fs::write(
        &path,
        r#"{"data": {"listDataSourceTables": [
  {"name": "customers", "__typename": "Table", "columns": [
    {"name": "id", "type": "integer", "__typename": "Column"},
    {"name": "email", "type": "text", "__typename": "Column"}
  ]},
  {"name": "orders", "__typename": "Table", "columns": [
    {"name": "id", "type": "integer", "__typename": "Column"},
    {"name": "customer_id", "type": "integer", "__typename": "Column"}
  ]},
  {"name": "products", "__typename": "Table", "columns": [
    {"name": "id", "type": "integer", "__typename": "Column"},
    {"name": "name", "type": "text", "__typename": "Column"}
  ]},
  {"name": "order_items", "__typename": "Table", "columns": [
    {"name": "order_id", "type": "integer", "__typename": "Column"},
    {"name": "product_id", "type": "integer", "__typename": "Column"}
  ]},
  {"name": "reviews", "__typename": "Table", "columns": [
    {"name": "id", "type": "integer", "__typename": "Column"},
    {"name": "order_id", "type": "integer", "__typename": "Column"},
    {"name": "product_id", "type": "integer", "__typename": "Column"}
  ]}
]}}"#,
    )
    .unwrap();
    path
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::new(get_binary_path()).args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_diagram_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);

    let doc = run_json(&["diagram", listing.to_str().unwrap()]);

    let nodes = doc["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 5);
    assert_eq!(nodes[0]["id"], "customers");
    assert_eq!(nodes[0]["type"], "tableBox");
    assert_eq!(nodes[4]["position"]["x"], 50.0);
    assert_eq!(nodes[4]["position"]["y"], 320.0);

    let edges = doc["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e["source"] == "orders"
        && e["target"] == "customers"
        && e["label"] == "customer_id"
        && e["markerEnd"]["type"] == "arrowclosed"));
    assert!(edges.iter().any(|e| e["source"] == "order_items"
        && e["target"] == "products"
        && e["markerEnd"]["type"] == "arrow"));
    assert_eq!(doc["stats"]["joinTables"][0], "order_items");
}

#[test]
fn test_diagram_columns_flag() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);

    let doc = run_json(&["diagram", listing.to_str().unwrap(), "--columns", "2"]);

    let nodes = doc["nodes"].as_array().unwrap();
    assert_eq!(nodes[2]["position"]["x"], 50.0);
    assert_eq!(nodes[2]["position"]["y"], 320.0);
}

#[test]
fn test_diagram_mermaid_file_output() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);
    let output = dir.path().join("erd.mmd");

    let status = Command::new(get_binary_path())
        .args([
            "diagram",
            listing.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("erDiagram"));
    assert!(content.contains("orders }o--|| customers : \"customer_id\""));
    assert!(content.contains("order_items }o--o{ orders : \"order_id\""));
}

#[test]
fn test_diagram_dot_with_focus() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);

    let output = Command::new(get_binary_path())
        .args([
            "diagram",
            listing.to_str().unwrap(),
            "--format",
            "dot",
            "--focus",
            "customers",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("digraph ERD"));
    assert!(stdout.contains("orders:customer_id -> customers:id"));
    assert!(!stdout.contains("<B>products</B>"));
}

#[test]
fn test_diagram_with_context_file() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);
    let context = dir.path().join("context.json");
    fs::write(
        &context,
        r#"{"selectedTables": ["orders", "customers"], "projectName": "shop"}"#,
    )
    .unwrap();

    let doc = run_json(&[
        "diagram",
        listing.to_str().unwrap(),
        "--context",
        context.to_str().unwrap(),
    ]);

    assert_eq!(doc["nodes"].as_array().unwrap().len(), 2);
    assert_eq!(doc["nodes"][0]["data"]["projectName"], "shop");
    assert_eq!(doc["edges"].as_array().unwrap().len(), 1);
}

#[test]
fn test_diagram_no_matching_tables() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);
    let context = dir.path().join("context.json");
    fs::write(
        &context,
        r#"{"selectedTables": ["ledger"], "projectName": "shop"}"#,
    )
    .unwrap();

    let output = Command::new(get_binary_path())
        .args([
            "diagram",
            listing.to_str().unwrap(),
            "--context",
            context.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no matching tables"));
}

#[test]
fn test_diagram_missing_and_invalid_listing() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(get_binary_path())
        .args(["diagram", dir.path().join("absent.json").to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no table data found"));

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ nope").unwrap();
    let output = Command::new(get_binary_path())
        .args(["diagram", bad.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid table data"));
}

#[test]
fn test_diagram_invalid_columns() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);

    let output = Command::new(get_binary_path())
        .args(["diagram", listing.to_str().unwrap(), "--columns", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("layout.columns"));
}

#[test]
fn test_relationships_command() {
    let dir = TempDir::new().unwrap();
    let listing = create_test_listing(&dir);

    let output = Command::new(get_binary_path())
        .args(["relationships", listing.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("orders.customer_id"));
    assert!(stdout.contains("many-to-many"));
    assert!(stdout.contains("Join tables: order_items"));
}
