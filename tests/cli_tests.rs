//! CLI smoke tests for the schema-migrate binary

use std::path::Path;
use std::process::Command;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schema-migrate"))
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn test_compile_to_stdout() {
    let output = bin().args(["compile", &fixture("catalog.graphql")]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, include_str!("fixtures/catalog.expected.js"));
}

#[test]
fn test_compile_to_file_with_reverse_drops() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("001_init.js");

    let status = bin()
        .args(["compile", &fixture("library.graphql"), "--reverse-drops", "-o"])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let code = std::fs::read_to_string(&out).unwrap();
    assert!(code.contains(".dropTable('books')\n    .dropTable('authors');"));
}

#[test]
fn test_strict_links_fail() {
    let output = bin()
        .args(["compile", &fixture("library.graphql"), "--strict-links"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Bad @link on Book.author"));
}

#[test]
fn test_print_with_directives() {
    let output = bin()
        .args(["print", &fixture("library.graphql"), "--with-directives"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("directive @db(table: String, key: String) on OBJECT"));
    assert!(stdout.contains("  author: Author @link(field: \"books\")"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema-migrate.toml");

    assert!(bin().args(["config", "init"]).arg(&path).status().unwrap().success());
    assert!(std::fs::read_to_string(&path).unwrap().contains("[emit]"));
    assert!(!bin().args(["config", "init"]).arg(&path).status().unwrap().success());
}

#[test]
fn test_plan_as_json() {
    let output = bin().args(["plan", &fixture("library.graphql")]).output().unwrap();

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["table_names"], serde_json::json!(["authors", "books"]));
    assert_eq!(plan["links"]["books"][0]["target_table"], "authors");
    assert_eq!(plan["tables"][0]["primary_key"], "id");
}

#[test]
fn test_missing_schema_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.graphql");

    let output = bin().arg("compile").arg(&missing).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(&format!("reading {}", missing.display())));
}

#[test]
fn test_print_keeps_field_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("query.graphql");
    std::fs::write(&schema, "type Query @db { books(limit: Int = 10): [String] }\n").unwrap();

    let output = bin().arg("print").arg(&schema).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "type Query @db {\n  books(limit: Int = 10): [String]\n}\n");
}
