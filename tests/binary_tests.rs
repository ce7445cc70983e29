//! Integration tests for the sql-review binary.

use std::io::Write;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("sql-review");
    cmd.env_remove("SQL_REVIEW_PRESET")
        .env_remove("SQL_REVIEW_DIALECT")
        .env_remove("RUST_LOG");
    cmd
}

fn queries(sql: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", sql).unwrap();
    file
}

#[test]
fn test_review_clean_queries() {
    let file = queries("SELECT id FROM orders WHERE id = 1;");
    cmd()
        .args([
            "review",
            "-q",
            file.path().to_str().unwrap(),
            "--dialect",
            "mysql",
            "--preset",
            "prod",
            "--no-color"
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("errors: 0, warnings: 0"));
}

#[test]
fn test_review_errors_exit_code() {
    let file = queries("DELETE FROM orders;");
    cmd()
        .args([
            "review",
            "-q",
            file.path().to_str().unwrap(),
            "--dialect",
            "mysql",
            "--preset",
            "prod",
            "--no-color"
        ])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[ERROR] statement.where.require (line 1)"));
}

#[test]
fn test_review_warnings_exit_code() {
    let file = queries("SELECT * FROM orders;");
    cmd()
        .args(["review", "-q", file.path().to_str().unwrap(), "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[WARN] statement.select.no-select-all"));
}

#[test]
fn test_review_from_stdin() {
    cmd()
        .args(["review", "-q", "-", "--dialect", "mssql", "--preset", "prod", "--no-color"])
        .write_stdin("CREATE TABLE UserOrders (id INT PRIMARY KEY);")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("UserOrders mismatches table naming convention"));
}

#[test]
fn test_review_with_policy_file() {
    let mut policy = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(
        policy,
        r#"{{
  "id": "team/policy",
  "name": "Team policy",
  "ruleList": [
    {{"type": "naming.table", "level": "WARNING", "dialect": "MSSQL",
      "payload": {{"format": "^[a-z]+(_[a-z]+)*$", "maxLength": 10}}}}
  ]
}}"#
    )
    .unwrap();
    let file = queries("CREATE TABLE order_history_archive (id INT);");
    cmd()
        .args([
            "review",
            "-q",
            file.path().to_str().unwrap(),
            "-p",
            policy.path().to_str().unwrap(),
            "--dialect",
            "mssql",
            "--no-color"
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("within 10 characters"));
}

#[test]
fn test_review_json_output() {
    let file = queries("DELETE FROM orders;");
    let output = cmd()
        .args([
            "review",
            "-q",
            file.path().to_str().unwrap(),
            "--dialect",
            "mysql",
            "-f",
            "json"
        ])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["statements_count"], 1);
    assert!(value["results"].as_array().is_some_and(|r| !r.is_empty()));
}

#[test]
fn test_review_preset_from_env() {
    let file = queries("DELETE FROM orders;");
    cmd()
        .env("SQL_REVIEW_PRESET", "prod")
        .env("SQL_REVIEW_DIALECT", "mysql")
        .args(["review", "-q", file.path().to_str().unwrap(), "--no-color"])
        .assert()
        .code(2);
}

#[test]
fn test_review_missing_file() {
    cmd()
        .args(["review", "-q", "/nonexistent/queries.sql"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_review_invalid_sql() {
    let file = queries("SELEC * FORM orders");
    cmd()
        .args(["review", "-q", file.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_review_unknown_preset() {
    let file = queries("SELECT 1;");
    cmd()
        .args(["review", "-q", file.path().to_str().unwrap(), "--preset", "staging"])
        .assert()
        .failure();
}

#[test]
fn test_review_policy_conflicts_with_preset() {
    cmd()
        .args(["review", "-q", "-", "-p", "policy.yaml", "--preset", "prod"])
        .assert()
        .failure();
}

#[test]
fn test_rules_json() {
    let output = cmd()
        .args(["rules", "--dialect", "mssql", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let templates = value.as_array().unwrap();
    assert!(templates.iter().all(|t| t["dialect"] == "MSSQL"));
    assert!(templates.iter().all(|t| t["type"] != "table.comment"));
}

#[test]
fn test_rules_of_preset() {
    cmd()
        .args(["rules", "--preset", "sample", "--dialect", "generic", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("naming.table [NAMING] GENERIC WARNING"));
}

#[test]
fn test_policy_export() {
    cmd()
        .args(["policy", "--preset", "dev", "--dialect", "mysql"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: preset/dev"))
        .stdout(predicate::str::contains("ruleList:"));
}

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("review"));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sql-review"));
}
