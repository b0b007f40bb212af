//! CLI Tests
//!
//! Drive the `linedb` binary over scratch files and check its output,
//! the resulting file contents and the exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn mk_test_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("db.txt");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

fn linedb(path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linedb"))
        .arg("--file")
        .arg(path)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// Read Commands
// =============================================================================

#[test]
fn test_cli_len() {
    let (_temp, path) = mk_test_file("a\n\nc");

    let output = linedb(&path, &["len"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn test_cli_all_prints_number_tab_text() {
    let (_temp, path) = mk_test_file("a\n\nc");

    let output = linedb(&path, &["all"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\ta\n2\t\n3\tc\n");
}

#[test]
fn test_cli_get() {
    let (_temp, path) = mk_test_file("ln1\nln2");

    let output = linedb(&path, &["get", "2"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ln2\n");
}

#[test]
fn test_cli_grep() {
    let (_temp, path) = mk_test_file("ln1\nline21\nln3\nline22");

    let output = linedb(&path, &["grep", "ine"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2\tline21\n4\tline22\n");
}

// =============================================================================
// Write Commands
// =============================================================================

#[test]
fn test_cli_insert_zero_appends() {
    let (_temp, path) = mk_test_file("ln1");

    let output = linedb(&path, &["insert", "0", "ln2"]);

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "ln1\nln2");
}

#[test]
fn test_cli_insert_prepends() {
    let (_temp, path) = mk_test_file("ln1");

    let output = linedb(&path, &["--no-sync", "insert", "1", "ln0"]);

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "ln0\nln1");
}

#[test]
fn test_cli_update_prints_previous_text() {
    let (_temp, path) = mk_test_file("ln1\nln2");

    let output = linedb(&path, &["update", "1", "new"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ln1\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "new\nln2");
}

#[test]
fn test_cli_delete_prints_removed_text() {
    let (_temp, path) = mk_test_file("ln1\nln2\nln3");

    let output = linedb(&path, &["delete", "2"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "ln2\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "ln1\nln3");
}

// =============================================================================
// Exit Status
// =============================================================================

#[test]
fn test_cli_negative_number_is_addressing_error() {
    let (_temp, path) = mk_test_file("ln1");

    let output = linedb(&path, &["get", "-1"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_cli_negative_insert_leaves_file() {
    let (_temp, path) = mk_test_file("ln1");

    let output = linedb(&path, &["insert", "-1", "x"]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(fs::read_to_string(&path).unwrap(), "ln1");
}

#[test]
fn test_cli_empty_store_is_addressing_error() {
    let (_temp, path) = mk_test_file("");

    let output = linedb(&path, &["delete", "1"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_cli_missing_file_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.txt");

    let output = linedb(&path, &["len"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!path.exists());
}

#[test]
fn test_cli_write_failure_exits_one() {
    let (_temp, path) = mk_test_file("ln1");
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    let output = linedb(&path, &["update", "1", "new"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&path).unwrap(), "ln1");
}
