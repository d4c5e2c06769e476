//! CLI tests for the `render` subcommand

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_render_reads_stdin() {
    let mut cmd = Command::cargo_bin("flashgate").unwrap();
    cmd.env_remove("GEMINI_API_KEY")
        .arg("render")
        .write_stdin("**hi** <b>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<strong>hi</strong> &lt;b&gt;"));
}

#[test]
fn test_render_reads_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("reply.md");
    std::fs::write(&input, "1. one\n2. two").unwrap();

    let mut cmd = Command::cargo_bin("flashgate").unwrap();
    cmd.arg("render")
        .arg("--input")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("<ol><li>one</li>"));
}

#[test]
fn test_render_missing_file_fails() {
    let mut cmd = Command::cargo_bin("flashgate").unwrap();
    cmd.arg("render")
        .args(["--input", "/nonexistent/flashgate/reply.md"])
        .assert()
        .failure();
}

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("flashgate").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("render"));
}
