//! Binary tests for bf
//!
//! These cover everything that fails before AnkiConnect is contacted, plus
//! an unreachable AnkiConnect endpoint.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bf(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bf").expect("bf binary");
    cmd.current_dir(dir.path()).env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_help_lists_context_flags() {
    let temp = TempDir::new().unwrap();
    bf(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--context-before"))
        .stdout(predicate::str::contains("--context-after"))
        .stdout(predicate::str::contains("--file-type"));
}

#[test]
fn test_unknown_extension_fails_before_anki() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.md"), "Hello\n").unwrap();

    bf(&temp)
        .arg("notes.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to automatically detect file type"));
}

#[test]
fn test_missing_transcript_fails() {
    let temp = TempDir::new().unwrap();

    bf(&temp)
        .arg("missing.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load transcript"));
}

#[test]
fn test_epub_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("book.epub"), "").unwrap();

    bf(&temp)
        .arg("book.epub")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn test_malformed_renji_export_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("log.json"), r#"{"lines": []}"#).unwrap();

    bf(&temp)
        .arg("log.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load transcript"));
}

#[test]
fn test_unreachable_anki_reports_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("vn01.txt"), "Hello\nWorld\n").unwrap();

    bf(&temp)
        .args(["vn01.txt", "--anki-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""tag:vn01""#))
        .stderr(predicate::str::contains("Failed to collect notes from Anki"));
}
