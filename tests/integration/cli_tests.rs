//! CLI surface tests: flags, formats and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/java")
        .join(name)
}

fn cmd() -> Command {
    Command::cargo_bin("javagadget").expect("binary builds")
}

#[test]
fn clean_file_exits_zero() {
    cmd()
        .arg(fixture("Clean.java"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No inspection findings"));
}

#[test]
fn findings_exit_with_code_one() {
    cmd()
        .arg(fixture("MayBeStatic.java"))
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("JG001"))
        .stdout(predicate::str::contains("may be declared 'static'"));
}

#[test]
fn compact_format_is_one_line_per_finding() {
    cmd()
        .arg(fixture("MayBeStatic.java"))
        .args(["--format", "compact"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("warning [JG001]"));
}

#[test]
fn json_format_names_the_rule() {
    cmd()
        .arg(fixture("Copyable.java"))
        .args(["--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"rule\": \"JG003\""))
        .stdout(predicate::str::contains("\"findings\""));
}

#[test]
fn rule_filter_limits_the_run() {
    // only JG003 fires on this fixture, so restricting to JG001 is a clean run
    cmd()
        .arg(fixture("Copyable.java"))
        .args(["--rule", "JG001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inspection findings"));
}

#[test]
fn unknown_rule_code_is_an_error() {
    cmd()
        .arg(fixture("Clean.java"))
        .args(["--rule", "XX999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown rule code"));
}

#[test]
fn fix_flag_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Fixable.java");
    fs::copy(fixture("Fixable.java"), &target).unwrap();

    cmd()
        .arg(&target)
        .arg("--fix")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Applied 2 quick-fix(es)"));

    let edited = fs::read_to_string(&target).unwrap();
    assert!(edited.contains("static String shout(String input)"));
    assert!(edited.contains("static String whisper(String input)"));
}

#[test]
fn dry_run_leaves_the_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Fixable.java");
    fs::copy(fixture("Fixable.java"), &target).unwrap();
    let before = fs::read_to_string(&target).unwrap();

    cmd()
        .arg(&target)
        .arg("--dry-run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("would be applied"))
        .stdout(predicate::str::contains("make 'shout' static"));

    assert_eq!(fs::read_to_string(&target).unwrap(), before);
}

#[test]
fn config_toggle_changes_jg001_behavior() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("OnlyEmpty.java");
    fs::write(
        &target,
        "class OnlyEmpty { private void blank() {} }",
    )
    .unwrap();

    // empty bodies are skipped by default
    cmd().arg(&target).assert().success();

    cmd()
        .arg(&target)
        .args(["--ignore-empty-methods", "false"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("blank"));
}

#[test]
fn completions_are_generated() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("javagadget"));
}

#[test]
fn directory_scan_respects_exclude_patterns() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("generated")).unwrap();
    fs::copy(
        fixture("Fixable.java"),
        dir.path().join("generated/Fixable.java"),
    )
    .unwrap();
    fs::copy(fixture("Clean.java"), dir.path().join("Clean.java")).unwrap();

    cmd()
        .arg(dir.path())
        .args(["--exclude", "generated/**"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No inspection findings"));
}
