//! Integration tests for the stagehand CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stagehand() -> Command {
    Command::cargo_bin("stagehand").unwrap()
}

fn write_script(dir: &TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path.to_string_lossy().into_owned()
}

/// Test CLI binary responds to --help
#[test]
fn test_cli_help() {
    stagehand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hook pipeline"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    stagehand()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stagehand"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    stagehand()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// config init writes a loadable starter file
#[test]
fn test_config_init_and_validate() {
    let temp_dir = TempDir::new().unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    assert!(temp_dir.path().join("stagehand.yml").exists());

    stagehand()
        .current_dir(temp_dir.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("configuration valid"));
}

/// Missing configuration is a configuration error (exit code 2)
#[test]
fn test_missing_config_exits_2() {
    let temp_dir = TempDir::new().unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "--all-files"])
        .assert()
        .code(2);
}

/// Malformed version pin is a configuration error (exit code 2)
#[test]
fn test_malformed_pin_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: fmt
    source: "true"
    version: latest
"#,
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "--all-files"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("version pin"));
}

/// Passing pipeline exits 0
#[test]
fn test_run_all_passed() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: noop
    source: "true"
    version: "1.0"
    files: ["**/*.py"]
"#,
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "a.py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All hooks passed"));
}

/// Failing hook exits 1 and names the hook
#[test]
fn test_run_some_failed() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: lint
    source: "false"
    version: "1.0"
    files: ["**/*.py"]
"#,
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "a.py"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lint"));
}

/// Auto-fix rewrite with zero exit reports needs-rerun and exits 1
#[test]
fn test_run_needs_rerun() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x=1\n").unwrap();
    let fixer = write_script(&temp_dir, "fixer.sh", "echo 'x = 1' > \"$1\"");
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        format!(
            r#"
hooks:
  - name: fmt
    source: "{fixer}"
    version: "1.0"
    files: ["**/*.py"]
    autofix: true
"#
        ),
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "a.py"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("re-run to verify"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("a.py")).unwrap(),
        "x = 1\n"
    );
}

/// JSON report carries the outcome and per-hook results
#[test]
fn test_run_json_format() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: noop
    source: "true"
    version: "1.0"
    files: ["**/*.py"]
"#,
    )
    .unwrap();

    let assert = stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "--format", "json", "a.py"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["outcome"], "AllPassed");
    assert_eq!(json["results"][0]["hook"], "noop");
    assert_eq!(json["results"][0]["exit_code"], 0);
}

/// --hook restricts the run to named hooks; unknown names exit 2
#[test]
fn test_run_hook_selection() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: good
    source: "true"
    version: "1.0"
    files: ["**/*.py"]
  - name: bad
    source: "false"
    version: "1.0"
    files: ["**/*.py"]
"#,
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "--hook", "good", "a.py"])
        .assert()
        .success();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["run", "--hook", "missing", "a.py"])
        .assert()
        .code(2);
}

/// hooks list prints the registry
#[test]
fn test_hooks_list() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: fmt
    source: rustfmt
    version: "1.7.0"
    files: ["**/*.rs"]
    autofix: true
"#,
    )
    .unwrap();

    stagehand()
        .current_dir(temp_dir.path())
        .args(["hooks", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("autofix"));
}

/// Running twice without auto-fix hooks yields the same outcome
#[test]
fn test_idempotent_without_autofix() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.py"), "x = 1\n").unwrap();
    fs::write(
        temp_dir.path().join("stagehand.yml"),
        r#"
hooks:
  - name: noop
    source: "true"
    version: "1.0"
    files: ["**/*.py"]
"#,
    )
    .unwrap();

    for _ in 0..2 {
        stagehand()
            .current_dir(temp_dir.path())
            .args(["run", "a.py"])
            .assert()
            .success()
            .stdout(predicate::str::contains("All hooks passed"));
    }
}
