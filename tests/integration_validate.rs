//! Integration tests for `afx validate`, `afx list` and `afx config`

use afx::test_utils::{TestEnvironment, TestEnvironmentBuilder};
use assert_cmd::Command;
use predicates::prelude::*;

fn afx(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("afx").unwrap();
    cmd.envs(env.env_vars()).env_remove("AFX_SHELL").env_remove("AFX_LOG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_validate_ok() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config("a.yaml", "github:\n  - {name: a, owner: o, repo: a}\n")
        .with_config("b.yml", "http:\n  - {name: b, url: 'https://example.com/b.sh', depends-on: [a]}\n")
        .build()
        .unwrap();

    afx(&env)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 package(s) in 2 file(s) are valid"));
}

#[test]
fn test_validate_reports_every_problem() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config(
            "main.yaml",
            r"
local:
  - {name: dup, directory: /tmp/dup}
  - {name: dup, directory: /tmp/dup2}
  - {name: needy, directory: /tmp/needy, depends-on: [left, right]}
",
        )
        .build()
        .unwrap();

    afx(&env)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicated packages: [dup]"))
        .stderr(predicate::str::contains("\"left\": not a valid package name in depends-on of needy"))
        .stderr(predicate::str::contains("\"right\": not a valid package name in depends-on of needy"))
        .stderr(predicate::str::contains("2 problem(s) found"));
}

#[test]
fn test_validate_schema_error() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config("main.yaml", "github:\n  - {name: '', owner: o, repo: r}\n")
        .build()
        .unwrap();

    afx(&env)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("github[0].name: must not be empty"));
}

#[test]
fn test_validate_missing_config_path() {
    let env = TestEnvironmentBuilder::new().unwrap().build().unwrap();
    afx(&env)
        .args(["validate", "--config"])
        .arg(env.base.join("nowhere"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config not found"));
}

#[test]
fn test_list_json_in_load_order() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config(
            "main.yaml",
            r"
github:
  - {name: app, owner: o, repo: app, depends-on: [base]}
  - {name: base, owner: o, repo: base}
",
        )
        .with_package_file("github.com/o/base/README.md", "")
        .build()
        .unwrap();

    let output = afx(&env).args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "base");
    assert_eq!(entries[0]["kind"], "github");
    assert_eq!(entries[0]["installed"], true);
    assert_eq!(entries[1]["name"], "app");
    assert_eq!(entries[1]["installed"], false);
    assert_eq!(entries[1]["depends-on"], serde_json::json!(["base"]));
}

#[test]
fn test_list_missing_only() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config("main.yaml", "github:\n  - {name: a, owner: o, repo: a}\n  - {name: b, owner: o, repo: b}\n")
        .with_package_file("github.com/o/a/x", "")
        .build()
        .unwrap();

    afx(&env)
        .args(["list", "--missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" b ").and(predicate::str::contains(" a ").not()));
}

#[test]
fn test_config_shows_merged_settings() {
    let env = TestEnvironmentBuilder::new()
        .unwrap()
        .with_config("10.yaml", "config:\n  shell: zsh\n")
        .with_config("20.yaml", "config:\n  filter:\n    command: sk\n")
        .build()
        .unwrap();

    afx(&env)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("shell: zsh"))
        .stdout(predicate::str::contains("command: sk"))
        .stdout(predicate::str::contains("--reverse"));

    afx(&env)
        .arg("config")
        .env("AFX_SHELL", "fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("shell: fish"));
}
