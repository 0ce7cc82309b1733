//! CLI end-to-end tests
//!
//! Tests for the docforge command-line interface.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the docforge binary
#[allow(deprecated)]
fn docforge_cmd() -> Command {
    Command::cargo_bin("docforge").unwrap()
}

fn write_file(path: &Path, text: &str) {
    fs::write(path, text).unwrap();
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = docforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = docforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("docforge"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = docforge_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docforge"));
}

#[test]
fn test_cli_actions_lists_catalog() {
    let mut cmd = docforge_cmd();
    cmd.arg("actions")
        .assert()
        .success()
        .stdout(predicate::str::contains("search_forward"))
        .stdout(predicate::str::contains("replace_text"))
        .stdout(predicate::str::contains("merge_documents"));
}

#[test]
fn test_cli_actions_json() {
    let mut cmd = docforge_cmd();
    cmd.arg("actions")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\""))
        .stdout(predicate::str::contains("\"category\""));
}

#[test]
fn test_cli_run_requires_action_source() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    write_file(&doc, "text");

    let mut cmd = docforge_cmd();
    cmd.arg("run")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scenario"));
}

#[test]
fn test_cli_run_nonexistent_input() {
    let dir = tempdir().unwrap();
    let actions = dir.path().join("actions.json");
    write_file(&actions, r#"[{"id": "select_line"}]"#);

    let mut cmd = docforge_cmd();
    cmd.arg("run")
        .arg(dir.path().join("no-such-doc.txt"))
        .arg("--actions")
        .arg(&actions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_run_rejects_bad_action() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    write_file(&doc, "text");
    let actions = dir.path().join("actions.json");
    write_file(&actions, r#"[{"id": "levitate_text"}]"#);

    let mut cmd = docforge_cmd();
    cmd.arg("run")
        .arg(&doc)
        .arg("--actions")
        .arg(&actions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));
}

#[test]
fn test_cli_run_dry_run_shows_plan() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    write_file(&doc, "text");
    let config = dir.path().join("docforge.toml");
    write_file(
        &config,
        r#"
[[scenario]]
name = "touch-up"
description = "Select and restyle"

[[scenario.action]]
id = "select_document"

[[scenario.action]]
id = "set_alignment"
content = "center"
"#,
    );

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&doc)
        .arg("--scenario")
        .arg("touch-up")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("1-batch"))
        .stdout(predicate::str::contains("Set Alignment(center)"))
        .stdout(predicate::str::contains("DRY RUN"));
}

#[test]
fn test_cli_run_executes_and_exports() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    write_file(&doc, "old text");
    let actions = dir.path().join("actions.json");
    write_file(
        &actions,
        r#"[
            {"id": "search_and_select", "content": "old"},
            {"id": "replace_text", "content": "new"}
        ]"#,
    );
    let out = dir.path().join("out");

    let mut cmd = docforge_cmd();
    cmd.arg("run")
        .arg(&doc)
        .arg("--actions")
        .arg(&actions)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Run completed"));

    assert_eq!(fs::read_to_string(out.join("doc.txt")).unwrap(), "new text");
    assert_eq!(fs::read_to_string(&doc).unwrap(), "old text");

    let log = fs::read_to_string(out.join("run-log.json")).unwrap();
    assert!(log.contains("\"summary\""));
    assert!(log.contains("\"records\""));
}

#[test]
fn test_cli_run_scenario_not_found() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("doc.txt");
    write_file(&doc, "text");
    let config = dir.path().join("docforge.toml");
    write_file(
        &config,
        r#"
[[scenario]]
name = "real"
description = ""

[[scenario.action]]
id = "select_line"
"#,
    );

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&doc)
        .arg("--scenario")
        .arg("imaginary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_validate_ok() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("docforge.toml");
    write_file(
        &config,
        r#"
[[scenario]]
name = "cleanup"
description = "Strip draft markers"

[[scenario.action]]
id = "search_and_select"
content = "DRAFT"

[[scenario.action]]
id = "replace_text"
content = "FINAL"
"#,
    );

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_cli_validate_warns_without_failing() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("docforge.toml");
    write_file(
        &config,
        r#"
[[scenario]]
name = "cleanup"
description = "First of two"

[[scenario.action]]
id = "select_document"

[[scenario]]
name = "cleanup"
description = "Shadowed duplicate"

[[scenario.action]]
id = "select_line"
"#,
    );

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: duplicate scenario name"))
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_cli_validate_flags_unknown_action() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("docforge.toml");
    write_file(
        &config,
        r#"
[[scenario]]
name = "broken"
description = ""

[[scenario.action]]
id = "teleport_cursor"
"#,
    );

    let mut cmd = docforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown action"));
}
