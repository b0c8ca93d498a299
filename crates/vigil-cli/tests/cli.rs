//! End-to-end runs of the `vigil` binary against temporary projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn vigil(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vigil"))
        .args(args)
        .arg("--project")
        .arg(project)
        .env_remove("VIGIL_LOG")
        .output()
        .expect("vigil should run")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, contents).expect("write file");
}

/// A project with settings, one schema, and one conforming document.
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    assert!(vigil(root, &["init"]).status.success());
    write(
        root,
        "schemas/car.json",
        &json!({
            "type": "object",
            "required": ["speed"],
            "properties": { "speed": { "type": "number", "minimum": 0 } }
        })
        .to_string(),
    );
    write(
        root,
        "configs/car.json",
        r#"{ "$schema": "schemas/car.json", "speed": 12 }"#,
    );
    dir
}

#[test]
fn init_is_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = stdout_json(&vigil(dir.path(), &["init"]));
    let second = stdout_json(&vigil(dir.path(), &["init"]));

    assert_eq!(first["created"], true);
    assert_eq!(second["created"], false);
    assert!(dir.path().join(".vigil/validation.toml").is_file());
}

#[test]
fn settings_reports_defaults_after_init() {
    let dir = project();
    let output = vigil(dir.path(), &["settings"]);

    assert!(output.status.success());
    let settings = stdout_json(&output);
    assert_eq!(settings["validation"]["validate_composites"], true);
    assert_eq!(settings["validation"]["search_paths"], json!([]));
    assert_eq!(settings["monitor"]["allow_repeated_validation"], true);
}

#[test]
fn clean_project_enters_running() {
    let dir = project();
    let output = vigil(dir.path(), &["check", "--on-failure", "abort"]);

    assert!(output.status.success());
    let response = stdout_json(&output);
    assert_eq!(response["passed"], true);
    assert_eq!(response["state"], "running");
    assert_eq!(response["report"]["pipeline"]["objects_validated"], 2);
}

#[test]
fn failing_document_aborts_with_its_path() {
    let dir = project();
    write(
        dir.path(),
        "configs/car.json",
        r#"{ "$schema": "schemas/car.json", "speed": -1 }"#,
    );

    let output = vigil(dir.path(), &["check", "--on-failure", "abort"]);

    assert!(!output.status.success());
    let response = stdout_json(&output);
    assert_eq!(response["passed"], false);
    assert_eq!(response["state"], "idle");
    assert_eq!(response["violation"]["context"]["path"], "configs/car");
    assert!(response["violation"]["cause"].is_null());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let error_line = stderr
        .lines()
        .find(|line| line.starts_with("vigil error:"))
        .expect("error line");
    assert_eq!(error_line.matches("[asset 'configs/car']").count(), 1);

    let log = fs::read_to_string(dir.path().join(".vigil/validation.log")).expect("log");
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("VIOLATION"));
}

#[test]
fn continue_enters_running_and_logs_the_override() {
    let dir = project();
    write(
        dir.path(),
        "configs/car.json",
        r#"{ "$schema": "schemas/car.json" }"#,
    );

    let output = vigil(dir.path(), &["check", "--on-failure", "continue"]);

    assert!(output.status.success());
    let response = stdout_json(&output);
    assert_eq!(response["passed"], false);
    assert_eq!(response["state"], "running");
    let log = fs::read_to_string(dir.path().join(".vigil/validation.log")).expect("log");
    assert!(log.contains("VIOLATION"));
    assert!(log.contains("LOGGED"));
}

#[test]
fn missing_settings_abort() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = vigil(dir.path(), &["check", "--on-failure", "abort"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("validation settings unavailable"));
}

#[test]
fn scene_builtins_come_from_monitor_config() {
    let dir = project();
    write(
        dir.path(),
        ".vigil/monitor.toml",
        "[builtins]\nprimary_viewpoint = true\n",
    );
    write(
        dir.path(),
        ".vigil/scene.json",
        r#"{ "name": "Main", "entities": [{ "id": "sun", "name": "Sun", "roles": ["directional_light"] }] }"#,
    );

    let output = vigil(dir.path(), &["check", "--on-failure", "abort"]);

    assert!(!output.status.success());
    let response = stdout_json(&output);
    assert_eq!(response["violation"]["context"]["kind"], "scene");
    assert_eq!(
        response["violation"]["message"],
        "scene 'Main' must contain exactly one primary viewpoint (found 0)"
    );
}
