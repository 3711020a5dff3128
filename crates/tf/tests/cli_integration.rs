//! CLI integration tests for the `tf` binary.
//!
//! Each test runs the binary inside a sandbox: a temporary task file, a
//! temporary config path and no inherited color or log settings.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use serde_json::Value;
use tempfile::TempDir;

const TASKS: &str = r#"[
    {"id": "A", "title": "Ship release", "priority": "high", "done": false, "labels": ["release"]},
    {"id": "B", "title": "Triage bugs", "priority": "high", "done": true},
    {"id": "C", "title": "Write docs", "priority": "medium", "done": false, "labels": ["needs review"]},
    {"id": "D", "title": "Update deps", "priority": "medium", "done": true},
    {"id": "E", "title": "Tidy backlog", "priority": "low", "done": false}
]"#;

struct Sandbox {
    _dir: TempDir,
    tasks_path: PathBuf,
    config_path: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temporary sandbox");
        let tasks_path = dir.path().join("tasks.json");
        let config_path = dir.path().join("config").join("config.toml");
        fs::write(&tasks_path, TASKS).expect("failed to write tasks");

        Self {
            _dir: dir,
            tasks_path,
            config_path,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tf"));
        cmd.args(args);
        cmd.env("TF_CONFIG", &self.config_path);
        cmd.env("TF_TASKS_FILE", &self.tasks_path);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd.stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("failed to run tf")
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(
            output.status.success(),
            "tf {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}

fn task_ids(json: &Value) -> Vec<String> {
    json["tasks"]
        .as_array()
        .expect("tasks array")
        .iter()
        .map(|t| t["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_without_filter_returns_everything() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["list"]);
    assert_eq!(task_ids(&json), vec!["A", "B", "C", "D", "E"]);
    assert_eq!(json["total"], 5);
    assert_eq!(json["matched"], 5);
}

#[test]
fn test_list_and_binds_tighter_than_or() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "list",
        "--filter",
        "priority = high || priority = medium && done = false",
    ]);
    assert_eq!(task_ids(&json), vec!["A", "B", "C"]);
}

#[test]
fn test_list_parentheses_regroup() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&[
        "list",
        "-F",
        "(priority = high || priority = medium) && done = false",
    ]);
    assert_eq!(task_ids(&json), vec!["A", "C"]);
}

#[test]
fn test_list_quoted_label() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["list", "-F", "labels like \"needs review\""]);
    assert_eq!(task_ids(&json), vec!["C"]);
}

#[test]
fn test_list_sort_and_limit() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["list", "--sort", "title", "--limit", "2"]);
    assert_eq!(task_ids(&json), vec!["A", "E"]);
    assert_eq!(json["matched"], 5);
}

#[test]
fn test_list_invalid_filter_falls_back_to_all() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list", "-F", "priority = high &&"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("unexpected end"), "stderr: {err}");
    assert!(err.contains("at token 4"), "stderr: {err}");
    assert!(stdout(&output).contains("5 of 5 tasks"));
}

#[test]
fn test_list_invalid_filter_json_reports_error() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["list", "-F", "colour = red"]);

    assert_eq!(task_ids(&json).len(), 5);
    assert_eq!(json["filter_error"]["position"], 0);
    assert!(json["filter_error"]["message"]
        .as_str()
        .unwrap()
        .contains("unknown field 'colour'"));
}

#[test]
fn test_list_strict_rejects_invalid_filter() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["--json", "list", "--strict", "-F", "(done = true"]);

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(json["error"]["code"], "FILTER_ERROR");
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("unclosed parenthesis"));
}

#[test]
fn test_list_missing_task_file() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .command(&["list"])
        .env("TF_TASKS_FILE", sandbox.tasks_path.with_file_name("missing.json"))
        .output()
        .expect("failed to run tf");

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("missing.json"));
}

#[test]
fn test_list_table_output() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["list", "-F", "done = true"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Triage bugs"));
    assert!(out.contains("Update deps"));
    assert!(!out.contains("Ship release"));
    assert!(out.contains("2 of 5 tasks"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_prints_tree() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["check", "done = true || labels in a,b && priority > low"]);

    assert!(output.status.success());
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "||");
    assert!(lines[1].ends_with("done = true"));
    assert!(lines[2].ends_with("&&"));
}

#[test]
fn test_check_json() {
    let sandbox = Sandbox::new();
    let json = sandbox.run_json(&["check", "--tokens", "priority not in low,medium"]);

    assert_eq!(json["valid"], true);
    assert_eq!(json["expression"]["operator"], "not in");
    assert_eq!(json["expression"]["value"][1], "medium");
    assert_eq!(json["tokens"][1]["text"], "not");
    assert_eq!(json["tokens"][2]["text"], "in");
}

#[test]
fn test_check_invalid_exits_with_filter_code() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["check", "done = true && priorty = high"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("did you mean 'priority'"), "stderr: {err}");
    assert!(err.contains('^'));
}

#[test]
fn test_check_deep_nesting_exits_with_filter_code() {
    let sandbox = Sandbox::new();
    let deep = "(".repeat(50_000);
    let output = sandbox.run(&["check", &deep]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("nested too deeply"));
}

#[test]
fn test_list_deep_nesting_falls_back_to_all() {
    let sandbox = Sandbox::new();
    let deep = "(".repeat(50_000);
    let json = sandbox.run_json(&["list", "-F", &deep]);

    assert_eq!(task_ids(&json).len(), 5);
    assert!(json["filter_error"]["message"]
        .as_str()
        .unwrap()
        .contains("nested too deeply"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_default_filter_applies_to_list() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["config", "set", "filter.default", "done = false"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(sandbox.config_path.exists());

    let json = sandbox.run_json(&["list"]);
    assert_eq!(task_ids(&json), vec!["A", "C", "E"]);

    // An explicit filter still wins
    let json = sandbox.run_json(&["list", "-F", "done = true"]);
    assert_eq!(task_ids(&json), vec!["B", "D"]);
}

#[test]
fn test_config_rejects_invalid_default_filter() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "set", "filter.default", "done ="]);
    assert_eq!(output.status.code(), Some(5));
    assert!(!sandbox.config_path.exists());
}

#[test]
fn test_config_show_json() {
    let sandbox = Sandbox::new();
    sandbox.run(&["config", "set", "list.limit", "3"]);

    let json = sandbox.run_json(&["config", "show"]);
    assert_eq!(json["exists"], true);
    assert_eq!(json["config"]["list"]["limit"], 3);
}

#[test]
fn test_config_path() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["config", "path"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        sandbox.config_path.display().to_string()
    );
}

// ============================================================================
// interactive / completions
// ============================================================================

#[test]
fn test_interactive_requires_terminal() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["interactive"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("terminal"));
}

#[test]
fn test_completions_bash() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("tf"));
}
