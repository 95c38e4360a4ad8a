//! Integration tests for skeleton


use assert_cmd::Command;
use harness::{TestProject, run_skeleton, skeleton_json};
use predicates::prelude::*;
use skeleton::output::from_json;

const SCENARIO: &str = r#"import os
from sys import argv


class MyClass:
    def method1(self):
        pass


def function1():
    pass


def function2():
    pass
"#;

#[test]
fn test_markdown_outline_on_stdout() {
    let project = TestProject::new();
    project.add_file("app.py", SCENARIO);

    let (stdout, _stderr, success) = run_skeleton(project.path(), &["-p", ".", "-r"]);
    assert!(success, "skeleton should succeed");
    assert!(stdout.contains("## File: `app.py`"), "should list file: {}", stdout);
    assert!(stdout.contains("- `os` (*)"), "whole-module import: {}", stdout);
    assert!(stdout.contains("- `sys` (argv)"), "selective import: {}", stdout);
    assert!(stdout.contains("    - `method1(self)`"), "method: {}", stdout);
    assert!(stdout.contains("- `function2()`"), "function: {}", stdout);
}

#[test]
fn test_concrete_scenario_counts_survive_json() {
    let project = TestProject::new();
    project.add_file("app.py", SCENARIO);

    let (stdout, stderr, success) = run_skeleton(project.path(), &["-p", "app.py", "-o", "json"]);
    assert!(success, "skeleton should succeed: {}", stderr);

    let parsed = from_json(&stdout).expect("should re-parse exported JSON");
    assert_eq!(parsed.files.len(), 1);

    let file = &parsed.files[0];
    assert_eq!(file.imports.len(), 2);
    assert_eq!(file.classes.len(), 1);
    assert_eq!(file.classes[0].methods.len(), 1);
    assert!(file.classes[0].attributes.is_empty());
    assert_eq!(file.functions.len(), 2, "methods are not repeated as functions");
}

#[test]
fn test_json_document_shape() {
    let project = TestProject::new();
    project.add_file("app.py", SCENARIO);

    let doc = skeleton_json(project.path(), ".", &["-r"]);
    let file = &doc["files"][0];
    assert_eq!(file["path"], "app.py");
    assert_eq!(file["imports"][0]["module"], "os");
    assert_eq!(file["imports"][0]["names"][0], "*");
    assert_eq!(file["imports"][1]["names"][0], "argv");
    assert_eq!(file["classes"][0]["name"], "MyClass");
    assert!(file["classes"][0]["docstring"].is_null());
    assert_eq!(file["functions"][0]["name"], "function1");
}

#[test]
fn test_virtual_env_directories_pruned() {
    let project = TestProject::new();
    project.add_file("main.py", "def main():\n    pass\n");
    project.add_file("venv/lib/site.py", "def hidden():\n    pass\n");
    project.add_file(".venv/lib/other.py", "def hidden_too():\n    pass\n");

    let (stdout, stderr, success) = run_skeleton(project.path(), &["-p", ".", "-o", "json", "-r"]);
    assert!(success);
    assert!(
        stderr.contains("Ignored virtual environment directories: .venv, venv"),
        "should report pruned directories: {}",
        stderr
    );

    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let files = doc["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "main.py");
}

#[test]
fn test_exclude_dir_option() {
    let project = TestProject::new();
    project.add_file("main.py", "import os\n");
    project.add_file("build/gen.py", "import sys\n");
    project.add_file("dist-old/gen.py", "import sys\n");

    let doc = skeleton_json(project.path(), ".", &["-r", "-e", "build", "dist*"]);
    let files = doc["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["path"], "main.py");
}

#[test]
fn test_absolute_paths_by_default() {
    let project = TestProject::new();
    project.add_file("pkg/mod.py", "import os\n");

    let doc = skeleton_json(project.path(), ".", &[]);
    let path = doc["files"][0]["path"].as_str().unwrap();
    let expected = project.path().canonicalize().unwrap().join("pkg").join("mod.py");
    assert_eq!(path, expected.to_string_lossy());
}

#[test]
fn test_relative_paths() {
    let project = TestProject::new();
    project.add_file("pkg/mod.py", "import os\n");

    let doc = skeleton_json(project.path(), ".", &["--relative-paths"]);
    let expected = std::path::Path::new("pkg").join("mod.py");
    assert_eq!(doc["files"][0]["path"], expected.to_string_lossy().as_ref());
}

#[test]
fn test_project_name_is_root_folder() {
    let project = TestProject::new();
    project.add_file("my_app/main.py", "import os\n");

    let doc = skeleton_json(project.path(), "my_app", &[]);
    assert_eq!(doc["name"], "my_app");
}

#[test]
fn test_include_docstrings_flag() {
    let project = TestProject::new();
    project.add_file(
        "doc.py",
        "class Documented:\n    \"\"\"Class docs.\"\"\"\n\n    def run(self):\n        \"\"\"Run docs.\"\"\"\n",
    );

    let without = skeleton_json(project.path(), "doc.py", &[]);
    let class = &without["files"][0]["classes"][0];
    assert!(class["docstring"].is_null());
    assert_eq!(class["methods"][0]["docstring"], "Run docs.");

    let with = skeleton_json(project.path(), "doc.py", &["-d"]);
    assert_eq!(with["files"][0]["classes"][0]["docstring"], "Class docs.");
}

#[test]
fn test_output_file_written() {
    let project = TestProject::new();
    project.add_file("main.py", SCENARIO);

    let (stdout, stderr, success) =
        run_skeleton(project.path(), &["-p", "main.py", "-f", "skeleton.md"]);
    assert!(success);
    assert!(stdout.is_empty(), "nothing on stdout: {}", stdout);
    assert!(
        stderr.contains("Skeleton generated in 'skeleton.md'"),
        "should confirm output file: {}",
        stderr
    );

    let written = std::fs::read_to_string(project.path().join("skeleton.md")).unwrap();
    assert!(written.starts_with("# 📁 main.py"));
    assert!(written.contains("**Classes:**"));
}

#[test]
fn test_md_alias() {
    let project = TestProject::new();
    project.add_file("main.py", SCENARIO);

    let (stdout, _stderr, success) = run_skeleton(project.path(), &["-p", ".", "-o", "md"]);
    assert!(success);
    assert!(stdout.contains("**Functions:**"));
}

#[test]
fn test_nonexistent_path_fails() {
    Command::cargo_bin("skeleton")
        .unwrap()
        .args(["-p", "/definitely/not/here"])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn test_unknown_format_fails() {
    let project = TestProject::new();
    project.add_file("main.py", SCENARIO);

    Command::cargo_bin("skeleton")
        .unwrap()
        .current_dir(project.path())
        .args(["-p", ".", "-o", "xml"])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Exporter for 'xml' not available."));
}

#[test]
fn test_unknown_language_fails_before_reading() {
    // The path is never touched, so a missing path still reports the language
    Command::cargo_bin("skeleton")
        .unwrap()
        .args(["-p", "/definitely/not/here", "-l", "cobol"])
        .env("NO_COLOR", "1")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Parser for 'cobol' not available."));
}

#[test]
fn test_output_is_deterministic() {
    let project = TestProject::with_modules(12);

    let first = run_skeleton(project.path(), &["-p", ".", "-r", "-o", "json"]);
    let second = run_skeleton(project.path(), &["-p", ".", "-r", "-o", "json", "-j", "1"]);
    assert!(first.2 && second.2);
    assert_eq!(first.0, second.0);

    let doc: serde_json::Value = serde_json::from_str(&first.0).unwrap();
    let paths: Vec<&str> = doc["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted, "files are listed in sorted walk order");
}
