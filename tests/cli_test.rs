//! End-to-end tests for the tpatch binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory with its own HOME so no user config is picked up
struct TestContext {
    root: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("tpatch").expect("Failed to locate tpatch binary");
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_apply_updates_template_in_place() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "Write-Host \"hi\"");
    let template = ctx.write("template.json", r#"{"variables": {"$fxv#2": "old"}}"#);

    ctx.cli()
        .args(["apply"])
        .arg(&script)
        .arg(&template)
        .assert()
        .success()
        .stdout(predicate::str::contains("Template updated successfully"));

    assert_eq!(read_json(&template), json!({"variables": {"$fxv#2": "Write-Host \"hi\""}}));
}

#[test]
fn test_apply_preserves_other_keys_and_unicode() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "Write-Host 'Grüße'\r\n");
    let template = ctx.write(
        "template.json",
        r#"{"contentVersion": "1.0.0.0", "variables": {"name": "café", "$fxv#2": 42, "list": [1, {"a": null}]}, "outputs": {}}"#,
    );

    ctx.cli().arg("apply").arg(&script).arg(&template).assert().success();

    let text = fs::read_to_string(&template).unwrap();
    assert!(text.contains("café"), "non-ASCII should be written literally: {text}");
    assert!(text.starts_with("{\n  \"contentVersion\""));
    assert_eq!(
        serde_json::from_str::<Value>(&text).unwrap(),
        json!({
            "contentVersion": "1.0.0.0",
            "variables": {"name": "café", "$fxv#2": "Write-Host 'Grüße'\r\n", "list": [1, {"a": null}]},
            "outputs": {}
        })
    );
}

#[test]
fn test_apply_missing_key_exits_one_without_writing() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "body");
    let template = ctx.write("template.json", r#"{"variables": {}}"#);

    ctx.cli()
        .arg("apply")
        .arg(&script)
        .arg(&template)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find $fxv#2"));

    assert_eq!(fs::read_to_string(&template).unwrap(), r#"{"variables": {}}"#);
}

#[test]
fn test_apply_missing_variables_exits_one() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "body");
    let template = ctx.write("template.json", r#"{"parameters": {"$fxv#2": "old"}}"#);
    let output = ctx.path("out.json");

    ctx.cli()
        .arg("apply")
        .arg(&script)
        .arg(&template)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(1);

    assert!(!output.exists());
}

#[test]
fn test_apply_missing_script_fails_without_output() {
    let ctx = TestContext::new();
    let template = ctx.write("template.json", r#"{"variables": {"$fxv#2": "old"}}"#);
    let output = ctx.path("out.json");

    ctx.cli()
        .arg("apply")
        .arg(ctx.path("missing.ps1"))
        .arg(&template)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.ps1"));

    assert!(!output.exists());
    assert_eq!(read_json(&template), json!({"variables": {"$fxv#2": "old"}}));
}

#[test]
fn test_apply_invalid_template_fails() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "body");
    let template = ctx.write("template.json", "{\"variables\": {");

    ctx.cli()
        .arg("apply")
        .arg(&script)
        .arg(&template)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));

    assert_eq!(fs::read_to_string(&template).unwrap(), "{\"variables\": {");
}

#[test]
fn test_apply_dry_run_prints_only_document_on_stdout() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "new body");
    let template = ctx.write(
        "template.json",
        r#"{"variables": {"$fxv#2": "old", "big": 123456789012345678901234567890}}"#,
    );

    let assert = ctx
        .cli()
        .arg("apply")
        .arg(&script)
        .arg(&template)
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("Reading script from"));

    let stdout = &assert.get_output().stdout;
    let preview: Value = serde_json::from_slice(stdout).expect("stdout should be the JSON document alone");
    assert_eq!(preview["variables"]["$fxv#2"], json!("new body"));
    assert!(String::from_utf8_lossy(stdout).contains("123456789012345678901234567890"));
    assert_eq!(
        fs::read_to_string(&template).unwrap(),
        r#"{"variables": {"$fxv#2": "old", "big": 123456789012345678901234567890}}"#
    );
}

#[test]
fn test_local_config_selects_key_and_paths() {
    let ctx = TestContext::new();
    ctx.write("run.ps1", "echo configured");
    let template = ctx.write("template.json", r#"{"variables": {"body": "", "$fxv#2": "untouched"}}"#);
    ctx.write(
        ".templatepatcher.yml",
        "key: body\nscript: run.ps1\ntemplate: template.json\nindent: 4\n",
    );

    ctx.cli().assert().success();

    let text = fs::read_to_string(&template).unwrap();
    assert!(text.starts_with("{\n    \"variables\""));
    assert_eq!(
        serde_json::from_str::<Value>(&text).unwrap(),
        json!({"variables": {"body": "echo configured", "$fxv#2": "untouched"}})
    );
}

#[test]
fn test_explicit_config_missing_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--config", "nope.yml", "apply"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_escape_prints_json_string_contents() {
    let ctx = TestContext::new();
    let script = ctx.write("upload.ps1", "Write-Host \"hi\"\n\tdone");

    ctx.cli()
        .arg("escape")
        .arg(&script)
        .assert()
        .success()
        .stdout("Write-Host \\\"hi\\\"\\n\\tdone\n");
}
