//! Integration tests for the promptsync binary

use assert_cmd::Command;
use predicates::prelude::*;
use promptsync_test_utils::IsolatedTestEnvironment;
use serial_test::serial;
use std::fs;

fn promptsync(env: &IsolatedTestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("promptsync").unwrap();
    cmd.current_dir(env.project_path())
        .env("HOME", env.home_path())
        .env_remove("VISUAL")
        .env_remove("EDITOR");
    cmd
}

/// Create a record and return its id.
fn create_prompt(env: &IsolatedTestEnvironment, ide: &str, category: &str) -> String {
    let output = promptsync(env)
        .args(["--ide", ide, "--format", "json", "new", category])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    rows[0]["id"].as_str().unwrap().to_string()
}

#[test]
#[serial]
fn test_help_lists_commands() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("use"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
#[serial]
fn test_new_then_list() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .args(["new", "project", "--name", "Team rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project prompt"));

    promptsync(&env)
        .args(["--format", "json", "list", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Team rules\""));

    promptsync(&env)
        .args(["list", "global"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No global prompts"));
}

#[test]
#[serial]
fn test_use_writes_project_rules_file() {
    let env = IsolatedTestEnvironment::new().unwrap();
    let id = create_prompt(&env, "cursor", "project");

    promptsync(&env)
        .args(["--ide", "cursor", "use", "project", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced"));

    let written = fs::read_to_string(env.project_path().join(".cursorrules")).unwrap();
    assert_eq!(written, "# New prompt\n");
}

#[test]
#[serial]
fn test_use_without_rules_file_prints_settings_location() {
    let env = IsolatedTestEnvironment::new().unwrap();
    let id = create_prompt(&env, "cursor", "global");

    promptsync(&env)
        .args(["--ide", "cursor", "use", "global", &id, "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cursor Settings"))
        .stdout(predicate::str::contains("# New prompt"));
}

#[test]
#[serial]
fn test_check_then_import_untracked_rules() {
    let env = IsolatedTestEnvironment::new().unwrap();
    fs::write(env.project_path().join(".windsurfrules"), "Be concise.").unwrap();

    promptsync(&env)
        .args(["--ide", "windsurf", "check", "project"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("promptsync import project"));

    promptsync(&env)
        .args(["--ide", "windsurf", "check", "project", "--import"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported"));

    promptsync(&env)
        .args(["--ide", "windsurf", "check", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("matches project prompt"));

    assert_eq!(
        fs::read_to_string(env.project_path().join(".windsurfrules")).unwrap(),
        "Be concise."
    );
}

#[test]
#[serial]
fn test_import_missing_rules_file_fails() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .args(["--ide", "cursor", "import", "project"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Rules file not found"));
}

#[test]
#[serial]
fn test_malformed_record_is_a_warning() {
    let env = IsolatedTestEnvironment::new().unwrap();
    create_prompt(&env, "cursor", "project");
    let project_dir = env.prompts_dir().join("project");
    fs::write(project_dir.join("broken.toml"), "[meta\nnot toml").unwrap();

    promptsync(&env)
        .args(["list", "project"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("New Prompt"))
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
#[serial]
fn test_delete_missing_prompt_fails() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .args(["delete", "global", "missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Prompt not found: global/missing"));
}

#[test]
#[serial]
fn test_invalid_ide_is_rejected() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .args(["--ide", "notepad", "list", "global"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ide"));
}

#[test]
#[serial]
fn test_path_for_windsurf_global() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .args(["--ide", "windsurf", "--format", "json", "path", "global"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"file\""))
        .stdout(predicate::str::contains("global_rules.md"));
}

#[test]
#[serial]
fn test_project_config_selects_ide() {
    let env = IsolatedTestEnvironment::new().unwrap();
    let config_dir = env.project_path().join(".promptsync");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "ide = \"trae\"\n").unwrap();

    promptsync(&env)
        .args(["path", "project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_rules.md"));
}

#[test]
#[serial]
fn test_edit_creates_rules_file() {
    let env = IsolatedTestEnvironment::new().unwrap();
    promptsync(&env)
        .env("EDITOR", "true")
        .args(["--ide", "cursor", "edit", "project"])
        .assert()
        .success();

    assert!(env.project_path().join(".cursorrules").is_file());
}
