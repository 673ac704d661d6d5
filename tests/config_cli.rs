#![cfg(feature = "cli")]

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use regex::Regex;
use tempfile::TempDir;

type TestResult<T = ()> = Result<T, Box<dyn Error>>;

struct Workspace {
    tempdir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> TestResult<Self> {
        let tempdir = TempDir::new()?;
        let config = tempdir.path().join("vmctl").join("config.toml");
        Ok(Self { tempdir, config })
    }

    fn run(&self, args: &[&str]) -> TestResult<Output> {
        let output = Command::new(env!("CARGO_BIN_EXE_vmctl"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .env("HOME", self.tempdir.path())
            .env_remove("VMCTL_CONFIG")
            .env_remove("VMCTL_LOG")
            .output()?;
        Ok(output)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn config_help_lists_properties_in_presentation_order() -> TestResult {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["config"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Configurable properties (enter as SUBCOMMAND):"));

    let bullet = Regex::new(r"(?m)^ \* ([a-z0-9-]+)$")?;
    let keys: Vec<&str> = bullet
        .captures_iter(&text)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
        .collect();
    assert!(keys.len() > 20, "expected every property, got {keys:?}");

    let first_preflight = keys
        .iter()
        .position(|key| key.starts_with("skip-") || key.starts_with("warn-"))
        .expect("preflight keys listed");
    let mut plain = keys[..first_preflight].to_vec();
    plain.sort();
    assert_eq!(plain, keys[..first_preflight].to_vec());
    for pair in keys[first_preflight..].chunks(2) {
        assert!(pair[0].starts_with("skip-"), "unexpected pair {pair:?}");
        assert_eq!(pair[1], pair[0].replacen("skip-", "warn-", 1));
    }
    assert!(!workspace.config.exists());
    Ok(())
}

#[test]
fn set_get_view_unset_round_trip() -> TestResult {
    let workspace = Workspace::new()?;

    let output = workspace.run(&["config", "set", "memory", "10240"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Changes to configuration property 'memory'"));
    assert!(fs::read_to_string(&workspace.config)?.contains("memory = 10240"));

    let output = workspace.run(&["config", "get", "memory"])?;
    assert_eq!(stdout(&output).trim(), "10240");

    let output = workspace.run(&["config", "set", "skip-check-ram", "true"])?;
    assert!(output.status.success());

    let output = workspace.run(&["config", "view", "--format", "json"])?;
    let view: serde_json::Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        view,
        serde_json::json!({ "memory": 10240, "skip-check-ram": true })
    );

    let output = workspace.run(&["config", "unset", "memory"])?;
    assert_eq!(
        stdout(&output).trim(),
        "Successfully unset configuration property 'memory'"
    );
    let output = workspace.run(&["config", "get", "memory"])?;
    assert_eq!(
        stdout(&output).trim(),
        "Configuration property 'memory' is not set. Default value '9216' is used"
    );
    Ok(())
}

#[test]
fn invalid_value_is_rejected_without_writing() -> TestResult {
    let workspace = Workspace::new()?;
    workspace.run(&["config", "set", "cpus", "6"])?;
    let before = fs::read_to_string(&workspace.config)?;

    let output = workspace.run(&["config", "set", "cpus", "2"])?;
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(
        stderr(&output).trim(),
        "Error: Value '2' for configuration property 'cpus' is invalid, reason: requires integer value >= 4"
    );
    assert_eq!(fs::read_to_string(&workspace.config)?, before);
    Ok(())
}

#[test]
fn unknown_property_fails_with_usage_code() -> TestResult {
    let workspace = Workspace::new()?;
    let output = workspace.run(&["config", "get", "disk-size"])?;
    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("Configuration property 'disk-size' does not exist"));
    Ok(())
}

#[test]
fn malformed_config_file_is_reported() -> TestResult {
    let workspace = Workspace::new()?;
    fs::create_dir_all(workspace.config.parent().expect("parent"))?;
    fs::write(&workspace.config, "cpus = = 4")?;

    let output = workspace.run(&["config", "view"])?;
    assert_eq!(output.status.code(), Some(65));
    assert!(stderr(&output).contains("could not be parsed"));
    Ok(())
}
