//! Tests for CLI argument parsing against the built binary.

mod common;

use std::process::Command;

fn directory_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_retail-directory"))
}

#[test]
fn test_help_lists_options() {
    let output = directory_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--source", "--format", "--page-size", "--no-background", "--dump"] {
        assert!(stdout.contains(flag), "missing {flag} in help:\n{stdout}");
    }
}

#[test]
fn test_invalid_format_is_rejected() {
    let output = directory_cmd()
        .args(["--format", "xml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xml"));
}

#[test]
fn test_dump_prints_first_page_as_json() {
    let (dir, data) = common::temp_file("retailers.csv", common::SAMPLE_CSV);
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = directory_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--source")
        .arg(&data)
        .arg("--log-file")
        .arg(dir.path().join("test.log"))
        .args(["--page-size", "2", "--dump"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let fragment: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let cards = fragment["cards"].as_array().unwrap();
    assert_eq!(fragment["start_index"], 0);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["id"], "retailer-1001");
    assert_eq!(cards[1]["number"], 2);
    assert_eq!(cards[1]["contacts"][0]["href"], "tel:9840099999");
}

#[test]
fn test_dump_fails_on_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = directory_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--source")
        .arg(dir.path().join("missing.json"))
        .arg("--log-file")
        .arg(dir.path().join("test.log"))
        .arg("--dump")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (dir, config) = common::temp_file("config.toml", "[directory]\npage_size = 0\n");
    let output = directory_cmd()
        .arg("--config")
        .arg(&config)
        .arg("--log-file")
        .arg(dir.path().join("test.log"))
        .arg("--dump")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("page_size"));
}
