use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp dir
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".transflow").join("config.json")
}

fn write_config(dir: &tempfile::TempDir, contents: &str) {
    let path = config_file_path(dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

const BINARY_NAME: &str = "transflow-dash";

/// Nothing listens on the discard port.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn command(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("TRANSFLOW_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Command-line arguments"))
        .stdout(contains("export"));
}

#[test]
fn list_against_unreachable_api_fails_gracefully() {
    let home = temp_home();
    command(&home)
        .args(["--api-url", UNREACHABLE_API, "list"])
        .assert()
        .failure()
        .stdout(contains("Could not load rides"));
}

#[test]
fn export_against_unreachable_api_writes_nothing() {
    let home = temp_home();
    let out = temp_home();
    command(&home)
        .args(["--api-url", UNREACHABLE_API, "export", "--output"])
        .arg(out.path())
        .assert()
        .failure()
        .stdout(contains("Could not load rides"));
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
/// An invalid fare is rejected before any request is made.
fn create_with_invalid_fare_reports_validation_error() {
    let home = temp_home();
    command(&home)
        .args([
            "--api-url",
            UNREACHABLE_API,
            "create",
            "--passenger",
            "Ana",
            "--driver",
            "Carla",
            "--origin",
            "Centro",
            "--destination",
            "Aeroporto",
            "--fare",
            "dez",
        ])
        .assert()
        .failure()
        .stdout(contains("Invalid ride"))
        .stdout(contains("Fare 'dez' is not a number"));
}

#[test]
fn malformed_api_url_is_rejected() {
    let home = temp_home();
    command(&home)
        .args(["--api-url", "ftp://rides", "list"])
        .assert()
        .failure()
        .stderr(contains("Invalid API URL"));
}

#[test]
fn export_rejects_bad_date() {
    let home = temp_home();
    command(&home)
        .args(["export", "--date", "19/10/2026"])
        .assert()
        .failure()
        .stderr(contains("YYYY-MM-DD"));
}

#[test]
/// Configure should create the config file under $HOME.
fn configure_writes_config_file() {
    let home = temp_home();
    let config_path = config_file_path(&home);
    assert!(!config_path.exists());

    command(&home)
        .args([
            "--api-url",
            "http://rides.internal:8000",
            "configure",
            "--driver",
            "Carla",
            "--interval-ms",
            "5000",
        ])
        .assert()
        .success()
        .stdout(contains("Config saved"));

    let saved = fs::read_to_string(&config_path).unwrap();
    assert!(saved.contains("http://rides.internal:8000"));
    assert!(saved.contains("Carla"));
    assert!(saved.contains("5000"));
}

#[test]
fn malformed_env_url_is_rejected_instead_of_skipped() {
    let home = temp_home();
    write_config(&home, r#"{"api_url": "http://config-host:8000"}"#);
    command(&home)
        .env("TRANSFLOW_API_URL", "not-a-url")
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("Invalid API URL 'not-a-url' from TRANSFLOW_API_URL"));
}

#[test]
fn env_url_is_used_before_config() {
    let home = temp_home();
    write_config(&home, r#"{"api_url": "rides.internal:8000"}"#);
    command(&home)
        .env("TRANSFLOW_API_URL", UNREACHABLE_API)
        .arg("list")
        .assert()
        .failure()
        .stdout(contains("Could not load rides"));
}

#[test]
fn malformed_config_url_is_rejected() {
    let home = temp_home();
    write_config(&home, r#"{"api_url": "rides.internal:8000"}"#);
    command(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("from the config file"));
}

#[test]
/// A corrupted config blocks commands that need it, but configure can still repair it.
fn corrupted_config_can_be_repaired() {
    let home = temp_home();
    write_config(&home, "{ not json");

    command(&home)
        .args(["--api-url", UNREACHABLE_API, "list"])
        .assert()
        .failure()
        .stdout(contains("Could not read config"));

    command(&home)
        .args(["configure", "--driver", "Carla"])
        .assert()
        .success()
        .stdout(contains("Config saved"));

    let saved = fs::read_to_string(config_file_path(&home)).unwrap();
    assert!(saved.contains("Carla"));
}

#[test]
fn configure_with_empty_api_url_clears_it() {
    let home = temp_home();
    write_config(&home, r#"{"api_url": "http://rides.internal:8000"}"#);

    command(&home)
        .args(["--api-url", "", "configure"])
        .assert()
        .success();

    let saved = fs::read_to_string(config_file_path(&home)).unwrap();
    assert!(!saved.contains("rides.internal"));
}

#[test]
fn rust_log_enables_stderr_logging() {
    let home = temp_home();
    command(&home)
        .args(["--api-url", UNREACHABLE_API, "list"])
        .assert()
        .failure()
        .stderr(contains("Using ride API at").not());

    command(&home)
        .env("RUST_LOG", "info")
        .args(["--api-url", UNREACHABLE_API, "list"])
        .assert()
        .failure()
        .stderr(contains("Using ride API at"))
        .stderr(contains("http://127.0.0.1:9"));
}
