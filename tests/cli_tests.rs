use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RDS_VARS: &[&str] = &[
    "RDS_ENDPOINT",
    "RDS_DB_NAME",
    "RDS_USERNAME",
    "RDS_PASSWORD",
    "RDS_CA_BUNDLE",
    "PANEL_NAME",
    "SOURCE_FEED",
    "MAX_RESULTS",
    "PANEL_FEED_SQLITE_PATH",
    "FEED_ITEMS_FILE",
    "PANEL_FEEDER_EVENT",
];

fn feeder_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("panel-feeder").unwrap();
    // Keep the caller's environment and any .env file out of the test
    cmd.current_dir(temp_dir.path());
    for var in RDS_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = TempDir::new().unwrap();

    feeder_cmd(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("prune"));
}

#[test]
fn test_run_help_shows_event_flag() {
    let temp_dir = TempDir::new().unwrap();

    feeder_cmd(&temp_dir)
        .arg("run")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--event"));
}

#[test]
fn test_run_without_source_reports_no_data() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("panel.db");

    feeder_cmd(&temp_dir)
        .arg("run")
        .env("PANEL_FEED_SQLITE_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"statusCode\":200"))
        .stdout(predicate::str::contains("No new data available"));
}

#[test]
fn test_run_with_non_json_event_still_reports() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("panel.db");

    feeder_cmd(&temp_dir)
        .arg("run")
        .arg("--event")
        .arg("nightly-trigger")
        .env("PANEL_FEED_SQLITE_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"statusCode\":200"))
        .stdout(predicate::str::contains("No new data available"));
}

#[test]
fn test_run_stores_items_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("panel.db");
    let items_path = temp_dir.path().join("items.json");
    fs::write(
        &items_path,
        r#"[{"title": "Exchange zero-day"}, {"title": "Botnet takedown"}, {"title": "Patch Tuesday"}]"#,
    )
    .unwrap();

    let output = feeder_cmd(&temp_dir)
        .arg("run")
        .env("PANEL_FEED_SQLITE_PATH", db_path.to_str().unwrap())
        .env("FEED_ITEMS_FILE", items_path.to_str().unwrap())
        .env("MAX_RESULTS", "2")
        .env("PANEL_NAME", "cve_watch")
        .output()
        .unwrap();

    assert!(output.status.success());

    let response: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(response["statusCode"], 200);

    let body: serde_json::Value =
        serde_json::from_str(response["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["panel_name"], "cve_watch");
    assert_eq!(body["items_stored"], 2);
    assert_eq!(body["status"], "success");
}

#[test]
fn test_run_without_database_fails_with_structured_result() {
    let temp_dir = TempDir::new().unwrap();
    let items_path = temp_dir.path().join("items.json");
    fs::write(&items_path, r#"[{"title": "Phishing campaign"}]"#).unwrap();

    feeder_cmd(&temp_dir)
        .arg("run")
        .env("FEED_ITEMS_FILE", items_path.to_str().unwrap())
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"statusCode\":500"))
        .stdout(predicate::str::contains("RDS_ENDPOINT"))
        .stdout(predicate::str::contains("failed"));
}

#[test]
fn test_invalid_max_results_rejected() {
    let temp_dir = TempDir::new().unwrap();

    feeder_cmd(&temp_dir)
        .arg("run")
        .env("MAX_RESULTS", "many")
        .assert()
        .failure()
        .stderr(predicate::str::contains("MAX_RESULTS"));
}

#[test]
fn test_prune_on_empty_database() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("panel.db");

    feeder_cmd(&temp_dir)
        .arg("prune")
        .env("PANEL_FEED_SQLITE_PATH", db_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 expired records."));
}
