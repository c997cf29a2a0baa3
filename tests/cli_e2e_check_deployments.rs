//! End-to-end tests for the `wildintel-tools check-deployments` command.
//!
//! The fixtures never need ExifTool: deployments are either already
//! validated or the test asserts how a missing tool is reported.

mod common;
use common::prelude::*;

const LOC01: &str = "R0001-LOC01,2024:05:01,10:00:00,2024:05:31,18:00:00";
const LOC02: &str = "R0001-LOC02,2024:05:02,09:00:00,2024:05:30,12:00:00";

#[test]
fn test_check_deployments_help() {
    let mut cmd = cargo_bin_cmd!("wildintel-tools");
    cmd.arg("check-deployments")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tolerance-hours"))
        .stdout(predicate::str::contains("--extensions"))
        .stdout(predicate::str::contains("--revalidate"));
}

#[test]
fn test_check_deployments_missing_timestamp_log() {
    let fixture = TestFixture::new().with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg");

    fixture
        .dataset_command("check-deployments")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "No FileTimestampLog R0001_FileTimestampLog.csv found",
        ))
        .stdout(predicate::str::contains("Status: failed"));

    assert!(fixture.report().contains("check filetimestamplog"));
}

#[test]
fn test_check_deployments_skips_validated() {
    let fixture = TestFixture::new()
        .with_timestamp_log("R0001", &[LOC01])
        .with_marker("R0001", "R0001-LOC01");

    fixture
        .dataset_command("check-deployments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: success"));

    let report = fixture.report();
    assert!(report.contains("deployment validated"));
    assert!(report.contains("previously validated at 2024-06-01T10:00:00.000000"));
}

#[test]
fn test_check_deployments_revalidate_withdraws_failed_marker() {
    let fixture = TestFixture::new()
        .with_timestamp_log("R0001", &[LOC01])
        .with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg")
        .with_marker("R0001", "R0001-LOC01");

    fixture
        .dataset_command("check-deployments")
        .arg("--revalidate")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to process image"))
        .stdout(predicate::str::contains("no longer validates"));

    assert!(!fixture
        .data_path()
        .join("R0001/R0001-LOC01/.validated")
        .exists());
    assert!(fixture.report().contains("validation withdrawn"));
}

#[test]
fn test_check_deployments_missing_and_unlisted_folders() {
    let fixture = TestFixture::new()
        .with_timestamp_log("R0001", &[LOC01, LOC02])
        .with_marker("R0001", "R0001-LOC01")
        .with_media("R0001/R0001-LOC03/IMG_0001.JPG", b"jpeg");

    fixture
        .dataset_command("check-deployments")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Deployment folder 'R0001-LOC02' not found",
        ))
        .stdout(predicate::str::contains(
            "Deployment folder 'R0001-LOC03' is not listed in R0001_FileTimestampLog.csv",
        ))
        .stdout(predicate::str::contains("Status: partial"));
}

#[test]
fn test_check_deployments_reports_unavailable_exiftool() {
    let fixture = TestFixture::new()
        .with_timestamp_log("R0001", &[LOC01])
        .with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg");

    fixture
        .dataset_command("check-deployments")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Failed to process image"));

    assert!(!fixture
        .data_path()
        .join("R0001/R0001-LOC01/.validated")
        .exists());
}

#[test]
fn test_check_deployments_empty_deployment_is_a_warning() {
    let fixture = TestFixture::new()
        .with_timestamp_log("R0001", &[LOC01])
        .with_media("R0001/R0001-LOC01/notes.txt", b"not media");

    fixture
        .dataset_command("check-deployments")
        .assert()
        .success()
        .stdout(predicate::str::contains("has no media files"))
        .stdout(predicate::str::contains("Status: empty"));
}

#[test]
fn test_check_deployments_unknown_extension() {
    let fixture = TestFixture::new();

    fixture
        .dataset_command("check-deployments")
        .arg("--extensions")
        .arg("jpg,jgp")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown media extension: jgp"))
        .stderr(predicate::str::contains("Did you mean 'jpg'?"));
}

#[test]
fn test_check_deployments_invalid_settings() {
    let fixture = TestFixture::new().with_settings(settings::INVALID);

    fixture
        .dataset_command("check-deployments")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Settings error"));
}
