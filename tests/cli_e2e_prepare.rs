//! End-to-end tests for the `wildintel-tools prepare` command.

mod common;
use common::prelude::*;

#[test]
fn test_prepare_help() {
    let mut cmd = cargo_bin_cmd!("wildintel-tools");
    cmd.arg("prepare")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Export validated deployments for Trapper"))
        .stdout(predicate::str::contains("--deployments"))
        .stdout(predicate::str::contains("--include-unvalidated"));
}

#[test]
fn test_prepare_requires_output_path() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.data_path())
        .assert()
        .code(2);
}

#[test]
fn test_prepare_rejects_unvalidated_deployment() {
    let fixture = TestFixture::new().with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg");
    let output = fixture.path().join("out");

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.data_path())
        .arg(&output)
        .arg("--report-file")
        .arg(fixture.report_path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Deployment 'R0001-LOC01' has no .validated marker",
        ))
        .stdout(predicate::str::contains("Status: failed"));

    assert!(!output.join("R0001/R0001-LOC01").exists());
}

#[test]
fn test_prepare_validated_empty_deployment() {
    let fixture = TestFixture::new().with_marker("R0001", "R0001-LOC01");
    let output = fixture.path().join("out");

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.data_path())
        .arg(&output)
        .arg("--report-file")
        .arg(fixture.report_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("has no media files"));

    assert!(output.join("R0001/R0001-LOC01").is_dir());
}

#[test]
fn test_prepare_copy_error_leaves_nothing_behind() {
    let fixture = TestFixture::new()
        .with_marker("R0001", "R0001-LOC01")
        .with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg");
    let output = fixture.path().join("out");

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.data_path())
        .arg(&output)
        .arg("--report-file")
        .arg(fixture.report_path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("copy error"));

    let exported: Vec<_> = std::fs::read_dir(output.join("R0001/R0001-LOC01"))
        .unwrap()
        .collect();
    assert!(exported.is_empty());
}

#[test]
fn test_prepare_deployment_selection() {
    let fixture = TestFixture::new()
        .with_marker("R0001", "R0001-LOC01")
        .with_media("R0001/R0001-LOC02/IMG_0001.JPG", b"jpeg");
    let output = fixture.path().join("out");

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.data_path())
        .arg(&output)
        .arg("R0001")
        .arg("--deployments")
        .arg("R0001-LOC01")
        .arg("--report-file")
        .arg(fixture.report_path())
        .assert()
        .success();

    assert!(!fixture.report().contains("R0001-LOC02"));
}

#[test]
fn test_prepare_missing_data_path() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg("prepare")
        .arg(fixture.path().join("missing"))
        .arg(fixture.path().join("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Data path not found"));
}
