//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a dataset fixture and helpers to run the binary
//! against it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_media("R0001/R0001-LOC01/IMG_0001.JPG", b"jpeg");
//!     fixture.dataset_command("check-collections").assert().success();
//! }
//! ```

use std::path::{Path, PathBuf};

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::settings;
    pub use super::TestFixture;
}

/// Settings files used across tests.
#[allow(dead_code)]
pub mod settings {
    /// Defaults, with an ExifTool that cannot be found so no test depends
    /// on the host having it installed.
    pub const DEFAULT: &str = r#"
[wildintel]
tolerance_hours = 1

[tools]
exiftool = "wildintel-test-missing-exiftool"
"#;

    /// Only `LOC01` and `LOC02` are known locations.
    pub const KNOWN_LOCATIONS: &str = r#"
[wildintel]
locations = ["LOC01", "LOC02"]

[tools]
exiftool = "wildintel-test-missing-exiftool"
"#;

    /// Not TOML.
    pub const INVALID: &str = "[wildintel\ntolerance_hours = ";
}

/// Marker contents for a deployment validated on 2024-06-01.
#[allow(dead_code)]
pub fn marker(collection: &str, deployment: &str) -> String {
    format!(
        "validated_at: 2024-06-01T10:00:00.000000\n\
         collection: {collection}\n\
         deployment: {deployment}\n\
         hash: da39a3ee5e6b4b0d3255bfef95601890afd80709\n\
         files: 0\n"
    )
}

/// A temporary directory holding a settings file (`settings.toml`), a
/// dataset root (`data/`) and room for reports and exports.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a fixture with the default test settings and an empty data
    /// root.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("data")
            .create_dir_all()
            .expect("Failed to create data directory");
        Self { temp_dir }.with_settings(settings::DEFAULT)
    }

    /// Replace the settings file.
    pub fn with_settings(self, content: &str) -> Self {
        self.temp_dir
            .child("settings.toml")
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Create an (empty) directory under the data root.
    pub fn with_dir(self, path: &str) -> Self {
        self.data_child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Add a media file under the data root.
    pub fn with_media(self, path: &str, content: &[u8]) -> Self {
        self.data_child(path)
            .write_binary(content)
            .expect("Failed to write media file");
        self
    }

    /// Add `<collection>_FileTimestampLog.csv` with the given data rows.
    pub fn with_timestamp_log(self, collection: &str, rows: &[&str]) -> Self {
        let mut content = String::from("Deployment,StartDate,StartTime,EndDate,EndTime\n");
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        self.data_child(&format!("{collection}/{collection}_FileTimestampLog.csv"))
            .write_str(&content)
            .expect("Failed to write timestamp log");
        self
    }

    /// Mark `<collection>/<deployment>` as validated.
    pub fn with_marker(self, collection: &str, deployment: &str) -> Self {
        self.data_child(&format!("{collection}/{deployment}/.validated"))
            .write_str(&marker(collection, deployment))
            .expect("Failed to write marker");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_path(&self) -> PathBuf {
        self.path().join("data")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path().join("settings.toml")
    }

    /// Report directory the binary is pointed at.
    pub fn report_dir(&self) -> PathBuf {
        self.path().join("reports")
    }

    /// Save a report titled `title` as `name` in the report directory, last
    /// modified `age_days` days ago.
    pub fn with_stored_report(self, name: &str, title: &str, age_days: u64) -> Self {
        let path = self.report_dir().join(name);
        let mut report = wildintel_tools::report::Report::new(title);
        report.add_success("R0001", "validate_collection_names", None);
        report.finish();
        report.save(&path).expect("Failed to write report");

        let modified = std::time::SystemTime::now()
            - std::time::Duration::from_secs(age_days * 24 * 60 * 60);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .and_then(|file| file.set_modified(modified))
            .expect("Failed to age report");
        self
    }

    /// Names of the files in the report directory, hidden ones included.
    pub fn stored_reports(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.report_dir())
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Where tests ask commands to write their report.
    pub fn report_path(&self) -> PathBuf {
        self.path().join("report.yaml")
    }

    /// Contents of the report written to [`TestFixture::report_path`].
    pub fn report(&self) -> String {
        std::fs::read_to_string(self.report_path()).expect("Failed to read report")
    }

    pub fn data_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("data").child(path)
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a command that runs in the fixture directory, reads the
    /// fixture settings, keeps reports in the fixture and prints without
    /// colors.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("wildintel-tools");
        cmd.current_dir(self.path())
            .env("WILDINTEL_CONFIG", self.settings_path())
            .env("WILDINTEL_REPORT_DIR", self.report_dir())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Like [`TestFixture::command`], with `subcommand`, the data root and
    /// `--report-file` already set.
    pub fn dataset_command(&self, subcommand: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg(subcommand)
            .arg(self.data_path())
            .arg("--report-file")
            .arg(self.report_path());
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new();
        assert!(fixture.data_path().is_dir());
        assert!(fixture.settings_path().is_file());
    }

    #[test]
    fn test_fixture_with_timestamp_log() {
        let fixture = TestFixture::new().with_timestamp_log(
            "R0001",
            &["R0001-LOC01,2024:05:01,10:00:00,2024:05:31,18:00:00"],
        );
        let log =
            std::fs::read_to_string(fixture.data_path().join("R0001/R0001_FileTimestampLog.csv"))
                .unwrap();
        assert!(log.starts_with("Deployment,StartDate"));
        assert!(log.contains("R0001-LOC01"));
    }

    #[test]
    fn test_settings_are_valid() {
        for content in [settings::DEFAULT, settings::KNOWN_LOCATIONS] {
            assert!(wildintel_tools::config::Settings::parse(content).is_ok());
        }
    }
}
