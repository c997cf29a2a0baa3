//! # Report Directory
//!
//! Commands save their reports as YAML files in one directory (see
//! [`crate::defaults::default_report_dir`]). [`ReportStore`] lists, resolves
//! and ages those files:
//!
//! - visible `*.yaml` files are live reports;
//! - archiving renames a report with a leading dot, hiding it from listings;
//! - archived reports can then be removed for good.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::defaults::REPORT_PREFIX;
use crate::error::{Error, Result};
use crate::report::Report;

/// A report file found in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl StoredReport {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// The directory reports are saved to.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `report` under a new unique name and return its path.
    pub fn save(&self, report: &Report) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let file = tempfile::Builder::new()
            .prefix(REPORT_PREFIX)
            .suffix(".yaml")
            .tempfile_in(&self.dir)?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        report.save(&path)?;
        log::debug!("Saved report {}", path.display());
        Ok(path)
    }

    /// Live reports, newest first.
    pub fn list(&self) -> Result<Vec<StoredReport>> {
        self.scan(false)
    }

    /// Archived reports, newest first.
    pub fn archived(&self) -> Result<Vec<StoredReport>> {
        self.scan(true)
    }

    /// The most recently written live report.
    pub fn latest(&self) -> Result<Option<StoredReport>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Path of the report called `name` in the store.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::ReportNotFound { path })
        }
    }

    /// Hide every live report last written more than `days` days ago.
    ///
    /// Returns the reports that were archived, oldest first.
    pub fn archive(&self, days: u32) -> Result<Vec<StoredReport>> {
        let age = Duration::from_secs(u64::from(days) * 24 * 60 * 60);
        let threshold = SystemTime::now()
            .checked_sub(age)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut stale: Vec<StoredReport> = self
            .list()?
            .into_iter()
            .filter(|report| report.modified < threshold)
            .collect();
        stale.reverse();

        for report in &stale {
            let hidden = self.dir.join(format!(".{}", report.file_name()));
            fs::rename(&report.path, &hidden)?;
            log::info!("Archived report {}", report.file_name());
        }
        Ok(stale)
    }

    /// Delete every archived report and return what was deleted.
    pub fn remove_archived(&self) -> Result<Vec<StoredReport>> {
        let archived = self.archived()?;
        for report in &archived {
            fs::remove_file(&report.path)?;
            log::info!("Removed report {}", report.file_name());
        }
        Ok(archived)
    }

    fn scan(&self, hidden: bool) -> Result<Vec<StoredReport>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut reports = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') != hidden || !name.ends_with(".yaml") || !path.is_file() {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            reports.push(StoredReport { path, modified });
        }
        reports.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
        Ok(reports)
    }
}
