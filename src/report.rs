//! # Run Reports
//!
//! Every command produces a [`Report`]: a record of what succeeded, what
//! failed and what looked suspicious, keyed by the identifier it concerns
//! (a collection, a deployment or a file path) and tagged with the action
//! that produced it (`validate_collection_names`, `date order`, ...).
//!
//! Reports are shown to the operator as a short summary and saved as YAML so
//! the full list of problems can be reviewed and shared.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Overall outcome of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Only successes were recorded.
    Success,
    /// Only errors were recorded.
    Failed,
    /// Both successes and errors were recorded.
    Partial,
    /// Nothing was recorded.
    Empty,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReportStatus::Success => "success",
            ReportStatus::Failed => "failed",
            ReportStatus::Partial => "partial",
            ReportStatus::Empty => "empty",
        };
        f.write_str(s)
    }
}

/// One recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

type Entries = BTreeMap<String, Vec<Entry>>;

/// Errors, warnings and successes of one command run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub start_time: DateTime<Local>,
    #[serde(default)]
    pub end_time: Option<DateTime<Local>>,
    #[serde(default)]
    pub errors: Entries,
    #[serde(default)]
    pub warnings: Entries,
    #[serde(default)]
    pub successes: Entries,
}

/// Entries of a report restricted to a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionView {
    pub errors: BTreeMap<String, Vec<Entry>>,
    pub warnings: BTreeMap<String, Vec<Entry>>,
    pub successes: BTreeMap<String, Vec<Entry>>,
}

impl Report {
    /// Start a new report; the start time is now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start_time: Local::now(),
            end_time: None,
            errors: BTreeMap::new(),
            warnings: BTreeMap::new(),
            successes: BTreeMap::new(),
        }
    }

    pub fn add_error(
        &mut self,
        identifier: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
    ) {
        push(&mut self.errors, identifier.into(), action.into(), Some(message.into()));
    }

    pub fn add_warning(
        &mut self,
        identifier: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
    ) {
        push(&mut self.warnings, identifier.into(), action.into(), Some(message.into()));
    }

    pub fn add_success(
        &mut self,
        identifier: impl Into<String>,
        action: impl Into<String>,
        message: Option<String>,
    ) {
        push(&mut self.successes, identifier.into(), action.into(), message);
    }

    /// Mark the report as finished.
    pub fn finish(&mut self) {
        self.end_time = Some(Local::now());
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    /// Merge `other` into this report.
    ///
    /// Entries are appended per identifier. The merged report spans from the
    /// earlier start to the later end; it stays unfinished only if both were.
    pub fn extend(&mut self, other: Report) {
        merge(&mut self.errors, other.errors);
        merge(&mut self.warnings, other.warnings);
        merge(&mut self.successes, other.successes);

        self.start_time = self.start_time.min(other.start_time);
        self.end_time = match (self.end_time, other.end_time) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Overall status. Warnings never affect it.
    pub fn status(&self) -> ReportStatus {
        let has_errors = self.error_count() > 0;
        let has_successes = self.success_count() > 0;

        match (has_errors, has_successes) {
            (false, true) => ReportStatus::Success,
            (true, false) => ReportStatus::Failed,
            (true, true) => ReportStatus::Partial,
            (false, false) => ReportStatus::Empty,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ReportStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status() == ReportStatus::Failed
    }

    pub fn is_partial(&self) -> bool {
        self.status() == ReportStatus::Partial
    }

    pub fn is_empty(&self) -> bool {
        self.status() == ReportStatus::Empty
    }

    pub fn error_count(&self) -> usize {
        count(&self.errors)
    }

    pub fn warning_count(&self) -> usize {
        count(&self.warnings)
    }

    pub fn success_count(&self) -> usize {
        count(&self.successes)
    }

    /// All entries recorded for `action`.
    pub fn by_action(&self, action: &str) -> ActionView {
        ActionView {
            errors: filter_action(&self.errors, action),
            warnings: filter_action(&self.warnings, action),
            successes: filter_action(&self.successes, action),
        }
    }

    /// Sorted, de-duplicated list of every action in the report.
    pub fn actions(&self) -> Vec<String> {
        let mut actions: Vec<String> = [&self.errors, &self.warnings, &self.successes]
            .into_iter()
            .flat_map(|entries| entries.values())
            .flatten()
            .filter(|entry| !entry.action.is_empty())
            .map(|entry| entry.action.clone())
            .collect();
        actions.sort();
        actions.dedup();
        actions
    }

    /// Duration in seconds, once finished.
    pub fn duration_secs(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64 / 1000.0)
    }

    /// Human-readable multi-line summary.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Report '{}'", self.title),
            format!("  Start: {}", self.start_time.format("%Y-%m-%d %H:%M:%S")),
            format!(
                "  End: {}",
                self.end_time
                    .map(|end| end.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| "in progress".to_string())
            ),
            format!("  Status: {}", self.status()),
        ];
        if let Some(duration) = self.duration_secs() {
            lines.push(format!("  Duration: {duration:.2}s"));
        }
        lines.push(format!("  Successes: {}", self.success_count()));
        lines.push(format!("  Warnings: {}", self.warning_count()));
        lines.push(format!("  Errors: {}", self.error_count()));
        lines.join("\n")
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the report as YAML to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn push(entries: &mut Entries, identifier: String, action: String, message: Option<String>) {
    entries
        .entry(identifier)
        .or_default()
        .push(Entry { action, message });
}

fn merge(into: &mut Entries, from: Entries) {
    for (identifier, list) in from {
        into.entry(identifier).or_default().extend(list);
    }
}

fn count(entries: &Entries) -> usize {
    entries.values().map(Vec::len).sum()
}

fn filter_action(entries: &Entries, action: &str) -> BTreeMap<String, Vec<Entry>> {
    entries
        .iter()
        .filter_map(|(identifier, list)| {
            let matching: Vec<Entry> = list
                .iter()
                .filter(|entry| entry.action == action)
                .cloned()
                .collect();
            (!matching.is_empty()).then(|| (identifier.clone(), matching))
        })
        .collect()
}
