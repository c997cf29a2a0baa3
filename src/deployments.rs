//! # Content Check
//!
//! Validates the media of each deployment against the collection's
//! timestamp log:
//!
//! - files must be in chronological order when walked in natural order;
//! - the first and last capture must fall within `tolerance_hours` of the
//!   declared deployment start and end.
//!
//! A deployment that passes gets a hidden `.validated` marker holding a
//! combined SHA-1 of its files, which `prepare` requires before exporting
//! it. Deployments that already carry a marker are not checked again unless
//! revalidation is requested.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::dataset::{self, dir_name};
use crate::error::Result;
use crate::hashing::{content_hash, CombinedHash};
use crate::media::Extension;
use crate::metadata::MetadataReader;
use crate::progress::Progress;
use crate::report::Report;
use crate::timestamp_log::{ExpectedDeployment, TimestampLog};

/// Title of the report produced by [`check_deployments`].
pub const REPORT_TITLE: &str = "Validating deployments";

pub const ACTION_TIMESTAMP_LOG: &str = "check filetimestamplog";
pub const ACTION_MISSING_DEPLOYMENT: &str = "missing deployment";
pub const ACTION_UNLISTED_DEPLOYMENT: &str = "unlisted deployment";
pub const ACTION_GATHER_METADATA: &str = "gather_metadata";
pub const ACTION_MISSING_TIMESTAMP: &str = "missing timestamp";
pub const ACTION_DATE_ORDER: &str = "date order";
pub const ACTION_START_DATE: &str = "deployment start date";
pub const ACTION_END_DATE: &str = "deployment end date";
pub const ACTION_EMPTY_DEPLOYMENT: &str = "empty deployment";
pub const ACTION_NO_TIMESTAMPS: &str = "no timestamps";
pub const ACTION_VALIDATED: &str = "deployment validated";
pub const ACTION_RECORD_ERROR: &str = "validation record error";
pub const ACTION_MARKER_REMOVED: &str = "validation withdrawn";

/// Parameters of the content check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Media types to validate; other files are ignored.
    pub extensions: Vec<Extension>,
    /// Allowed drift around the declared start and end, in hours.
    pub tolerance_hours: u32,
    /// Check deployments again even if they carry a marker.
    pub revalidate: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            extensions: Extension::all().to_vec(),
            tolerance_hours: crate::config::DEFAULT_TOLERANCE_HOURS,
            revalidate: false,
        }
    }
}

impl CheckOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            extensions: settings.extensions()?,
            tolerance_hours: settings.wildintel.tolerance_hours,
            revalidate: false,
        })
    }
}

/// Contents of a deployment's `.validated` marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMarker {
    /// Local time of validation, ISO 8601.
    pub validated_at: String,
    pub collection: String,
    pub deployment: String,
    /// Combined SHA-1 of the validated files, in order.
    pub hash: String,
    /// Number of files that went into `hash`.
    #[serde(default)]
    pub files: usize,
}

impl ValidationMarker {
    pub const FILE_NAME: &'static str = ".validated";

    pub fn path(deployment_path: &Path) -> PathBuf {
        deployment_path.join(Self::FILE_NAME)
    }

    pub fn exists(deployment_path: &Path) -> bool {
        Self::path(deployment_path).is_file()
    }

    pub fn read(deployment_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(Self::path(deployment_path))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn write(&self, deployment_path: &Path) -> Result<()> {
        fs::write(Self::path(deployment_path), serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn remove(deployment_path: &Path) -> Result<()> {
        fs::remove_file(Self::path(deployment_path))?;
        Ok(())
    }
}

/// Result of validating one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentOutcome {
    /// All checks passed and the marker was written.
    Validated(ValidationMarker),
    /// Nothing was wrong, but there was nothing to validate either.
    Warning,
    /// At least one error was recorded.
    Failed,
}

/// Check the content of every deployment listed in the timestamp logs of
/// the selected collections.
pub fn check_deployments<S: AsRef<str>>(
    data_path: &Path,
    collections: &[S],
    options: &CheckOptions,
    reader: &dyn MetadataReader,
    progress: &dyn Progress,
) -> Result<Report> {
    let mut report = Report::new(REPORT_TITLE);

    for collection_path in dataset::list_collections(data_path, collections)? {
        check_collection(&collection_path, options, reader, progress, &mut report)?;
    }

    report.finish();
    Ok(report)
}

fn check_collection(
    collection_path: &Path,
    options: &CheckOptions,
    reader: &dyn MetadataReader,
    progress: &dyn Progress,
    report: &mut Report,
) -> Result<()> {
    let collection = dir_name(collection_path);
    let log_path = TimestampLog::path_for(collection_path, &collection);

    if !log_path.is_file() {
        log::warn!("Skipping {collection}: no timestamp log");
        report.add_error(
            &collection,
            ACTION_TIMESTAMP_LOG,
            format!(
                "No FileTimestampLog {} found in {}",
                TimestampLog::file_name(&collection),
                collection_path.display()
            ),
        );
        return Ok(());
    }

    let expected = match TimestampLog::read(&log_path) {
        Ok(expected) => expected,
        Err(e) => {
            log::warn!("Skipping {collection}: {e}");
            report.add_error(&collection, ACTION_TIMESTAMP_LOG, e.to_string());
            return Ok(());
        }
    };

    log::info!(
        "Checking collection {collection} ({} deployments in log)",
        expected.len()
    );
    progress.collection_start(&collection, expected.len());

    for deployment in &expected {
        let deployment_path = collection_path.join(&deployment.name);

        if !deployment_path.is_dir() {
            report.add_error(
                &collection,
                ACTION_MISSING_DEPLOYMENT,
                format!(
                    "Deployment folder '{}' not found in {}",
                    deployment.name,
                    collection_path.display()
                ),
            );
        } else if ValidationMarker::exists(&deployment_path) && !options.revalidate {
            let message = match ValidationMarker::read(&deployment_path) {
                Ok(marker) => format!("previously validated at {}", marker.validated_at),
                Err(e) => {
                    log::warn!("Unreadable marker in {}: {e}", deployment_path.display());
                    "previously validated".to_string()
                }
            };
            log::info!("Skipping {}: {message}", deployment.name);
            report.add_success(&deployment.name, ACTION_VALIDATED, Some(message));
        } else {
            validate_deployment(
                &collection,
                deployment,
                &deployment_path,
                options,
                reader,
                progress,
                report,
            )?;
        }

        progress.deployment_done(&collection, &deployment.name);
    }

    for on_disk in dataset::list_deployments::<&str>(collection_path, &[])? {
        let name = dir_name(&on_disk);
        if !expected.iter().any(|d| d.name == name) {
            report.add_warning(
                &name,
                ACTION_UNLISTED_DEPLOYMENT,
                format!(
                    "Deployment folder '{name}' is not listed in {}",
                    TimestampLog::file_name(&collection)
                ),
            );
        }
    }

    progress.collection_done(&collection);
    Ok(())
}

/// A capture accepted into the chronological sequence.
struct Capture {
    taken: NaiveDateTime,
    path: PathBuf,
}

/// Running state of the walk over one deployment's files.
#[derive(Default)]
struct Sequence {
    failed: bool,
    hash: CombinedHash,
    first: Option<Capture>,
    previous: Option<Capture>,
}

impl Sequence {
    /// Check one file, in position `idx` (1-based) of the listing.
    fn check_file(
        &mut self,
        idx: usize,
        path: &Path,
        reader: &dyn MetadataReader,
        report: &mut Report,
    ) {
        let id = path.display().to_string();

        let metadata = match reader.read(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                self.failed = true;
                report.add_error(&id, ACTION_GATHER_METADATA, format!("Failed to process image: {e}"));
                return;
            }
        };

        match (metadata.date_taken, &self.previous) {
            (None, _) => {
                report.add_warning(
                    &id,
                    ACTION_MISSING_TIMESTAMP,
                    format!("Image '{}' (order {idx}) has no capture timestamp.", file_name(path)),
                );
            }
            (Some(taken), Some(prev)) if taken < prev.taken => {
                self.failed = true;
                report.add_error(
                    &id,
                    ACTION_DATE_ORDER,
                    format!(
                        "Image '{}' (order {idx}) has earlier date than previous image {}.",
                        file_name(path),
                        prev.path.display()
                    ),
                );
                return;
            }
            _ => {}
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.failed = true;
                report.add_error(&id, ACTION_GATHER_METADATA, format!("Failed to process image: {e}"));
                return;
            }
        };
        self.hash.update(&content_hash(&bytes));
        log::debug!("{id}: {:?}", metadata.date_taken);

        if let Some(taken) = metadata.date_taken {
            if self.first.is_none() {
                self.first = Some(Capture {
                    taken,
                    path: path.to_path_buf(),
                });
            }
            self.previous = Some(Capture {
                taken,
                path: path.to_path_buf(),
            });
        }
    }
}

/// Validate the media of one deployment and, when everything checks out,
/// write its marker.
///
/// A deployment that does not end up validated loses any marker an earlier
/// run left behind, so `prepare` no longer exports it.
///
/// Problems are recorded in `report`; only failures to list the deployment
/// itself are returned as errors.
pub fn validate_deployment(
    collection: &str,
    expected: &ExpectedDeployment,
    deployment_path: &Path,
    options: &CheckOptions,
    reader: &dyn MetadataReader,
    progress: &dyn Progress,
    report: &mut Report,
) -> Result<DeploymentOutcome> {
    let outcome = check_content(
        collection,
        expected,
        deployment_path,
        options,
        reader,
        progress,
        report,
    )?;
    if !matches!(outcome, DeploymentOutcome::Validated(_)) {
        withdraw_marker(&expected.name, deployment_path, report);
    }
    Ok(outcome)
}

fn check_content(
    collection: &str,
    expected: &ExpectedDeployment,
    deployment_path: &Path,
    options: &CheckOptions,
    reader: &dyn MetadataReader,
    progress: &dyn Progress,
    report: &mut Report,
) -> Result<DeploymentOutcome> {
    let name = expected.name.as_str();
    let files = dataset::media_files(deployment_path, &options.extensions)?;
    log::info!("Validating deployment {name} ({} files)", files.len());
    progress.deployment_start(collection, name, files.len());

    let mut sequence = Sequence::default();
    for (idx, path) in files.iter().enumerate() {
        sequence.check_file(idx + 1, path, reader, report);
        progress.file_done(collection, name);
    }
    let Sequence {
        mut failed,
        hash,
        first,
        previous,
    } = sequence;

    if let (Some(first), Some(last)) = (&first, &previous) {
        let tolerance = Duration::hours(i64::from(options.tolerance_hours));

        if !within(first.taken, expected.expected_start, tolerance) {
            failed = true;
            report.add_error(
                name,
                ACTION_START_DATE,
                format!(
                    "First image '{}' date {} is outside expected start {} ±{}h",
                    file_name(&first.path),
                    first.taken,
                    expected.expected_start,
                    options.tolerance_hours
                ),
            );
        }
        if !within(last.taken, expected.expected_end, tolerance) {
            failed = true;
            report.add_error(
                name,
                ACTION_END_DATE,
                format!(
                    "Last image '{}' date {} is outside expected end {} ±{}h",
                    file_name(&last.path),
                    last.taken,
                    expected.expected_end,
                    options.tolerance_hours
                ),
            );
        }
    }

    if failed {
        log::info!("Deployment {name} failed validation");
        return Ok(DeploymentOutcome::Failed);
    }

    if files.is_empty() {
        report.add_warning(
            name,
            ACTION_EMPTY_DEPLOYMENT,
            format!("Deployment '{name}' has no media files"),
        );
        return Ok(DeploymentOutcome::Warning);
    }

    if previous.is_none() {
        report.add_warning(
            name,
            ACTION_NO_TIMESTAMPS,
            format!("No media file in deployment '{name}' has a capture timestamp"),
        );
        return Ok(DeploymentOutcome::Warning);
    }

    let marker = ValidationMarker {
        validated_at: Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S%.6f")
            .to_string(),
        collection: collection.to_string(),
        deployment: name.to_string(),
        files: hash.count(),
        hash: hash.finalize(),
    };

    match marker.write(deployment_path) {
        Ok(()) => {
            report.add_success(
                name,
                ACTION_VALIDATED,
                Some(format!(
                    "Deployment '{name}' validated successfully at {}",
                    marker.validated_at
                )),
            );
            Ok(DeploymentOutcome::Validated(marker))
        }
        Err(e) => {
            report.add_error(
                name,
                ACTION_RECORD_ERROR,
                format!("Failed to create .validated file for deployment {name}: {e}"),
            );
            Ok(DeploymentOutcome::Failed)
        }
    }
}

/// Drop the marker of a deployment that no longer validates.
fn withdraw_marker(name: &str, deployment_path: &Path, report: &mut Report) {
    if !ValidationMarker::exists(deployment_path) {
        return;
    }
    match ValidationMarker::remove(deployment_path) {
        Ok(()) => {
            log::info!("Removed marker of {name}: it no longer validates");
            report.add_warning(
                name,
                ACTION_MARKER_REMOVED,
                format!("Deployment '{name}' no longer validates, its .validated file was removed"),
            );
        }
        Err(e) => report.add_error(
            name,
            ACTION_RECORD_ERROR,
            format!("Failed to remove .validated file for deployment {name}: {e}"),
        ),
    }
}

/// `value` within `[target - tolerance, target + tolerance]`. A bound that
/// falls outside the representable range leaves that side open.
fn within(value: NaiveDateTime, target: NaiveDateTime, tolerance: Duration) -> bool {
    let after_start = target
        .checked_sub_signed(tolerance)
        .map_or(true, |low| value >= low);
    let before_end = target
        .checked_add_signed(tolerance)
        .map_or(true, |high| value <= high);
    after_start && before_end
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
