//! # Name Check
//!
//! Verifies that collection folders follow the `RNNNN` convention and that
//! every non-empty deployment folder inside them is named
//! `<COLLECTION>-<LOCATION>[_<SUFFIX>]`, with the collection prefix matching
//! its parent folder and, when a list of known locations is configured, a
//! location from that list.

use std::path::Path;

use crate::config::Settings;
use crate::dataset::{self, dir_name};
use crate::error::Result;
use crate::naming::{check_deployment_name, is_valid_collection_name};
use crate::progress::Progress;
use crate::report::Report;

/// Title of the report produced by [`check_collections`].
pub const REPORT_TITLE: &str = "Validate collection and deployments names";

pub const ACTION_COLLECTION_NAMES: &str = "validate_collection_names";
pub const ACTION_DEPLOYMENT_NAMES: &str = "validate_deployment_names";

/// Check the names of the selected collections and their deployments.
///
/// An empty `collections` selects every collection under `data_path`.
/// Empty deployment folders are skipped.
pub fn check_collections<S: AsRef<str>>(
    data_path: &Path,
    collections: &[S],
    settings: &Settings,
    progress: &dyn Progress,
) -> Result<Report> {
    let mut report = Report::new(REPORT_TITLE);
    let known_locations = &settings.wildintel.locations;

    for collection_path in dataset::list_collections(data_path, collections)? {
        let collection = dir_name(&collection_path);
        let deployments = dataset::list_deployments::<&str>(&collection_path, &[])?;
        log::info!(
            "Checking names in collection {collection} ({} deployments)",
            deployments.len()
        );
        progress.collection_start(&collection, deployments.len());

        if is_valid_collection_name(&collection) {
            report.add_success(&collection, ACTION_COLLECTION_NAMES, None);
        } else {
            report.add_error(
                &collection,
                ACTION_COLLECTION_NAMES,
                format!("Collection name '{collection}' does not follow the RNNNN format."),
            );
        }

        for deployment_path in deployments {
            let deployment = dir_name(&deployment_path);
            if dataset::is_empty_dir(&deployment_path)? {
                log::debug!("Skipping empty deployment {deployment}");
            } else {
                match check_deployment_name(&collection, &deployment, known_locations) {
                    Ok(_) => report.add_success(&deployment, ACTION_DEPLOYMENT_NAMES, None),
                    Err(issue) => {
                        log::debug!("Deployment {deployment}: {issue}");
                        report.add_error(&deployment, ACTION_DEPLOYMENT_NAMES, issue.to_string())
                    }
                }
            }
            progress.deployment_done(&collection, &deployment);
        }

        progress.collection_done(&collection);
    }

    report.finish();
    Ok(report)
}
