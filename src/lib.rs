//! # WildINTEL Tools Library
//!
//! This library provides the checks and the export pipeline behind the
//! `wildintel-tools` command-line tool, which prepares camera-trap datasets
//! for upload to the Trapper cataloguing platform.
//!
//! ## Quick Example
//!
//! ```
//! use wildintel_tools::naming::{check_deployment_name, NameIssue};
//! use wildintel_tools::report::Report;
//!
//! assert!(check_deployment_name("R0001", "R0001-LOC01_b", &[]).is_ok());
//! assert_eq!(
//!     check_deployment_name("R0001", "LOC01", &[]),
//!     Err(NameIssue::BadFormat)
//! );
//!
//! let mut report = Report::new("example");
//! report.add_success("R0001", "validate_collection_names", None);
//! report.finish();
//! assert!(report.is_success());
//! ```
//!
//! ## Core Concepts
//!
//! - **Dataset layout (`dataset`, `naming`)**: collections (`R0001`) hold
//!   deployments (`R0001-LOC01`) which hold media files.
//! - **Timestamp log (`timestamp_log`)**: each collection declares when its
//!   cameras were deployed and retrieved.
//! - **Metadata (`metadata`, `imaging`)**: capture times are read and XMP tags
//!   written through traits, implemented by ExifTool and the `image` crate.
//! - **Reports (`report`, `report_store`)**: every command records
//!   successes, warnings and errors per collection, deployment or file, and
//!   saves them to a report directory that can be listed and archived.
//!
//! ## Commands
//!
//! 1.  **Name check** ([`collections::check_collections`]): folder names
//!     follow the conventions.
//! 2.  **Content check** ([`deployments::check_deployments`]): captures are
//!     in order and within the declared deployment window; passing
//!     deployments get a `.validated` marker.
//! 3.  **Export** ([`prepare::prepare_collections`]): validated deployments
//!     are flattened, downscaled and tagged for Trapper.

pub mod collections;
pub mod config;
pub mod dataset;
pub mod defaults;
pub mod deployments;
pub mod error;
pub mod hashing;
pub mod imaging;
pub mod media;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod prepare;
pub mod progress;
pub mod report;
pub mod report_store;
pub mod suggestions;
pub mod timestamp_log;

#[cfg(test)]
mod naming_proptest;
