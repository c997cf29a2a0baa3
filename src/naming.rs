//! # Collection and Deployment Naming Rules
//!
//! Collections are top-level folders named `R` followed by four digits,
//! optionally followed by `_<suffix>` (e.g. `R0012` or `R0012_spring`).
//!
//! Deployments live inside a collection and are named
//! `<COLLECTION>-<LOCATION>[_<SUFFIX>]` (e.g. `R0012-donana07_b`). The
//! `<COLLECTION>` prefix must repeat the name of the folder that contains the
//! deployment, and when a list of known locations is configured the
//! `<LOCATION>` part must be one of them.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Regex for collection folder names.
pub const COLLECTION_PATTERN: &str = r"^R[0-9]{4}(_.+)?$";

/// Regex for deployment folder names.
pub const DEPLOYMENT_PATTERN: &str = r"^R[0-9]{4}-([0-9A-Za-z_-]+)(_.+)?$";

fn collection_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(COLLECTION_PATTERN).expect("collection pattern is valid"))
}

fn deployment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DEPLOYMENT_PATTERN).expect("deployment pattern is valid"))
}

/// Returns `true` if `name` is a valid collection folder name.
pub fn is_valid_collection_name(name: &str) -> bool {
    collection_regex().is_match(name)
}

/// Returns `true` if `name` is syntactically a valid deployment folder name.
///
/// This does not check the collection prefix against the parent folder; use
/// [`check_deployment_name`] for that.
pub fn is_valid_deployment_name(name: &str) -> bool {
    deployment_regex().is_match(name)
}

/// The parts of a deployment folder name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentName {
    /// Text before the first `-`, e.g. `R0012`.
    pub collection: String,
    /// The location identifier, e.g. `donana07`.
    pub location: String,
    /// Optional suffix after the location, without the leading `_`.
    pub suffix: Option<String>,
}

impl DeploymentName {
    /// Split a deployment name into collection, location and suffix.
    ///
    /// Returns `None` when the name has no `-` separator. The name is not
    /// otherwise validated.
    pub fn parse(name: &str) -> Option<Self> {
        let (collection, rest) = name.split_once('-')?;
        let (location, suffix) = match rest.split_once('_') {
            Some((location, suffix)) => (location, Some(suffix.to_string())),
            None => (rest, None),
        };
        Some(Self {
            collection: collection.to_string(),
            location: location.to_string(),
            suffix,
        })
    }

    /// The location, lowercased for comparison against known location IDs.
    pub fn location_id(&self) -> String {
        self.location.to_lowercase()
    }
}

/// Why a deployment name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameIssue {
    /// The name does not match [`DEPLOYMENT_PATTERN`].
    BadFormat,
    /// The collection prefix differs from the containing collection folder.
    CollectionMismatch { prefix: String, collection: String },
    /// The location is not in the configured list of known locations.
    UnknownLocation(String),
}

impl fmt::Display for NameIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameIssue::BadFormat => write!(
                f,
                "Name format is incorrect. It should follow the <CODE>-<NAME>_<SUFFIX> format."
            ),
            NameIssue::CollectionMismatch { prefix, collection } => write!(
                f,
                "Deployment collection prefix ({prefix}) does not match collection folder name '{collection}'."
            ),
            NameIssue::UnknownLocation(location) => write!(
                f,
                "The deployment name must include a valid location id, not '{location}'."
            ),
        }
    }
}

/// Check a deployment folder name against the rules for `collection`.
///
/// Rules are applied in order and the first failing one is returned:
/// format, collection prefix, then (only when `known_locations` is
/// non-empty) location membership. `known_locations` entries are compared
/// case-insensitively.
pub fn check_deployment_name(
    collection: &str,
    deployment: &str,
    known_locations: &[String],
) -> Result<DeploymentName, NameIssue> {
    if !is_valid_deployment_name(deployment) {
        return Err(NameIssue::BadFormat);
    }
    let parsed = DeploymentName::parse(deployment).ok_or(NameIssue::BadFormat)?;

    if parsed.collection != collection {
        return Err(NameIssue::CollectionMismatch {
            prefix: parsed.collection,
            collection: collection.to_string(),
        });
    }

    if !known_locations.is_empty() {
        let location = parsed.location_id();
        if !known_locations
            .iter()
            .any(|known| known.to_lowercase() == location)
        {
            return Err(NameIssue::UnknownLocation(location));
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert!(is_valid_collection_name("R0001"));
        assert!(is_valid_collection_name("R0001_spring"));
        assert!(!is_valid_collection_name("R001"));
        assert!(!is_valid_collection_name("r0001"));
        assert!(!is_valid_collection_name("R00012"));
        assert!(!is_valid_collection_name("R0001_"));
        assert!(!is_valid_collection_name("X0001"));
    }

    #[test]
    fn test_deployment_names() {
        assert!(is_valid_deployment_name("R0001-LOC01"));
        assert!(is_valid_deployment_name("R0001-loc-01_b"));
        assert!(!is_valid_deployment_name("R0001"));
        assert!(!is_valid_deployment_name("R0001-"));
        assert!(!is_valid_deployment_name("LOC01-R0001"));
        assert!(!is_valid_deployment_name("R0001-LOC 01"));
    }

    #[test]
    fn test_parse_deployment_name() {
        let parsed = DeploymentName::parse("R0001-Loc07_second").unwrap();
        assert_eq!(parsed.collection, "R0001");
        assert_eq!(parsed.location, "Loc07");
        assert_eq!(parsed.suffix.as_deref(), Some("second"));
        assert_eq!(parsed.location_id(), "loc07");

        let parsed = DeploymentName::parse("R0001-Loc07").unwrap();
        assert_eq!(parsed.suffix, None);

        assert!(DeploymentName::parse("R0001").is_none());
    }

    #[test]
    fn test_check_deployment_name_ok() {
        let parsed = check_deployment_name("R0001", "R0001-LOC01", &[]).unwrap();
        assert_eq!(parsed.location, "LOC01");
    }

    #[test]
    fn test_check_deployment_name_bad_format() {
        assert_eq!(
            check_deployment_name("R0001", "camera-1", &[]),
            Err(NameIssue::BadFormat)
        );
    }

    #[test]
    fn test_check_deployment_name_prefix_mismatch() {
        let issue = check_deployment_name("R0001", "R0002-LOC01", &[]).unwrap_err();
        assert_eq!(
            issue,
            NameIssue::CollectionMismatch {
                prefix: "R0002".to_string(),
                collection: "R0001".to_string(),
            }
        );
        assert!(issue.to_string().contains("R0002"));
        assert!(issue.to_string().contains("'R0001'"));
    }

    #[test]
    fn test_check_deployment_name_with_suffixed_collection() {
        // The prefix must repeat the folder name verbatim.
        assert!(matches!(
            check_deployment_name("R0001_spring", "R0001-LOC01", &[]),
            Err(NameIssue::CollectionMismatch { .. })
        ));
    }

    #[test]
    fn test_check_deployment_name_known_locations() {
        let known = vec!["loc01".to_string(), "LOC02".to_string()];
        assert!(check_deployment_name("R0001", "R0001-LOC01", &known).is_ok());
        assert!(check_deployment_name("R0001", "R0001-loc02_b", &known).is_ok());
        assert_eq!(
            check_deployment_name("R0001", "R0001-LOC03", &known),
            Err(NameIssue::UnknownLocation("loc03".to_string()))
        );
    }
}
