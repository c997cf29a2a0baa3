//! # Export for Trapper
//!
//! Flattens validated deployments into an upload-ready layout:
//!
//! ```text
//! out/R0001/R0001-LOC01/R0001-R0001-LOC01__20240501_0001.jpg
//! ```
//!
//! Each exported file is renamed after its collection, deployment, capture
//! day and position, downscaled when it is a wide still, and tagged with
//! XMP Dublin Core and XMP Rights metadata describing its origin and
//! licence.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDateTime};

use crate::config::Settings;
use crate::dataset::{self, dir_name};
use crate::deployments::ValidationMarker;
use crate::error::{Error, Result};
use crate::hashing::content_hash;
use crate::imaging::ImageResizer;
use crate::media::{mime_type, Extension, MediaKind};
use crate::metadata::{MediaMetadata, MetadataReader, MetadataWriter, XmpTags};
use crate::progress::Progress;
use crate::report::Report;

/// Title of the report produced by [`prepare_collections`].
pub const REPORT_TITLE: &str = "Preparing collections for Trapper";

pub const ACTION_NOT_VALIDATED: &str = "not validated";
pub const ACTION_COPY_ERROR: &str = "copy error";
pub const ACTION_EXPORTED: &str = "deployment exported";
pub const ACTION_EMPTY_DEPLOYMENT: &str = "empty deployment";

/// Licence statement embedded in every exported file.
pub const LICENSE_URL: &str = "https://creativecommons.org/licenses/by-nc/4.0/";

/// Project home page, cited in the coverage tag.
pub const PROJECT_URL: &str = "https://wildintel.eu/";

/// Descriptive values embedded in the XMP tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpInfo {
    pub rp_name: String,
    pub coverage: String,
    pub publisher: String,
    pub owner: String,
}

impl Default for XmpInfo {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl XmpInfo {
    pub fn from_settings(settings: &Settings) -> Self {
        let w = &settings.wildintel;
        Self {
            rp_name: w.rp_name.clone(),
            coverage: w.coverage.clone(),
            publisher: w.publisher.clone(),
            owner: w.owner.clone(),
        }
    }
}

/// Parameters of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareOptions {
    pub extensions: Vec<Extension>,
    /// Stills wider than this are downscaled.
    pub max_width: u32,
    /// Export deployments that have no `.validated` marker.
    pub include_unvalidated: bool,
    pub xmp: XmpInfo,
}

impl PrepareOptions {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            extensions: settings.extensions()?,
            max_width: settings.wildintel.max_width,
            include_unvalidated: false,
            xmp: XmpInfo::from_settings(settings),
        })
    }
}

/// Which collections and deployments to export. Empty lists select all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub collections: Vec<String>,
    pub deployments: Vec<String>,
}

/// The external collaborators used while exporting.
#[derive(Clone, Copy)]
pub struct MediaTools<'a> {
    pub reader: &'a dyn MetadataReader,
    pub writer: &'a dyn MetadataWriter,
    pub resizer: &'a dyn ImageResizer,
}

/// Export the selected deployments of the selected collections into
/// `output_dir`.
pub fn prepare_collections(
    data_path: &Path,
    output_dir: &Path,
    selection: &Selection,
    options: &PrepareOptions,
    tools: MediaTools<'_>,
    progress: &dyn Progress,
) -> Result<Report> {
    if !data_path.is_dir() {
        return Err(Error::DataPathNotFound {
            path: data_path.to_path_buf(),
        });
    }
    fs::create_dir_all(output_dir)?;

    let mut report = Report::new(REPORT_TITLE);

    for collection_path in dataset::list_collections(data_path, &selection.collections)? {
        let collection = dir_name(&collection_path);
        let collection_out = output_dir.join(&collection);
        fs::create_dir_all(&collection_out)?;

        let deployments = dataset::list_deployments(&collection_path, &selection.deployments)?;
        log::info!(
            "Exporting collection {collection} ({} deployments)",
            deployments.len()
        );
        progress.collection_start(&collection, deployments.len());

        for deployment_path in deployments {
            let deployment = dir_name(&deployment_path);
            if !ValidationMarker::exists(&deployment_path) && !options.include_unvalidated {
                log::warn!("Skipping unvalidated deployment {deployment}");
                report.add_error(
                    &deployment,
                    ACTION_NOT_VALIDATED,
                    format!("Deployment '{deployment}' has no .validated marker; run check-deployments first"),
                );
            } else {
                export_deployment(
                    &collection,
                    &deployment_path,
                    &collection_out.join(&deployment),
                    options,
                    tools,
                    progress,
                    &mut report,
                )?;
            }
            progress.deployment_done(&collection, &deployment);
        }

        progress.collection_done(&collection);
    }

    report.finish();
    Ok(report)
}

fn export_deployment(
    collection: &str,
    deployment_path: &Path,
    deployment_out: &Path,
    options: &PrepareOptions,
    tools: MediaTools<'_>,
    progress: &dyn Progress,
    report: &mut Report,
) -> Result<()> {
    let deployment = dir_name(deployment_path);
    let files = dataset::media_files(deployment_path, &options.extensions)?;
    fs::create_dir_all(deployment_out)?;
    log::info!("Exporting deployment {deployment} ({} files)", files.len());
    progress.deployment_start(collection, &deployment, files.len());

    let mut exported = 0;
    for (idx, path) in files.iter().enumerate().map(|(i, p)| (i + 1, p)) {
        match export_file(collection, &deployment, idx, path, deployment_out, options, tools) {
            Ok(target) => {
                log::debug!("{} -> {}", path.display(), target.display());
                exported += 1;
            }
            Err(e) => report.add_error(
                &deployment,
                ACTION_COPY_ERROR,
                format!("{}: {e}", path.display()),
            ),
        }
        progress.file_done(collection, &deployment);
    }

    if exported > 0 {
        report.add_success(&deployment, ACTION_EXPORTED, Some(format!("{exported} files")));
    } else if files.is_empty() {
        report.add_warning(
            &deployment,
            ACTION_EMPTY_DEPLOYMENT,
            format!("Deployment '{deployment}' has no media files"),
        );
    }
    Ok(())
}

/// Export one file; on failure nothing is left behind in the output.
fn export_file(
    collection: &str,
    deployment: &str,
    idx: usize,
    path: &Path,
    deployment_out: &Path,
    options: &PrepareOptions,
    tools: MediaTools<'_>,
) -> Result<PathBuf> {
    let original = fs::read(path)?;
    let source_hash = content_hash(&original);
    let mime = mime_type(path);
    let metadata = tools.reader.read(path)?;

    let is_image = Extension::from_path(path).map(Extension::kind) == Some(MediaKind::Image);
    let resized = if is_image {
        tools.resizer.resize(path, &original, options.max_width)?
    } else {
        None
    };
    let bytes = resized.as_deref().unwrap_or(original.as_slice());
    let identifier_hash = content_hash(bytes);

    let target = deployment_out.join(target_name(
        collection,
        deployment,
        metadata.date_taken,
        idx,
        path,
    ));

    let written = fs::write(&target, bytes).map_err(Error::from).and_then(|()| {
        let tags = build_tags(
            &metadata,
            &mime,
            &source_hash,
            &identifier_hash,
            &options.xmp,
            Local::now().year(),
        );
        tools.writer.write_tags(&target, &tags)
    });

    match written {
        Ok(()) => Ok(target),
        Err(e) => {
            if target.exists() {
                if let Err(remove_error) = fs::remove_file(&target) {
                    log::warn!("Could not remove {}: {remove_error}", target.display());
                }
            }
            Err(e)
        }
    }
}

/// Exported file name:
/// `<collection>-<deployment>__<YYYYMMDD|unknown_date>_<idx:04><.ext>`.
pub fn target_name(
    collection: &str,
    deployment: &str,
    date_taken: Option<NaiveDateTime>,
    idx: usize,
    source: &Path,
) -> String {
    let day = date_taken
        .map(|taken| taken.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "unknown_date".to_string());
    let extension = source
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    format!("{collection}-{deployment}__{day}_{idx:04}{extension}")
}

/// XMP tags for one exported file.
pub fn build_tags(
    metadata: &MediaMetadata,
    mime: &str,
    source_hash: &str,
    identifier_hash: &str,
    info: &XmpInfo,
    year: i32,
) -> XmpTags {
    let make = metadata.make.as_deref().unwrap_or("Unknown");
    let model = metadata.model.as_deref().unwrap_or("Unknown");
    let date = metadata
        .date_taken
        .map(|taken| taken.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default();

    let mut tags = XmpTags::new();
    tags.insert("XMP-dc:Creator", format!("CT ({make} {model} {})", info.rp_name));
    tags.insert("XMP-dc:Date", date);
    tags.insert("XMP-dc:Format", mime);
    tags.insert("XMP-dc:Identifier", format!("WildINTEL:{identifier_hash}"));
    tags.insert("XMP-dc:Source", format!("WildINTEL:{source_hash}"));
    tags.insert("XMP-dc:Publisher", info.publisher.as_str());
    tags.insert(
        "XMP-dc:Rights",
        format!("© {}, {year}. All rights reserved.", info.owner),
    );
    tags.insert(
        "XMP-dc:Coverage",
        format!(
            "This image was taken at {}, as part of the WildINTEL project. {PROJECT_URL}",
            info.coverage
        ),
    );
    tags.insert("XMP-xmpRights:Marked", "true");
    tags.insert("XMP-xmpRights:Owner", info.owner.as_str());
    tags.insert("XMP-xmpRights:WebStatement", LICENSE_URL);
    tags
}
