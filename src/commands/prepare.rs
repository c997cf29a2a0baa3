//! # Prepare Command Implementation
//!
//! This module implements the `prepare` subcommand, which exports validated
//! deployments into a flat layout ready for upload to Trapper:
//!
//! - files are renamed `<COLLECTION>-<DEPLOYMENT>__<YYYYMMDD>_<NNNN>.<ext>`;
//! - stills wider than `[wildintel] max_width` are downscaled;
//! - XMP Dublin Core and rights tags are written with ExifTool.
//!
//! Deployments without a `.validated` marker are reported and skipped
//! unless `--include-unvalidated` is given. The source data is never
//! modified.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use wildintel_tools::imaging::LanczosResizer;
use wildintel_tools::metadata::ExifTool;
use wildintel_tools::output::Marker;
use wildintel_tools::prepare::{prepare_collections, MediaTools, PrepareOptions, Selection};
use wildintel_tools::suggestions;

use super::{parse_extensions, report_output, Context};

/// Export validated deployments for Trapper
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Directory containing the collection folders.
    #[arg(value_name = "DATA_PATH")]
    pub data_path: PathBuf,

    /// Directory the flattened collections are written to.
    #[arg(value_name = "OUTPUT_PATH")]
    pub output_path: PathBuf,

    /// Collections to export (all when omitted).
    #[arg(value_name = "COLLECTIONS")]
    pub collections: Vec<String>,

    /// Deployments to export, comma separated (all when omitted).
    #[arg(long, value_name = "NAME", value_delimiter = ',')]
    pub deployments: Vec<String>,

    /// Media extensions to export, comma separated (e.g. `jpg,mp4`).
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Also export deployments that have not been validated.
    #[arg(long)]
    pub include_unvalidated: bool,

    /// Where to write the YAML report (a new file in the report directory
    /// by default).
    #[arg(long, value_name = "FILE")]
    pub report_file: Option<PathBuf>,
}

/// Execute the `prepare` command.
pub fn execute(args: PrepareArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    if !args.data_path.is_dir() {
        return Err(suggestions::data_path_not_found(&args.data_path));
    }

    let mut options = PrepareOptions::from_settings(&settings)?;
    if !args.extensions.is_empty() {
        options.extensions = parse_extensions(&args.extensions)?;
    }
    options.include_unvalidated = args.include_unvalidated;

    let selection = Selection {
        collections: args.collections,
        deployments: args.deployments,
    };

    if !ctx.quiet {
        println!(
            "{} Exporting {} to {}",
            ctx.output.marker(Marker::Export),
            args.data_path.display(),
            args.output_path.display()
        );
    }

    let exiftool = ExifTool::new(&settings.tools.exiftool);
    let tools = MediaTools {
        reader: &exiftool,
        writer: &exiftool,
        resizer: &LanczosResizer,
    };
    let progress = ctx.progress();
    let report = prepare_collections(
        &args.data_path,
        &args.output_path,
        &selection,
        &options,
        tools,
        progress.as_ref(),
    )?;

    report_output::finish(&report, args.report_file.as_deref(), ctx, &settings)
}
