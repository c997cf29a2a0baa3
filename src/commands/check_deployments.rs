//! # Check Deployments Command Implementation
//!
//! This module implements the `check-deployments` subcommand, which checks
//! the media of every deployment listed in each collection's
//! `<COLLECTION>_FileTimestampLog.csv`:
//!
//! - **Chronological order**: files, walked in natural order, must not go
//!   back in time.
//! - **Deployment window**: the first and last capture must be within the
//!   tolerance of the declared start and end.
//!
//! Deployments that pass get a `.validated` marker, which `prepare` needs.
//! Capture times are read with ExifTool (`[tools] exiftool`).

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use wildintel_tools::deployments::{check_deployments, CheckOptions};
use wildintel_tools::metadata::ExifTool;
use wildintel_tools::output::Marker;

use super::{parse_extensions, report_output, resolve_data_path, Context};

/// Check deployment timestamps against the collection timestamp logs
#[derive(Args, Debug)]
pub struct CheckDeploymentsArgs {
    /// Directory containing the collection folders.
    ///
    /// Defaults to `data_dir` from the `[general]` settings section.
    #[arg(value_name = "DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Collections to check (all when omitted).
    #[arg(value_name = "COLLECTIONS")]
    pub collections: Vec<String>,

    /// Allowed clock drift around the declared start and end, in hours.
    #[arg(long, value_name = "HOURS")]
    pub tolerance_hours: Option<u32>,

    /// Media extensions to check, comma separated (e.g. `jpg,mp4`).
    #[arg(long, value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Check deployments again even if they were already validated.
    #[arg(long)]
    pub revalidate: bool,

    /// Where to write the YAML report (a new file in the report directory
    /// by default).
    #[arg(long, value_name = "FILE")]
    pub report_file: Option<PathBuf>,
}

/// Execute the `check-deployments` command.
pub fn execute(args: CheckDeploymentsArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    let data_path = resolve_data_path(args.data_path, &settings)?;

    let mut options = CheckOptions::from_settings(&settings)?;
    if let Some(hours) = args.tolerance_hours {
        options.tolerance_hours = hours;
    }
    if !args.extensions.is_empty() {
        options.extensions = parse_extensions(&args.extensions)?;
    }
    options.revalidate = args.revalidate;

    if !ctx.quiet {
        println!(
            "{} Checking deployments in {} (tolerance ±{}h)",
            ctx.output.marker(Marker::Scan),
            data_path.display(),
            options.tolerance_hours
        );
    }

    let exiftool = ExifTool::new(&settings.tools.exiftool);
    let progress = ctx.progress();
    let report = check_deployments(
        &data_path,
        &args.collections,
        &options,
        &exiftool,
        progress.as_ref(),
    )?;

    report_output::finish(&report, args.report_file.as_deref(), ctx, &settings)
}
