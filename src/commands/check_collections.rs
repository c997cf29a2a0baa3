//! # Check Collections Command Implementation
//!
//! This module implements the `check-collections` subcommand, which checks
//! that collection folders are named `RNNNN` and that their deployment
//! folders are named `<COLLECTION>-<LOCATION>[_<SUFFIX>]`.
//!
//! When the `[wildintel] locations` setting lists known location IDs, each
//! deployment's location must be one of them.
//!
//! This command is a read-only operation that does not modify any files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use wildintel_tools::collections::check_collections;
use wildintel_tools::output::Marker;

use super::{report_output, resolve_data_path, Context};

/// Check collection and deployment folder names
#[derive(Args, Debug)]
pub struct CheckCollectionsArgs {
    /// Directory containing the collection folders.
    ///
    /// Defaults to `data_dir` from the `[general]` settings section.
    #[arg(value_name = "DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Collections to check (all when omitted).
    #[arg(value_name = "COLLECTIONS")]
    pub collections: Vec<String>,

    /// Where to write the YAML report (a new file in the report directory
    /// by default).
    #[arg(long, value_name = "FILE")]
    pub report_file: Option<PathBuf>,
}

/// Execute the `check-collections` command.
pub fn execute(args: CheckCollectionsArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    let data_path = resolve_data_path(args.data_path, &settings)?;

    if !ctx.quiet {
        println!(
            "{} Checking names in {}",
            ctx.output.marker(Marker::Scan),
            data_path.display()
        );
    }

    let progress = ctx.progress();
    let report = check_collections(&data_path, &args.collections, &settings, progress.as_ref())?;

    report_output::finish(&report, args.report_file.as_deref(), ctx, &settings)
}
