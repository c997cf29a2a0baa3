//! # Test External Tools Command Implementation
//!
//! Checks that the programs the dataset commands shell out to can be run
//! with the current settings. Only ExifTool is needed: `check-deployments`
//! reads capture times with it and `prepare` writes XMP tags with it.

use anyhow::{Context as _, Result};

use wildintel_tools::metadata::ExifTool;
use wildintel_tools::output::Marker;

use super::Context;

/// Execute the `test-external-tools` command.
pub fn execute(ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    let exiftool = ExifTool::new(&settings.tools.exiftool);

    let version = exiftool.version().with_context(|| {
        format!("ExifTool is not available ({})", exiftool.program().display())
    })?;

    if !ctx.quiet {
        println!(
            "{} ExifTool {version} ({})",
            ctx.output.marker(Marker::Done),
            exiftool.program().display()
        );
    }
    Ok(())
}
