//! Saving and displaying command reports.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use wildintel_tools::config::Settings;
use wildintel_tools::output::{Marker, OutputConfig};
use wildintel_tools::report::{Entry, Report};
use wildintel_tools::suggestions;

use super::Context;

/// Errors listed on the terminal before pointing at the report file.
const MAX_LISTED: usize = 20;

/// Write `report` to `report_file`, or to a new file in the report
/// directory when none is given, and return where it went.
pub fn save(
    report: &Report,
    report_file: Option<&Path>,
    ctx: &Context,
    settings: &Settings,
) -> Result<PathBuf> {
    let path = match report_file {
        Some(path) => {
            report
                .save(path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            path.to_path_buf()
        }
        None => {
            let store = ctx.report_store(settings);
            store.save(report).with_context(|| {
                format!("Failed to write report to {}", store.dir().display())
            })?
        }
    };
    log::info!("Report written to {}", path.display());
    Ok(path)
}

/// Save, print and judge a finished report.
///
/// Returns an error (exit code 1) when the report has errors.
pub fn finish(
    report: &Report,
    report_file: Option<&Path>,
    ctx: &Context,
    settings: &Settings,
) -> Result<()> {
    let path = save(report, report_file, ctx, settings)?;

    if !ctx.quiet {
        print_report(report, &ctx.output);
        println!(
            "{} Report saved to {}",
            ctx.output.marker(Marker::ReportFile),
            path.display()
        );
    }

    if report.is_failed() || report.is_partial() {
        return Err(suggestions::report_has_errors(
            &report.status().to_string(),
            report.error_count(),
            &path,
        ));
    }
    Ok(())
}

/// Print the errors, warnings and summary of `report`.
pub fn print_report(report: &Report, out: &OutputConfig) {
    print_entries("Errors", out.marker(Marker::Error), report.errors.iter());
    print_entries("Warnings", out.marker(Marker::Warning), report.warnings.iter());
    println!();
    println!(
        "{} {}",
        out.marker(Marker::for_status(report.status())),
        report.summary()
    );
}

fn print_entries<'a>(
    heading: &str,
    marker: &str,
    entries: impl Iterator<Item = (&'a String, &'a Vec<Entry>)>,
) {
    let flat: Vec<(&String, &Entry)> = entries
        .flat_map(|(id, list)| list.iter().map(move |entry| (id, entry)))
        .collect();
    if flat.is_empty() {
        return;
    }

    println!("\n{heading}:");
    for (id, entry) in flat.iter().take(MAX_LISTED) {
        match &entry.message {
            Some(message) => println!("  {marker} {id} [{}] {message}", entry.action),
            None => println!("  {marker} {id} [{}]", entry.action),
        }
    }
    if flat.len() > MAX_LISTED {
        println!("  ... and {} more", flat.len() - MAX_LISTED);
    }
}
