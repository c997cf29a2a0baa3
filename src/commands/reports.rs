//! # Reports Command Implementation
//!
//! Works on the report directory the dataset commands save into:
//!
//! - `reports list` shows the saved reports, newest first;
//! - `reports info [FILE]...` displays one report (the latest by default), or
//!   several merged into one;
//! - `reports archive [DAYS]` hides reports older than `DAYS` days;
//! - `reports remove` deletes archived reports after confirmation.

use anyhow::{bail, Context as _, Result};
use chrono::{DateTime, Local};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

use wildintel_tools::report::Report;
use wildintel_tools::report_store::{ReportStore, StoredReport};

use super::{report_output, Context};

/// Reports older than this many days are archived by default.
const DEFAULT_ARCHIVE_DAYS: u32 = 60;

/// Manage saved reports
#[derive(Args, Debug)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List saved reports, newest first
    List,
    /// Show a saved report
    Info {
        /// Report file names in the report directory (the latest report
        /// when omitted). Several reports are merged into one.
        #[arg(value_name = "FILE")]
        files: Vec<String>,
    },
    /// Archive reports older than a number of days
    Archive {
        /// Age in days after which a report is archived
        #[arg(value_name = "DAYS", default_value_t = DEFAULT_ARCHIVE_DAYS)]
        days: u32,
    },
    /// Delete archived reports
    Remove {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute the `reports` command.
pub fn execute(args: ReportsArgs, ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    let store = ctx.report_store(&settings);
    log::debug!("Using report directory {}", store.dir().display());

    match args.command {
        ReportsCommand::List => list(&store),
        ReportsCommand::Info { files } => info(&store, &files, ctx),
        ReportsCommand::Archive { days } => archive(&store, days, ctx),
        ReportsCommand::Remove { yes } => remove(&store, yes, ctx),
    }
}

fn list(store: &ReportStore) -> Result<()> {
    let reports = store.list()?;
    if reports.is_empty() {
        println!("No reports in {}", store.dir().display());
        return Ok(());
    }

    println!("Reports in {}:", store.dir().display());
    for stored in &reports {
        let description = match Report::load(&stored.path) {
            Ok(report) => format!("{} ({})", report.title, report.status()),
            Err(e) => {
                log::warn!("Cannot read {}: {e}", stored.path.display());
                "unreadable".to_string()
            }
        };
        println!(
            "  {}  {}  {description}",
            modified(stored),
            stored.file_name()
        );
    }
    Ok(())
}

fn info(store: &ReportStore, files: &[String], ctx: &Context) -> Result<()> {
    let paths = if files.is_empty() {
        let latest = store
            .latest()?
            .with_context(|| format!("No reports found in {}", store.dir().display()))?;
        vec![latest.path]
    } else {
        files
            .iter()
            .map(|name| store.resolve(name))
            .collect::<wildintel_tools::error::Result<Vec<_>>>()?
    };

    let mut loaded = paths.iter().map(|path| {
        Report::load(path).with_context(|| format!("Failed to read report {}", path.display()))
    });
    let Some(first) = loaded.next() else {
        return Ok(());
    };
    let mut report = first?;
    for next in loaded {
        report.extend(next?);
    }

    for path in &paths {
        println!("{}", path.display());
    }
    report_output::print_report(&report, &ctx.output);
    Ok(())
}

fn archive(store: &ReportStore, days: u32, ctx: &Context) -> Result<()> {
    let archived = store.archive(days)?;
    if !ctx.quiet {
        println!("{} files archived", archived.len());
    }
    Ok(())
}

fn remove(store: &ReportStore, yes: bool, ctx: &Context) -> Result<()> {
    let archived = store.archived()?;
    if archived.is_empty() {
        if !ctx.quiet {
            println!("No archived reports found");
        }
        return Ok(());
    }

    println!("The following files will be deleted:");
    for stored in &archived {
        println!("  {}", stored.file_name());
    }

    if !yes {
        if !console::Term::stderr().is_term() {
            bail!(
                "Refusing to delete without confirmation\n\n\
                 hint: Use --yes to delete archived reports"
            );
        }
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Do you want to proceed?")
            .default(false)
            .interact()?;
        if !proceed {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    for stored in store.remove_archived()? {
        println!("Deleted: {}", stored.file_name());
    }
    Ok(())
}

fn modified(stored: &StoredReport) -> String {
    DateTime::<Local>::from(stored.modified)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
