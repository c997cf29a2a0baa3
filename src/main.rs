//! # WildINTEL Tools CLI
//!
//! This is the binary entry point for the `wildintel-tools` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Handling top-level application errors and translating them into user-friendly
//!   output.
//!
//! The checks and the export live in the `wildintel_tools` library crate; the
//! binary adds settings resolution, progress bars and report output on top.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
