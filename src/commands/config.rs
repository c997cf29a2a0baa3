//! # Config Command Implementation
//!
//! Manages the per-project settings file:
//!
//! - `config init` writes the defaults (refusing to overwrite unless
//!   `--force` is given);
//! - `config show` prints the settings in effect as TOML;
//! - `config path` prints where the settings file lives.

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};

use wildintel_tools::config::Settings;
use wildintel_tools::output::Marker;

use super::Context;

/// Manage the settings file
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a settings file with the default values
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },
    /// Print the settings in effect
    Show,
    /// Print the settings file location
    Path,
}

/// Execute the `config` command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Init { force } => init(ctx, force),
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => {
            println!("{}", ctx.settings_path.display());
            Ok(())
        }
    }
}

fn init(ctx: &Context, force: bool) -> Result<()> {
    let path = &ctx.settings_path;
    if path.exists() && !force {
        bail!(
            "Settings file already exists: {}\n\n\
             hint: Use --force to overwrite it with the defaults",
            path.display()
        );
    }

    Settings::default()
        .save(path)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    if !ctx.quiet {
        println!(
            "{} Wrote default settings to {}",
            ctx.output.marker(Marker::Done),
            path.display()
        );
    }
    Ok(())
}

fn show(ctx: &Context) -> Result<()> {
    let settings = ctx.load_settings()?;
    if !ctx.settings_path.exists() {
        log::info!(
            "{} does not exist, showing defaults",
            ctx.settings_path.display()
        );
    }
    print!("{}", settings.to_toml()?);
    Ok(())
}
