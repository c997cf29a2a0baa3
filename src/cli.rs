//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wildintel_tools::config::Settings;
use wildintel_tools::defaults::DEFAULT_PROJECT;
use wildintel_tools::output::OutputConfig;

use crate::commands::{self, Context};

/// WildINTEL Tools - Validate and prepare camera-trap collections for Trapper
#[derive(Parser, Debug)]
#[command(name = "wildintel-tools")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    /// Settings file to use instead of the project default
    #[arg(long, global = true, value_name = "FILE", env = "WILDINTEL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory reports are saved to and read from
    #[arg(long, global = true, value_name = "DIR", env = "WILDINTEL_REPORT_DIR")]
    report_dir: Option<PathBuf>,

    /// Project whose settings file is used
    #[arg(long, global = true, value_name = "NAME", default_value = DEFAULT_PROJECT)]
    project: String,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check collection and deployment folder names
    CheckCollections(commands::check_collections::CheckCollectionsArgs),

    /// Check deployment timestamps against the collection timestamp logs
    CheckDeployments(commands::check_deployments::CheckDeploymentsArgs),

    /// Export validated deployments for Trapper
    Prepare(commands::prepare::PrepareArgs),

    /// List, show and archive saved reports
    Reports(commands::reports::ReportsArgs),

    /// Check that ExifTool can be run
    TestExternalTools,

    /// Manage the settings file
    Config(commands::config::ConfigArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(self.log_level.as_str()),
        )
        .format_timestamp(None)
        .init();

        let explicit_settings = self.config.is_some();
        let settings_path = self
            .config
            .unwrap_or_else(|| Settings::default_path(&self.project));
        log::debug!("Using settings file {}", settings_path.display());

        let ctx = Context {
            output: OutputConfig::from_env_and_flag(&self.color),
            settings_path,
            explicit_settings,
            report_dir: self.report_dir,
            quiet: self.quiet,
        };

        match self.command {
            Commands::CheckCollections(args) => commands::check_collections::execute(args, &ctx),
            Commands::CheckDeployments(args) => commands::check_deployments::execute(args, &ctx),
            Commands::Prepare(args) => commands::prepare::execute(args, &ctx),
            Commands::Reports(args) => commands::reports::execute(args, &ctx),
            Commands::TestExternalTools => commands::test_external_tools::execute(&ctx),
            Commands::Config(args) => commands::config::execute(args, &ctx),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
