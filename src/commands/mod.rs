//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `wildintel-tools` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` plus the shared
//!   [`Context`] built from the global flags.
//!
//! The dataset commands delegate to the `wildintel_tools` library and hand
//! the resulting report to [`report_output`] for saving and display.

pub mod check_collections;
pub mod check_deployments;
pub mod completions;
pub mod config;
pub mod prepare;
pub mod progress_bars;
pub mod report_output;
pub mod reports;
pub mod test_external_tools;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use wildintel_tools::config::Settings;
use wildintel_tools::media::Extension;
use wildintel_tools::output::OutputConfig;
use wildintel_tools::progress::{NoProgress, Progress};
use wildintel_tools::report_store::ReportStore;
use wildintel_tools::suggestions;

use progress_bars::BarProgress;

/// Options shared by every subcommand, resolved from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputConfig,
    /// Settings file in effect (`--config`, `WILDINTEL_CONFIG` or the
    /// project default).
    pub settings_path: PathBuf,
    /// Whether `--config` / `WILDINTEL_CONFIG` named the file explicitly.
    pub explicit_settings: bool,
    /// `--report-dir` / `WILDINTEL_REPORT_DIR`, overriding the settings.
    pub report_dir: Option<PathBuf>,
    pub quiet: bool,
}

impl Context {
    /// Load the settings in effect.
    ///
    /// An explicitly named file must exist; the per-project default falls
    /// back to built-in defaults when it has not been created yet.
    pub fn load_settings(&self) -> Result<Settings> {
        if self.explicit_settings && !self.settings_path.exists() {
            return Err(suggestions::settings_not_found(&self.settings_path));
        }
        Settings::load_or_default(&self.settings_path)
            .with_context(|| format!("Failed to load settings from {}", self.settings_path.display()))
    }

    /// Report directory: the flag, then `[general] report_dir`, then the
    /// platform default.
    pub fn report_store(&self, settings: &Settings) -> ReportStore {
        ReportStore::new(
            self.report_dir
                .clone()
                .unwrap_or_else(|| settings.report_dir()),
        )
    }

    /// Progress reporting for the dataset commands; silent with `--quiet`.
    pub fn progress(&self) -> Box<dyn Progress> {
        if self.quiet {
            Box::new(NoProgress)
        } else {
            Box::new(BarProgress::default())
        }
    }
}

/// Data root from the command line, falling back to `[general] data_dir`.
pub fn resolve_data_path(arg: Option<PathBuf>, settings: &Settings) -> Result<PathBuf> {
    let path = arg
        .or_else(|| settings.general.data_dir.clone())
        .ok_or_else(suggestions::data_path_required)?;
    if !path.is_dir() {
        return Err(suggestions::data_path_not_found(&path));
    }
    Ok(path)
}

/// Parse `--extensions` values, suggesting a fix for unknown names.
pub fn parse_extensions(names: &[String]) -> Result<Vec<Extension>> {
    let mut extensions = Vec::with_capacity(names.len());
    for name in names.iter().filter(|n| !n.trim().is_empty()) {
        let extension = name
            .parse::<Extension>()
            .map_err(|_| suggestions::unknown_extension(name))?;
        if !extensions.contains(&extension) {
            extensions.push(extension);
        }
    }
    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions_dedups() {
        let names = vec!["jpg".to_string(), "JPG".to_string(), "mov".to_string()];
        assert_eq!(
            parse_extensions(&names).unwrap(),
            vec![Extension::Jpg, Extension::Mov]
        );
    }

    #[test]
    fn test_parse_extensions_suggests() {
        let err = parse_extensions(&["mp5".to_string()]).unwrap_err();
        assert!(err.to_string().contains("Unknown media extension: mp5"));
    }

    #[test]
    fn test_resolve_data_path_requires_a_path() {
        let err = resolve_data_path(None, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("No data path given"));
    }

    #[test]
    fn test_report_store_precedence() {
        let mut ctx = Context {
            output: OutputConfig { use_color: false },
            settings_path: PathBuf::from("settings.toml"),
            explicit_settings: false,
            report_dir: None,
            quiet: true,
        };
        let mut settings = Settings::default();
        assert_eq!(
            ctx.report_store(&settings).dir(),
            wildintel_tools::defaults::default_report_dir()
        );

        settings.general.report_dir = Some(PathBuf::from("/srv/reports"));
        assert_eq!(ctx.report_store(&settings).dir(), PathBuf::from("/srv/reports"));

        ctx.report_dir = Some(PathBuf::from("/tmp/override"));
        assert_eq!(ctx.report_store(&settings).dir(), PathBuf::from("/tmp/override"));
    }

    #[test]
    fn test_resolve_data_path_uses_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.general.data_dir = Some(dir.path().to_path_buf());
        assert_eq!(resolve_data_path(None, &settings).unwrap(), dir.path());
    }
}
