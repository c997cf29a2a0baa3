//! Default locations used across commands.

use std::path::PathBuf;

/// Directory name used under the platform config directory.
pub const APP_DIR: &str = "wildintel-tools";

/// Project whose settings are used when `--project` is not given.
pub const DEFAULT_PROJECT: &str = "default";

/// Returns the settings file for `project`.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/wildintel-tools/<project>.toml`
/// - macOS: `~/Library/Application Support/wildintel-tools/<project>.toml`
/// - Windows: `{FOLDERID_RoamingAppData}\wildintel-tools\<project>.toml`
///
/// Falls back to `.wildintel-tools` in the current directory if the
/// platform config directory cannot be determined. Overridden by the
/// `--config` flag or the `WILDINTEL_CONFIG` environment variable.
pub fn default_settings_path(project: &str) -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
        .join(format!("{project}.toml"))
}

/// Prefix of report files written when `--report-file` is not given.
pub const REPORT_PREFIX: &str = "wildintel-report-";

/// Returns the directory command reports are kept in.
///
/// Uses the platform data directory:
/// - Linux: `~/.local/share/wildintel-tools/reports`
/// - macOS: `~/Library/Application Support/wildintel-tools/reports`
/// - Windows: `{FOLDERID_RoamingAppData}\wildintel-tools\reports`
///
/// Falls back to `.wildintel-tools/reports` in the current directory.
/// Overridden by `[general] report_dir`, the `--report-dir` flag or the
/// `WILDINTEL_REPORT_DIR` environment variable.
pub fn default_report_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
        .join("reports")
}
