//! # Settings
//!
//! This module defines the TOML settings file shared by every command and
//! the logic for loading, validating and saving it.
//!
//! ## Layout
//!
//! ```toml
//! [general]
//! data_dir = "/data/wildintel"
//! report_dir = "/data/wildintel/reports"
//!
//! [wildintel]
//! tolerance_hours = 1
//! extensions = ["png", "jpg", "jpeg", "gif", "webp", "mp4", "mpeg", "mov", "avi"]
//! max_width = 2400
//! locations = []
//! rp_name = "Unknown"
//! coverage = ""
//! publisher = "Unknown"
//! owner = "Unknown"
//!
//! [tools]
//! exiftool = "exiftool"
//! ```
//!
//! Every section and key is optional; anything left out takes the value
//! shown above. One file is kept per project under the platform config
//! directory (see [`crate::defaults::default_settings_path`]).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::media::Extension;

/// Default clock-drift tolerance, in hours.
pub const DEFAULT_TOLERANCE_HOURS: u32 = 1;

/// Default width exported images are shrunk to.
pub const DEFAULT_MAX_WIDTH: u32 = 2400;

/// The complete settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub wildintel: WildintelSettings,
    pub tools: ToolsSettings,
}

/// `[general]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Data root used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Where reports are kept. Defaults to
    /// [`crate::defaults::default_report_dir`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_dir: Option<PathBuf>,
}

/// `[wildintel]` section: validation and export parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WildintelSettings {
    /// Allowed difference, in hours, between the first/last capture and the
    /// deployment start/end declared in the timestamp log.
    pub tolerance_hours: u32,
    /// Media extensions to process, without the leading dot.
    pub extensions: Vec<String>,
    /// Exported images wider than this are downscaled.
    pub max_width: u32,
    /// Known location identifiers. Empty disables the location check.
    pub locations: Vec<String>,
    /// Research project name, embedded in the creator tag.
    pub rp_name: String,
    /// Description of where the images were taken.
    pub coverage: String,
    pub publisher: String,
    pub owner: String,
}

impl Default for WildintelSettings {
    fn default() -> Self {
        Self {
            tolerance_hours: DEFAULT_TOLERANCE_HOURS,
            extensions: Extension::all().iter().map(|e| e.to_string()).collect(),
            max_width: DEFAULT_MAX_WIDTH,
            locations: Vec::new(),
            rp_name: "Unknown".to_string(),
            coverage: String::new(),
            publisher: "Unknown".to_string(),
            owner: "Unknown".to_string(),
        }
    }
}

/// `[tools]` section: external programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSettings {
    /// ExifTool executable, a bare name is looked up in `PATH`.
    pub exiftool: PathBuf,
}

impl Default for ToolsSettings {
    fn default() -> Self {
        Self {
            exiftool: PathBuf::from("exiftool"),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Settings {
            message: e.to_string(),
            hint: Some("Run 'wildintel-tools config init --force' to regenerate the file".to_string()),
        })
    }

    /// Read and validate the settings file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings = Self::parse(&content)?;
        settings.validate()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the settings as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Settings file of `project` in the platform config directory.
    pub fn default_path(project: &str) -> PathBuf {
        defaults::default_settings_path(project)
    }

    /// Reject values the commands cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.wildintel.max_width == 0 {
            return Err(Error::Settings {
                message: "max_width must be greater than zero".to_string(),
                hint: None,
            });
        }
        self.extensions()?;
        Ok(())
    }

    /// Report directory in effect.
    pub fn report_dir(&self) -> PathBuf {
        self.general
            .report_dir
            .clone()
            .unwrap_or_else(defaults::default_report_dir)
    }

    /// Configured extensions, parsed.
    pub fn extensions(&self) -> Result<Vec<Extension>> {
        parse_extensions(&self.wildintel.extensions)
    }
}

/// Parse extension names such as `jpg` or `.MP4`.
pub fn parse_extensions<S: AsRef<str>>(names: &[S]) -> Result<Vec<Extension>> {
    let mut extensions = Vec::with_capacity(names.len());
    for name in names {
        let extension = name.as_ref().parse::<Extension>().map_err(|_| Error::Settings {
            message: format!("Unknown extension '{}'", name.as_ref()),
            hint: Some(format!(
                "Use one of: {}",
                Extension::all()
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        })?;
        if !extensions.contains(&extension) {
            extensions.push(extension);
        }
    }
    Ok(extensions)
}
