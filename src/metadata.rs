//! # Media Metadata
//!
//! Reading capture times and camera details from media files, and embedding
//! XMP tags into exported copies. Both directions go through the
//! [`MetadataReader`] and [`MetadataWriter`] traits so the validation passes
//! never depend on a particular tool.
//!
//! The production implementation, [`ExifTool`], shells out to Phil Harvey's
//! `exiftool`, which understands the EXIF blocks of stills as well as the
//! QuickTime/RIFF atoms of camera-trap video.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{Error, Result};

/// Layout of EXIF date/time values.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// The subset of a media file's metadata the commands care about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaMetadata {
    /// When the camera captured the file, in camera-local time.
    pub date_taken: Option<NaiveDateTime>,
    /// Camera manufacturer.
    pub make: Option<String>,
    /// Camera model.
    pub model: Option<String>,
}

/// Source of [`MediaMetadata`] for a file on disk.
pub trait MetadataReader {
    fn read(&self, path: &Path) -> Result<MediaMetadata>;
}

/// Sink for XMP tags, writing them into a file in place.
pub trait MetadataWriter {
    fn write_tags(&self, path: &Path, tags: &XmpTags) -> Result<()>;
}

/// An ordered set of `GROUP:Tag` → value pairs, e.g.
/// `XMP-dc:Creator` → `CT (RECONYX HC600 WildINTEL)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmpTags {
    entries: Vec<(String, String)>,
}

impl XmpTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `tag` to `value`, replacing any earlier value for the same tag.
    pub fn insert(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        let tag = tag.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == tag) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((tag, value)),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == tag)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse an EXIF date/time such as `2024:05:01 10:00:00`.
///
/// Sub-second and timezone suffixes (`.25`, `+02:00`) are ignored. The
/// all-zero placeholder some cameras write is treated as absent.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    let head = value.get(..19)?;
    if head.starts_with("0000:00:00") {
        return None;
    }
    NaiveDateTime::parse_from_str(head, EXIF_DATETIME_FORMAT).ok()
}

/// Tags queried for the capture time, in order of preference.
const DATE_TAGS: [&str; 3] = ["DateTimeOriginal", "ModifyDate", "CreateDate"];

/// Metadata reader and writer backed by the `exiftool` executable.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl Default for ExifTool {
    fn default() -> Self {
        Self::new("exiftool")
    }
}

impl ExifTool {
    /// Use the executable at `program` (a bare name is looked up in `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Version reported by `exiftool -ver`, e.g. `12.76`.
    pub fn version(&self) -> Result<String> {
        let stdout = self.run(&["-ver".to_string()], None)?;
        let version = String::from_utf8_lossy(&stdout).trim().to_string();
        log::info!("ExifTool available: version {version}");
        Ok(version)
    }

    /// Run the tool with `args`, followed by `path` when given.
    fn run(&self, args: &[String], path: Option<&Path>) -> Result<Vec<u8>> {
        let subject = path.unwrap_or(self.program.as_path());
        let output = Command::new(&self.program)
            .args(args)
            .args(path)
            .output()
            .map_err(|e| self.spawn_error(e, subject))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::MetadataTool {
                tool: self.program.display().to_string(),
                path: subject.to_path_buf(),
                message: stderr.trim().to_string(),
                hint: None,
            });
        }

        Ok(output.stdout)
    }

    fn spawn_error(&self, error: io::Error, path: &Path) -> Error {
        let hint = (error.kind() == io::ErrorKind::NotFound).then(|| {
            "Install ExifTool (https://exiftool.org) or set `exiftool` in the [tools] settings section"
                .to_string()
        });
        Error::MetadataTool {
            tool: self.program.display().to_string(),
            path: path.to_path_buf(),
            message: error.to_string(),
            hint,
        }
    }
}

impl MetadataReader for ExifTool {
    fn read(&self, path: &Path) -> Result<MediaMetadata> {
        let mut args = vec!["-json".to_string()];
        args.extend(DATE_TAGS.iter().map(|tag| format!("-{tag}")));
        args.push("-Make".to_string());
        args.push("-Model".to_string());

        let stdout = self.run(&args, Some(path))?;
        parse_exiftool_json(&stdout)
    }
}

impl MetadataWriter for ExifTool {
    fn write_tags(&self, path: &Path, tags: &XmpTags) -> Result<()> {
        let mut args = vec!["-overwrite_original".to_string()];
        args.extend(tags.iter().map(|(tag, value)| format!("-{tag}={value}")));
        self.run(&args, Some(path))?;
        Ok(())
    }
}

/// Interpret the `-json` output of exiftool for a single file.
pub fn parse_exiftool_json(stdout: &[u8]) -> Result<MediaMetadata> {
    let records: Vec<serde_json::Map<String, Value>> = serde_json::from_slice(stdout)?;
    let Some(record) = records.into_iter().next() else {
        return Ok(MediaMetadata::default());
    };

    let date_taken = DATE_TAGS
        .iter()
        .filter_map(|tag| record.get(*tag).and_then(value_to_string))
        .find_map(|value| parse_exif_datetime(&value));

    Ok(MediaMetadata {
        date_taken,
        make: record.get("Make").and_then(value_to_string),
        model: record.get("Model").and_then(value_to_string),
    })
}

fn value_to_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
