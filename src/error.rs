//! # Error Handling
//!
//! This module defines the centralized error type for `wildintel-tools`. It
//! uses the `thiserror` library to create an `Error` enum covering the failure
//! modes of the three dataset commands and their collaborators.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum representing everything that can go wrong
//!   while walking a dataset, reading timestamp logs, talking to the metadata
//!   tool or encoding images. Variants carry the path or tool involved.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Most per-file problems are not returned as errors at all: the validation
//! passes record them in a [`crate::report::Report`] and keep going. `Error`
//! is for conditions that stop an operation (a missing data path, a
//! malformed configuration) or that a caller converts into a report entry.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for wildintel-tools operations
#[derive(Error, Debug)]
pub enum Error {
    /// The data root passed on the command line does not exist or is not a
    /// directory.
    #[error("Data path not found: {}", path.display())]
    DataPathNotFound { path: PathBuf },

    /// An error occurred while parsing the settings file.
    ///
    /// Includes an optional hint about how to fix it.
    #[error("Settings error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Settings {
        message: String,
        /// Optional hint for how to fix the settings issue
        hint: Option<String>,
    },

    /// A row of a `*_FileTimestampLog.csv` file could not be interpreted.
    #[error("Timestamp log error in {} (row {row}): {message}", path.display())]
    TimestampLog {
        path: PathBuf,
        row: usize,
        message: String,
    },

    /// A date/time string did not match the `YYYY:MM:DD HH:MM:SS` layout.
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    /// The external metadata tool could not be started or exited with an
    /// error.
    #[error("Metadata tool '{tool}' failed for {}: {message}{}", path.display(), hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    MetadataTool {
        tool: String,
        path: PathBuf,
        message: String,
        /// Optional hint, e.g. how to install the tool
        hint: Option<String>,
    },

    /// An image could not be decoded, resized or encoded.
    #[error("Image processing error for {}: {message}", path.display())]
    Image { path: PathBuf, message: String },

    /// A report asked for by name is not in the report directory.
    #[error("Report not found: {}", path.display())]
    ReportNotFound { path: PathBuf },

    /// A file name or extension was not recognised as a supported media type.
    #[error("Unsupported media extension: {extension}")]
    UnsupportedExtension { extension: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// A CSV error, wrapped from `csv::Error`.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A TOML deserialization error, wrapped from `toml::de::Error`.
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A TOML serialization error, wrapped from `toml::ser::Error`.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
