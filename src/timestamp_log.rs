//! # File Timestamp Log
//!
//! Every collection carries a `<COLLECTION>_FileTimestampLog.csv` written by
//! the field team. Each row declares when a camera was deployed and
//! retrieved:
//!
//! ```text
//! Deployment,StartDate,StartTime,EndDate,EndTime
//! R0001-LOC01,2024:05:01,10:00:00,2024:06:12,16:30:00
//! ```
//!
//! Dates use the EXIF layout `YYYY:MM:DD` so they compare directly with the
//! capture times stored in the media files. Extra columns are ignored.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Layout of dates in the log and in EXIF metadata.
pub const DATE_FORMAT: &str = "%Y:%m:%d";

/// Layout of times in the log and in EXIF metadata.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A deployment as declared in the timestamp log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDeployment {
    /// Deployment folder name.
    pub name: String,
    pub expected_start: NaiveDateTime,
    pub expected_end: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
struct LogRow {
    #[serde(rename = "Deployment", default)]
    deployment: Option<String>,
    #[serde(rename = "StartDate", default)]
    start_date: Option<String>,
    #[serde(rename = "StartTime", default)]
    start_time: Option<String>,
    #[serde(rename = "EndDate", default)]
    end_date: Option<String>,
    #[serde(rename = "EndTime", default)]
    end_time: Option<String>,
}

/// Reader for `*_FileTimestampLog.csv` files.
pub struct TimestampLog;

impl TimestampLog {
    /// Location of the log for `collection` inside `collection_path`.
    pub fn path_for(collection_path: &Path, collection: &str) -> PathBuf {
        collection_path.join(Self::file_name(collection))
    }

    pub fn file_name(collection: &str) -> String {
        format!("{collection}_FileTimestampLog.csv")
    }

    /// Read every usable row of the log at `path`.
    ///
    /// Rows without a deployment name, start date or end date are skipped.
    /// A missing start time means midnight; a missing end time means the
    /// last second of the end date.
    pub fn read(path: &Path) -> Result<Vec<ExpectedDeployment>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let mut deployments = Vec::new();
        for (index, row) in reader.deserialize::<LogRow>().enumerate() {
            let row_number = index + 1;
            let row = row?;

            let (Some(name), Some(start_date), Some(end_date)) =
                (non_empty(row.deployment), non_empty(row.start_date), non_empty(row.end_date))
            else {
                log::debug!("Skipping incomplete row {row_number} in {}", path.display());
                continue;
            };

            let start_time = non_empty(row.start_time).unwrap_or_else(|| "00:00:00".to_string());
            let end_time = non_empty(row.end_time).unwrap_or_else(|| "23:59:59".to_string());

            let to_log_error = |e: Error| Error::TimestampLog {
                path: path.to_path_buf(),
                row: row_number,
                message: e.to_string(),
            };

            let expected_start = parse_log_datetime(&start_date, &start_time).map_err(to_log_error)?;
            let expected_end = parse_log_datetime(&end_date, &end_time).map_err(to_log_error)?;

            deployments.push(ExpectedDeployment {
                name,
                expected_start,
                expected_end,
            });
        }

        Ok(deployments)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Combine a `YYYY:MM:DD` date and a `HH:MM:SS` time.
pub fn parse_log_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
        Error::InvalidTimestamp {
            value: date.to_string(),
            message: e.to_string(),
        }
    })?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|e| {
        Error::InvalidTimestamp {
            value: time.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(date.and_time(time))
}
