// SPDX-License-Identifier: MPL-2.0

//! Output file naming for captured photos
//!
//! Photos are named `IMG_<yyyyMMdd_HHmmss>.jpg`. The timestamp has second
//! resolution, so two captures within the same second get the same name.

use crate::constants::photo::{FILE_EXTENSION, FILE_PREFIX, TIMESTAMP_FORMAT};
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name for a photo taken at `timestamp`
pub fn photo_file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}.{}",
        FILE_PREFIX,
        timestamp.format(TIMESTAMP_FORMAT),
        FILE_EXTENSION
    )
}

/// Absolute output path for a photo taken now, creating `dir` if needed
pub async fn prepare_photo_path(dir: &Path) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let dir = tokio::fs::canonicalize(dir).await?;

    let path = dir.join(photo_file_name(&chrono::Local::now()));
    debug!(path = %path.display(), "Prepared photo path");
    Ok(path)
}
