//! Timestamped JSON dump of collected SKU records

use crate::types::{Result, SkuRecord};
use chrono::{DateTime, TimeZone};
use std::fs;
use std::path::{Path, PathBuf};

/// `pricing-<region>-<YYYY-MM-DD-HH-MM-SS>.json`
pub fn output_filename<Tz: TimeZone>(region: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("pricing-{}-{}.json", region, at.format("%Y-%m-%d-%H-%M-%S"))
}

/// Serialize records as 2-space indented JSON and write them under `dir`.
///
/// Returns the path written.
pub fn write_records<Tz: TimeZone>(
    dir: &Path,
    region: &str,
    records: &[SkuRecord],
    at: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let content = serde_json::to_string_pretty(records)?;
    let path = dir.join(output_filename(region, at));
    fs::write(&path, content)?;
    Ok(path)
}
