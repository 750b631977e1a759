//! Capture-time extraction
//!
//! Precedence: EXIF `DateTimeOriginal`, then EXIF `DateTime`, then the file's
//! modification time. EXIF values carry no zone and are taken to already be
//! in the upload timezone; the mtime is UTC and converted. Files that are not
//! recognisable images (videos, corrupt data) get the current time.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use exif::{In, Tag, Value};
use relay_core::models::{CaptureMetadata, TimestampSource};

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Render as ISO-8601 with milliseconds and a `+HH:MM` offset.
pub fn format_timestamp<Z: TimeZone>(timestamp: &DateTime<Z>) -> String
where
    Z::Offset: std::fmt::Display,
{
    timestamp.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

/// Derive capture timestamps for a staged file. Never fails.
pub fn capture_metadata(path: &Path, timezone: Tz) -> CaptureMetadata {
    match read_capture_time(path, timezone) {
        Ok((timestamp, source)) => CaptureMetadata::new(format_timestamp(&timestamp), source),
        Err(e) => {
            tracing::debug!(
                path = %path.display(),
                error = %format!("{:#}", e),
                "No image metadata, using current time"
            );
            let now = Utc::now().with_timezone(&timezone);
            CaptureMetadata::new(format_timestamp(&now), TimestampSource::Now)
        }
    }
}

fn read_capture_time(path: &Path, timezone: Tz) -> anyhow::Result<(DateTime<Tz>, TimestampSource)> {
    let format = image::ImageReader::open(path)
        .context("Failed to open file")?
        .with_guessed_format()
        .context("Failed to read file header")?
        .format();
    if format.is_none() {
        anyhow::bail!("not a recognised image format");
    }

    // A readable image without an EXIF block falls through to the mtime.
    let file = File::open(path).context("Failed to open file")?;
    let exif = exif::Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok();

    if let Some(exif) = &exif {
        let tagged = [
            (Tag::DateTimeOriginal, TimestampSource::DateTimeOriginal),
            (Tag::DateTime, TimestampSource::DateTime),
        ];
        for (tag, source) in tagged {
            if let Some(raw) = ascii_field(exif, tag) {
                let naive = NaiveDateTime::parse_from_str(&raw, EXIF_DATE_FORMAT)
                    .with_context(|| format!("Malformed EXIF timestamp '{}'", raw))?;
                let local = timezone
                    .from_local_datetime(&naive)
                    .earliest()
                    .unwrap_or_else(|| timezone.from_utc_datetime(&naive));
                return Ok((local, source));
            }
        }
    }

    let modified: DateTime<Utc> = fs::metadata(path)
        .and_then(|m| m.modified())
        .context("Failed to read modification time")?
        .into();
    Ok((
        modified.with_timezone(&timezone),
        TimestampSource::FileModified,
    ))
}

fn ascii_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    exif.get_field(tag, In::PRIMARY)
        .or_else(|| exif.fields().find(|f| f.tag == tag))
        .and_then(|f| match &f.value {
            Value::Ascii(v) if !v.is_empty() => std::str::from_utf8(&v[0])
                .ok()
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
}
