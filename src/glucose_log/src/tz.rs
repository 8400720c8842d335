//! Wall-clock parsing and time zone conversion.
//!
//! Readings carry a naive wall-clock time: the local time the user saw when
//! the measurement was taken. Instants (RFC 3339 with an offset, epoch
//! seconds) only appear at the edges (CLI flags, imported documents) and are
//! converted into the configured IANA zone before they reach the store.
//!
//! Examples
//! - "2024-02-29 08:00" -> 2024-02-29T08:00:00
//! - "2024-03-10T14:30:00Z" in "America/New_York" -> 2024-03-10T10:30:00

use anyhow::{Context, anyhow, bail};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Storage format for wall-clock timestamps: fixed width with full
/// nanoseconds, so text order is time order and nothing is rounded.
pub const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

const NAIVE_INPUT_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an IANA zone name such as "Europe/London".
pub fn parse_tz(name: &str) -> anyhow::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow!("unknown time zone {name}: {e}"))
}

/// Parse user input as a wall-clock time.
///
/// Naive inputs are taken as-is. RFC 3339 inputs with an offset are converted
/// into `tz` and their offset dropped.
pub fn parse_wall_clock(input: &str, tz: Tz) -> anyhow::Result<NaiveDateTime> {
    let s = input.trim();
    for fmt in NAIVE_INPUT_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&tz).naive_local()),
        Err(_) => bail!("bad timestamp: {input} (expected YYYY-MM-DD HH:MM[:SS] or RFC3339)"),
    }
}

/// Wall clock in `tz` for an exported `{seconds, nanoseconds}` instant.
pub fn from_epoch(seconds: i64, nanoseconds: u32, tz: Tz) -> anyhow::Result<NaiveDateTime> {
    let utc = DateTime::<Utc>::from_timestamp(seconds, nanoseconds)
        .with_context(|| format!("timestamp out of range: {seconds}s {nanoseconds}ns"))?;
    Ok(utc.with_timezone(&tz).naive_local())
}

/// Current wall clock in `tz`.
pub fn now_in(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Format for the `readings.taken_at` column.
pub fn to_wall_clock_string(ts: NaiveDateTime) -> String {
    ts.format(WALL_CLOCK_FORMAT).to_string()
}

/// Inverse of [`to_wall_clock_string`].
pub fn parse_stored(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .with_context(|| format!("bad stored timestamp: {s}"))
}
