//! Profile document import.
//!
//! Accepts the hosted-database export of a profile: parallel sequences keyed
//! `bloodSugarLevels`, `times`, `hasEaten`, `hasInsulin`, `insulinUnits`.
//! Each `times` entry may be
//! - a wall-clock string: `"2024-02-29T08:00:00"` (taken as-is),
//! - an RFC 3339 instant: `"2024-02-29T08:00:00Z"` (converted into the zone),
//! - an exported timestamp object: `{"seconds": 1709193600, "nanoseconds": 0}`.
//!
//! Conversion is strict: one unreadable timestamp rejects the whole document.

use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use chrono_tz::Tz;
use reading_aggregator::ProfileDocument;
use serde::Deserialize;

use crate::tz;

/// A `times` entry as exported.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ExportedTime {
    /// Wall clock or RFC 3339 text.
    Text(String),
    /// Seconds and nanoseconds since the Unix epoch.
    Timestamp {
        /// Whole seconds.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// Sub-second part.
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
}

impl ExportedTime {
    /// Wall clock in `tz`.
    pub fn to_wall_clock(&self, tz: Tz) -> anyhow::Result<NaiveDateTime> {
        match self {
            ExportedTime::Text(s) => tz::parse_wall_clock(s, tz),
            ExportedTime::Timestamp {
                seconds,
                nanoseconds,
            } => tz::from_epoch(*seconds, *nanoseconds, tz),
        }
    }
}

/// Exported profile document before timestamps are resolved.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    /// Glucose levels.
    #[serde(default)]
    pub blood_sugar_levels: Vec<f64>,
    /// Measurement times.
    #[serde(default)]
    pub times: Vec<ExportedTime>,
    /// Meal flags; older documents omit them.
    #[serde(default)]
    pub has_eaten: Option<Vec<bool>>,
    /// Insulin flags; older documents omit them.
    #[serde(default)]
    pub has_insulin: Option<Vec<bool>>,
    /// Insulin units, `null` where unknown.
    #[serde(default)]
    pub insulin_units: Option<Vec<Option<f64>>>,
}

impl ExportedDocument {
    /// Resolve every timestamp into `tz` wall clock.
    ///
    /// Sequence lengths are not checked here; that happens when the document
    /// becomes a log.
    pub fn into_profile_document(self, tz: Tz) -> anyhow::Result<ProfileDocument> {
        let times = self
            .times
            .iter()
            .enumerate()
            .map(|(idx, t)| t.to_wall_clock(tz).with_context(|| format!("times[{idx}]")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(ProfileDocument {
            blood_sugar_levels: self.blood_sugar_levels,
            times,
            has_eaten: self.has_eaten,
            has_insulin: self.has_insulin,
            insulin_units: self.insulin_units,
        })
    }
}

/// Parse an exported document from JSON text.
pub fn parse_document(json: &str, tz: Tz) -> anyhow::Result<ProfileDocument> {
    let raw: ExportedDocument = serde_json::from_str(json).context("parse profile document")?;
    raw.into_profile_document(tz)
}

/// Read and parse an exported document from `path`.
pub fn read_document(path: &Path, tz: Tz) -> anyhow::Result<ProfileDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    parse_document(&text, tz).with_context(|| format!("import {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn all_time_shapes_resolve() {
        let json = r#"{
            "bloodSugarLevels": [5.5, 6.1, 7.0],
            "times": [
                "2024-02-29T08:00:00",
                "2024-02-29T12:30:00Z",
                {"seconds": 1709236800, "nanoseconds": 0}
            ]
        }"#;
        let doc = parse_document(json, tz::parse_tz("Europe/Berlin").unwrap()).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            doc.times,
            vec![
                day.and_hms_opt(8, 0, 0).unwrap(),
                day.and_hms_opt(13, 30, 0).unwrap(),
                // 2024-02-29T20:00:00Z
                day.and_hms_opt(21, 0, 0).unwrap(),
            ]
        );
        assert!(doc.has_eaten.is_none());
    }

    #[test]
    fn underscore_timestamp_keys() {
        let json = r#"{"bloodSugarLevels": [4.0], "times": [{"_seconds": 0, "_nanoseconds": 5}]}"#;
        let doc = parse_document(json, Tz::UTC).unwrap();
        assert_eq!(
            doc.times[0],
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_nano_opt(0, 0, 0, 5)
                .unwrap()
        );
    }

    #[test]
    fn one_bad_time_fails_everything() {
        let json = r#"{"bloodSugarLevels": [4.0, 5.0], "times": ["2024-01-01T08:00:00", "noon"]}"#;
        let err = parse_document(json, Tz::UTC).unwrap_err();
        assert!(format!("{err:#}").contains("times[1]"), "{err:#}");
    }
}
