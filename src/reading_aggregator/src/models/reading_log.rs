//! Reading logs and the stored parallel-sequence document they come from.
//!
//! The backing store keeps one profile document per user with a separate
//! sequence per attribute (`bloodSugarLevels`, `times`, `hasEaten`,
//! `hasInsulin`, `insulinUnits`), all indexed by the same logical position.
//! [`ProfileDocument`] mirrors that shape for (de)serialization only; the rest
//! of the crate works on [`ReadingLog`], a plain sequence of [`Reading`]
//! records, so a misaligned index cannot exist past the conversion in
//! [`ProfileDocument::into_log`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::AggregateError, models::reading::Reading};

/// Readings of one profile in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingLog {
    readings: Vec<Reading>,
}

impl ReadingLog {
    /// Build a log from readings already in insertion order.
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    /// Borrow the readings.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when the log holds no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Iterate readings in log order.
    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// Take the readings out of the log.
    pub fn into_readings(self) -> Vec<Reading> {
        self.readings
    }

    /// Split the log back into the stored parallel-sequence shape.
    pub fn to_document(&self) -> ProfileDocument {
        let n = self.readings.len();
        let mut doc = ProfileDocument {
            blood_sugar_levels: Vec::with_capacity(n),
            times: Vec::with_capacity(n),
            has_eaten: Some(Vec::with_capacity(n)),
            has_insulin: Some(Vec::with_capacity(n)),
            insulin_units: Some(Vec::with_capacity(n)),
        };
        for r in &self.readings {
            doc.blood_sugar_levels.push(r.glucose_level);
            doc.times.push(r.timestamp);
            doc.has_eaten.get_or_insert_with(Vec::new).push(r.has_eaten);
            doc.has_insulin.get_or_insert_with(Vec::new).push(r.has_insulin);
            doc.insulin_units
                .get_or_insert_with(Vec::new)
                .push(r.effective_insulin_units());
        }
        doc
    }
}

impl FromIterator<Reading> for ReadingLog {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Self::from_readings(iter.into_iter().collect())
    }
}

impl IntoIterator for ReadingLog {
    type Item = Reading;
    type IntoIter = std::vec::IntoIter<Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReadingLog {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

/// A profile document as held by the backing store.
///
/// Every field may be missing from an older document. Missing glucose/time
/// sequences read as empty; missing optional sequences read as all-false
/// (`hasEaten`, `hasInsulin`) or all-null (`insulinUnits`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    /// Glucose level per reading.
    #[serde(default)]
    pub blood_sugar_levels: Vec<f64>,
    /// Wall-clock time per reading.
    #[serde(default)]
    pub times: Vec<NaiveDateTime>,
    /// Meal flag per reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_eaten: Option<Vec<bool>>,
    /// Insulin flag per reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_insulin: Option<Vec<bool>>,
    /// Insulin units per reading (null where none were recorded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulin_units: Option<Vec<Option<f64>>>,
}

impl ProfileDocument {
    /// Zip the parallel sequences into a [`ReadingLog`].
    ///
    /// Errors with [`AggregateError::DataIntegrity`] when any present sequence
    /// differs in length from `bloodSugarLevels`; nothing is truncated or
    /// padded. Units recorded next to a `false` insulin flag are dropped.
    pub fn into_log(self) -> Result<ReadingLog, AggregateError> {
        let expected = self.blood_sugar_levels.len();
        check_len("times", expected, Some(self.times.len()))?;
        check_len("hasEaten", expected, self.has_eaten.as_ref().map(Vec::len))?;
        check_len("hasInsulin", expected, self.has_insulin.as_ref().map(Vec::len))?;
        check_len("insulinUnits", expected, self.insulin_units.as_ref().map(Vec::len))?;

        let mut eaten = self.has_eaten.map(Vec::into_iter);
        let mut insulin = self.has_insulin.map(Vec::into_iter);
        let mut units = self.insulin_units.map(Vec::into_iter);

        let readings = self
            .blood_sugar_levels
            .into_iter()
            .zip(self.times)
            .map(|(glucose_level, timestamp)| {
                let has_eaten = eaten.as_mut().and_then(Iterator::next).unwrap_or(false);
                let has_insulin = insulin.as_mut().and_then(Iterator::next).unwrap_or(false);
                let recorded = units.as_mut().and_then(Iterator::next).flatten();
                Reading {
                    glucose_level,
                    timestamp,
                    has_eaten,
                    has_insulin,
                    insulin_units: if has_insulin { recorded } else { None },
                }
            })
            .collect();

        Ok(ReadingLog::from_readings(readings))
    }
}

impl TryFrom<ProfileDocument> for ReadingLog {
    type Error = AggregateError;

    fn try_from(doc: ProfileDocument) -> Result<Self, Self::Error> {
        doc.into_log()
    }
}

impl From<&ReadingLog> for ProfileDocument {
    fn from(log: &ReadingLog) -> Self {
        log.to_document()
    }
}

fn check_len(
    field: &'static str,
    expected: usize,
    actual: Option<usize>,
) -> Result<(), AggregateError> {
    match actual {
        Some(actual) if actual != expected => {
            tracing::warn!(field, expected, actual, "rejecting misaligned profile document");
            Err(AggregateError::DataIntegrity {
                field,
                expected,
                actual,
            })
        }
        _ => Ok(()),
    }
}
