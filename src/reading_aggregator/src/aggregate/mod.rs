//! History ordering and chart bucketing over a [`ReadingLog`] snapshot.
//!
//! Everything here is a pure function of its inputs: no I/O, no caching, and
//! no clock access except in [`filter_and_bucket_now`]. Buckets are
//! recomputed from scratch on every call, so a later reference instant never
//! sees assignments from an earlier one.

pub mod labels;
pub mod window;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    errors::AggregateError,
    models::{
        chart_point::ChartPoint,
        filter::FilterKind,
        reading_log::{ProfileDocument, ReadingLog},
    },
};

use self::window::ChartWindow;

/// Reorder `log` from latest to earliest timestamp.
///
/// Each reading moves as a whole, so glucose, flags and units stay with their
/// timestamp. The sort is stable: readings with equal timestamps keep their
/// insertion order.
pub fn sort_descending(log: ReadingLog) -> ReadingLog {
    let mut readings = log.into_readings();
    readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    ReadingLog::from_readings(readings)
}

/// Validate a stored document and return its readings newest first.
///
/// Fails with [`AggregateError::DataIntegrity`] if the parallel sequences
/// differ in length; the document is never truncated or padded.
pub fn sorted_history(doc: ProfileDocument) -> Result<ReadingLog, AggregateError> {
    Ok(sort_descending(doc.into_log()?))
}

/// A chart's window together with its points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Window the points were selected from.
    pub window: ChartWindow,
    /// One point per in-window reading, in log order.
    pub points: Vec<ChartPoint>,
}

/// Select the readings inside the `kind` window around `reference` and map
/// each to its bucket.
pub fn chart_series(log: &ReadingLog, kind: FilterKind, reference: NaiveDateTime) -> ChartSeries {
    let window = ChartWindow::containing(kind, reference);
    let points = log
        .iter()
        .filter_map(|r| {
            window.bucket_of(r.timestamp).map(|bucket| ChartPoint {
                bucket,
                value: r.glucose_level,
            })
        })
        .collect();
    ChartSeries { window, points }
}

/// One [`ChartPoint`] per reading inside the window, in log order.
///
/// Readings sharing a bucket are all emitted; nothing is averaged or
/// collapsed, and empty buckets are not filled.
pub fn filter_and_bucket(
    log: &ReadingLog,
    kind: FilterKind,
    reference: NaiveDateTime,
) -> Vec<ChartPoint> {
    chart_series(log, kind, reference).points
}

/// [`filter_and_bucket`] with the local wall clock as the reference.
pub fn filter_and_bucket_now(log: &ReadingLog, kind: FilterKind) -> Vec<ChartPoint> {
    filter_and_bucket(log, kind, chrono::Local::now().naive_local())
}
