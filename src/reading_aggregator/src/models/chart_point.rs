//! Chart points derived from readings.

use serde::{Deserialize, Serialize};

/// A reading projected onto a chart axis. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Hour of day (0-23), ISO weekday (1-7), or day of month (1-N).
    pub bucket: u32,
    /// Glucose level of the reading mapped to this bucket.
    pub value: f64,
}
