//! Blood-glucose reading aggregation.
//!
//! A user's readings arrive as a [`ReadingLog`] snapshot (or as the stored
//! parallel-sequence [`ProfileDocument`]) and leave as either a newest-first
//! history or a series of [`ChartPoint`]s for one calendar window.
//!
//! - [`aggregate`]: [`sort_descending`], [`sorted_history`], [`filter_and_bucket`]
//! - [`aggregate::window`]: calendar windows and bucket domains
//! - [`aggregate::labels`]: axis labels for buckets
//! - [`view_state`]: explicit event-driven chart state
//! - [`store`]: the [`ProfileStore`] collaborator and an in-memory implementation
//!
//! ```
//! use chrono::NaiveDate;
//! use reading_aggregator::{FilterKind, Reading, ReadingLog, filter_and_bucket};
//!
//! let at = |d, h| NaiveDate::from_ymd_opt(2024, 2, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
//! let log = ReadingLog::from_readings(vec![
//!     Reading::new(5.4, at(14, 8)),
//!     Reading::new(7.9, at(15, 8)),
//! ]);
//!
//! let points = filter_and_bucket(&log, FilterKind::Day, at(15, 20));
//! assert_eq!(points.len(), 1);
//! assert_eq!(points[0].bucket, 8);
//! ```

#![deny(missing_docs)]

pub mod aggregate;
pub mod errors;
pub mod models;
pub mod store;
pub mod view_state;

pub use aggregate::{filter_and_bucket, filter_and_bucket_now, sort_descending, sorted_history};
pub use errors::AggregateError;
pub use models::{
    chart_point::ChartPoint,
    filter::FilterKind,
    reading::{Reading, UserId},
    reading_log::{ProfileDocument, ReadingLog},
};
pub use store::{ProfileStore, StoreError};
