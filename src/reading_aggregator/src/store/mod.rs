//! Profile store abstraction.
//!
//! The store owns reading logs; aggregation only ever sees a fetched
//! snapshot. Callers pass the store and the current [`UserId`] explicitly.
//! Failures are returned as-is: nothing here retries.
//!
//! ```
//! # use reading_aggregator::store::{ProfileStore, memory::MemoryProfileStore, load_history};
//! # use reading_aggregator::{Reading, UserId};
//! # use chrono::NaiveDate;
//! # tokio_test_block_on(async {
//! let store = MemoryProfileStore::default();
//! let user = UserId::new("u-1");
//! store.create_profile(&user).await.unwrap();
//! let t = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! store.append(&user, Reading::new(6.4, t)).await.unwrap();
//! assert_eq!(load_history(&store, &user).await.unwrap().len(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::{
    aggregate::{self, ChartSeries},
    errors::AggregateError,
    models::{
        filter::FilterKind,
        reading::{Reading, UserId},
        reading_log::ReadingLog,
    },
};

/// Errors surfaced by a [`ProfileStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// No profile exists for the user.
    #[error("Profile not found for user {0}")]
    NotFound(UserId),

    /// The reading failed validation and was not stored.
    #[error("Rejected reading: {0}")]
    InvalidReading(String),

    /// Stored data could not be turned into a consistent log.
    #[error("Stored profile is inconsistent")]
    Integrity(#[from] AggregateError),

    /// The backend failed (I/O, database, task join...).
    #[error("Profile store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Run [`Reading::validate`], mapping failures to [`StoreError::InvalidReading`].
    pub fn check_reading(reading: &Reading) -> Result<(), StoreError> {
        reading.validate().map_err(|e| match e {
            AggregateError::InvalidReading(msg) => StoreError::InvalidReading(msg),
            other => StoreError::Integrity(other),
        })
    }
}

/// Where reading logs live.
#[async_trait]
pub trait ProfileStore {
    /// Snapshot of the user's log in insertion order.
    async fn fetch(&self, user: &UserId) -> Result<ReadingLog, StoreError>;

    /// Append one reading to an existing profile.
    async fn append(&self, user: &UserId, reading: Reading) -> Result<(), StoreError>;

    /// Create an empty profile if none exists; returns whether one was created.
    async fn create_profile(&self, user: &UserId) -> Result<bool, StoreError>;
}

/// Fetch the user's log and order it newest first.
pub async fn load_history<S>(store: &S, user: &UserId) -> Result<ReadingLog, StoreError>
where
    S: ProfileStore + ?Sized,
{
    let log = store.fetch(user).await?;
    Ok(aggregate::sort_descending(log))
}

/// Fetch the user's log and bucket it for one chart window.
pub async fn load_chart<S>(
    store: &S,
    user: &UserId,
    kind: FilterKind,
    reference: NaiveDateTime,
) -> Result<ChartSeries, StoreError>
where
    S: ProfileStore + ?Sized,
{
    let log = store.fetch(user).await?;
    Ok(aggregate::chart_series(&log, kind, reference))
}
