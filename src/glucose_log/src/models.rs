//! Diesel models mapping to the database schema.
//!
//! These types mirror the tables created by the embedded migrations and
//! declared in [`crate::schema`]:
//! - [`crate::schema::profiles`]: one row per user, checked for existence only
//! - [`crate::schema::readings`]: append-only readings, FK to `profiles` with `ON DELETE CASCADE`
//!
//! Timestamps are stored as wall-clock text (see [`crate::tz::WALL_CLOCK_FORMAT`]).

use diesel::prelude::*;
use reading_aggregator::{Reading, UserId};

use crate::{schema::*, tz};

/// A row in [`crate::schema::readings`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = readings, check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReadingRow {
    /// AUTOINCREMENT key; defines insertion order.
    pub id: i32,
    /// FK to `profiles.user_id`.
    pub user_id: String,
    /// Measured glucose level.
    pub glucose_level: f64,
    /// Wall-clock time of the measurement.
    pub taken_at: String,
    /// Whether food was eaten.
    pub has_eaten: bool,
    /// Whether insulin was injected.
    pub has_insulin: bool,
    /// Injected units; NULL when unknown or when `has_insulin` is false.
    pub insulin_units: Option<f64>,
}

impl ReadingRow {
    /// Convert back into the domain type.
    pub fn into_reading(self) -> anyhow::Result<Reading> {
        let timestamp = tz::parse_stored(&self.taken_at)?;
        Ok(Reading {
            glucose_level: self.glucose_level,
            timestamp,
            has_eaten: self.has_eaten,
            has_insulin: self.has_insulin,
            insulin_units: self.insulin_units,
        })
    }
}

/// Insertable form of [`ReadingRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = readings)]
pub struct NewReadingRow<'a> {
    /// Owner of the reading.
    pub user_id: &'a str,
    /// Measured glucose level.
    pub glucose_level: f64,
    /// Wall-clock text, see [`tz::to_wall_clock_string`].
    pub taken_at: String,
    /// Whether food was eaten.
    pub has_eaten: bool,
    /// Whether insulin was injected.
    pub has_insulin: bool,
    /// Injected units.
    pub insulin_units: Option<f64>,
}

impl<'a> NewReadingRow<'a> {
    /// Build the insert row for `reading` owned by `user`.
    pub fn from_reading(user: &'a UserId, reading: &Reading) -> Self {
        Self {
            user_id: user.as_str(),
            glucose_level: reading.glucose_level,
            taken_at: tz::to_wall_clock_string(reading.timestamp),
            has_eaten: reading.has_eaten,
            has_insulin: reading.has_insulin,
            insulin_units: reading.effective_insulin_units(),
        }
    }
}
