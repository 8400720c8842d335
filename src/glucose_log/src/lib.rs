//! SQLite-backed blood glucose log.
//!
//! Persists reading logs behind the
//! [`ProfileStore`](reading_aggregator::ProfileStore) trait and renders the
//! history and chart views computed by `reading_aggregator`.
//!
//! - [`profile`]: diesel repository and the async [`profile::SqliteProfileStore`]
//! - [`db`]: connections and embedded migrations
//! - [`config`]: TOML configuration with environment fallbacks
//! - [`import`]: exported profile documents
//! - [`tz`]: wall-clock parsing and zone conversion
//! - [`render`]: text output for the `glucose-log` binary

#![deny(missing_docs)]

pub mod config;
pub mod db;
pub mod import;
pub mod models;
pub mod profile;
pub mod render;
#[allow(missing_docs)]
pub mod schema;
pub mod tz;
