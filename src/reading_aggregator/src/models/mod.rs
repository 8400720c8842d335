//! Domain types for reading logs and their chart projections.

pub mod chart_point;
pub mod filter;
pub mod reading;
pub mod reading_log;
