//! Calendar windows for chart filters.
//!
//! - Day: the calendar date of the reference; buckets are hours `0..=23`.
//! - Week: Monday through Sunday around the reference; buckets are ISO
//!   weekdays `1..=7` (Mon=1, Sun=7). A Sunday reference closes its week.
//! - Month: the calendar month of the reference; buckets are days
//!   `1..=days_in_month`.
//!
//! Membership compares calendar dates only, so a reading at 23:59 on the
//! window's last day is inside.

use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::models::filter::FilterKind;

/// Number of days in `month` (1..=12) of `year`, leap years included.
///
/// Returns 0 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 0,
    }
}

/// The inclusive date range a chart covers, plus its bucket mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartWindow {
    kind: FilterKind,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl ChartWindow {
    /// The window of `kind` that contains `reference`.
    pub fn containing(kind: FilterKind, reference: NaiveDateTime) -> Self {
        let today = reference.date();
        let (first_day, last_day) = match kind {
            FilterKind::Day => (today, today),
            FilterKind::Week => {
                let back = u64::from(today.weekday().number_from_monday() - 1);
                let monday = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
                let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
                (monday, sunday)
            }
            FilterKind::Month => {
                let first = today.with_day(1).expect("day 1 exists in every month");
                let len = days_in_month(today.year(), today.month());
                let last = first
                    .checked_add_days(Days::new(u64::from(len - 1)))
                    .unwrap_or(NaiveDate::MAX);
                (first, last)
            }
        };
        Self {
            kind,
            first_day,
            last_day,
        }
    }

    /// Filter this window was computed for.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// First calendar day inside the window.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last calendar day inside the window.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// True if `ts` falls on a day inside the window.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let day = ts.date();
        self.first_day <= day && day <= self.last_day
    }

    /// Bucket for `ts`, or `None` when it falls outside the window.
    pub fn bucket_of(&self, ts: NaiveDateTime) -> Option<u32> {
        if !self.contains(ts) {
            return None;
        }
        Some(match self.kind {
            FilterKind::Day => ts.hour(),
            FilterKind::Week => ts.weekday().number_from_monday(),
            FilterKind::Month => ts.day(),
        })
    }

    /// Every bucket the window can produce (the chart's x-axis domain).
    pub fn bucket_domain(&self) -> RangeInclusive<u32> {
        match self.kind {
            FilterKind::Day => 0..=23,
            FilterKind::Week => 1..=7,
            FilterKind::Month => 1..=days_in_month(self.first_day.year(), self.first_day.month()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn noon(y: i32, m: u32, day: u32) -> NaiveDateTime {
        d(y, m, day).and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn week_of_wednesday_runs_monday_to_sunday() {
        // 2024-05-15 is a Wednesday
        let w = ChartWindow::containing(FilterKind::Week, noon(2024, 5, 15));
        assert_eq!(w.first_day(), d(2024, 5, 13));
        assert_eq!(w.last_day(), d(2024, 5, 19));
    }

    #[test]
    fn sunday_reference_closes_its_week() {
        let w = ChartWindow::containing(FilterKind::Week, noon(2024, 5, 19));
        assert_eq!(w.first_day(), d(2024, 5, 13));
        assert_eq!(w.last_day(), d(2024, 5, 19));
    }

    #[test]
    fn week_spanning_month_and_year_boundary() {
        // 2025-01-01 is a Wednesday
        let w = ChartWindow::containing(FilterKind::Week, noon(2025, 1, 1));
        assert_eq!(w.first_day(), d(2024, 12, 30));
        assert_eq!(w.last_day(), d(2025, 1, 5));
        assert_eq!(w.bucket_of(noon(2024, 12, 30)), Some(1));
    }

    #[test]
    fn month_window_and_domain() {
        let w = ChartWindow::containing(FilterKind::Month, noon(2024, 2, 15));
        assert_eq!(w.first_day(), d(2024, 2, 1));
        assert_eq!(w.last_day(), d(2024, 2, 29));
        assert_eq!(w.bucket_domain(), 1..=29);
        assert_eq!(w.bucket_of(noon(2024, 3, 1)), None);
    }

    #[test]
    fn last_minute_of_day_is_inside() {
        let w = ChartWindow::containing(FilterKind::Day, noon(2024, 6, 1));
        let late = d(2024, 6, 1).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(w.bucket_of(late), Some(23));
        assert_eq!(w.bucket_of(d(2024, 6, 2).and_hms_opt(0, 0, 0).unwrap()), None);
        assert_eq!(w.bucket_domain(), 0..=23);
    }
}
