//! Chart filter selection (`day`, `week`, `month`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AggregateError;

/// Which calendar window a chart covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FilterKind {
    /// The calendar day of the reference instant, bucketed by hour.
    #[default]
    Day,
    /// Monday..Sunday around the reference instant, bucketed by ISO weekday.
    Week,
    /// The calendar month of the reference instant, bucketed by day of month.
    Month,
}

impl FilterKind {
    /// All filters in picker order.
    pub const ALL: [FilterKind; 3] = [FilterKind::Day, FilterKind::Week, FilterKind::Month];

    /// Lowercase name used in config files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKind::Day => "day",
            FilterKind::Week => "week",
            FilterKind::Month => "month",
        }
    }

    /// Picker caption shown to users.
    pub const fn caption(self) -> &'static str {
        match self {
            FilterKind::Day => "Today",
            FilterKind::Week => "This Week",
            FilterKind::Month => "This Month",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(FilterKind::Day),
            "week" => Ok(FilterKind::Week),
            "month" => Ok(FilterKind::Month),
            other => Err(AggregateError::InvalidArgument(format!(
                "unknown filter kind '{other}' (expected day, week or month)"
            ))),
        }
    }
}

impl TryFrom<String> for FilterKind {
    type Error = AggregateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
