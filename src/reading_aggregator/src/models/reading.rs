//! A single logged blood-glucose event and the identity that owns it.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::AggregateError;

/// One logged blood-glucose event with optional meal/insulin context.
///
/// `timestamp` is the wall clock the user entered; no time zone is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Glucose level as entered (mg/dL or mmol/L; the log does not convert).
    pub glucose_level: f64,
    /// Wall-clock instant of the reading.
    pub timestamp: NaiveDateTime,
    /// Whether the user had eaten before the reading.
    pub has_eaten: bool,
    /// Whether insulin was injected.
    pub has_insulin: bool,
    /// Injected units; only meaningful when `has_insulin` is true.
    pub insulin_units: Option<f64>,
}

impl Reading {
    /// A reading with no meal or insulin context.
    pub fn new(glucose_level: f64, timestamp: NaiveDateTime) -> Self {
        Self {
            glucose_level,
            timestamp,
            has_eaten: false,
            has_insulin: false,
            insulin_units: None,
        }
    }

    /// Set the meal flag.
    pub fn with_meal(mut self, has_eaten: bool) -> Self {
        self.has_eaten = has_eaten;
        self
    }

    /// Mark insulin as injected, with the number of units if known.
    pub fn with_insulin(mut self, units: Option<f64>) -> Self {
        self.has_insulin = true;
        self.insulin_units = units;
        self
    }

    /// Units to display, or `None` when no insulin was taken.
    ///
    /// Stored documents sometimes carry units next to a `false` insulin flag;
    /// those units are ignored.
    pub fn effective_insulin_units(&self) -> Option<f64> {
        if self.has_insulin {
            self.insulin_units
        } else {
            None
        }
    }

    /// Check that the reading can be appended to a log.
    pub fn validate(&self) -> Result<(), AggregateError> {
        if !self.glucose_level.is_finite() || self.glucose_level < 0.0 {
            return Err(AggregateError::InvalidReading(format!(
                "glucose level must be a non-negative number, got {}",
                self.glucose_level
            )));
        }
        match self.insulin_units {
            Some(_) if !self.has_insulin => Err(AggregateError::InvalidReading(
                "insulin units given without an insulin injection".into(),
            )),
            Some(u) if !u.is_finite() || u < 0.0 => Err(AggregateError::InvalidReading(format!(
                "insulin units must be a non-negative number, got {u}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Identity of a pre-authenticated user. The aggregator never checks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier supplied by the auth provider.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parsing trims whitespace and rejects empty ids (CLI and config input).
impl FromStr for UserId {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(AggregateError::InvalidArgument("user id cannot be empty".into()));
        }
        Ok(Self(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(7, 30, 0)
            .unwrap()
    }

    #[test]
    fn builder_sets_context() {
        let r = Reading::new(6.1, ts()).with_meal(true).with_insulin(Some(4.0));
        assert!(r.has_eaten);
        assert!(r.has_insulin);
        assert_eq!(r.effective_insulin_units(), Some(4.0));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn units_without_flag_are_ignored_and_rejected() {
        let mut r = Reading::new(6.1, ts());
        r.insulin_units = Some(3.0);
        assert_eq!(r.effective_insulin_units(), None);
        assert!(matches!(r.validate(), Err(AggregateError::InvalidReading(_))));
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(Reading::new(f64::NAN, ts()).validate().is_err());
        assert!(Reading::new(-1.0, ts()).validate().is_err());
        assert!(
            Reading::new(5.0, ts())
                .with_insulin(Some(f64::INFINITY))
                .validate()
                .is_err()
        );
        // flag without a recorded amount is allowed
        assert!(Reading::new(5.0, ts()).with_insulin(None).validate().is_ok());
    }

    #[test]
    fn user_id_parsing() {
        assert_eq!("  abc ".parse::<UserId>().unwrap().as_str(), "abc");
        assert!("   ".parse::<UserId>().is_err());
    }
}
