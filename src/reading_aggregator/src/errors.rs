//! Error type shared by validation and aggregation.

use thiserror::Error;

/// Errors raised while validating or aggregating reading data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    /// A parallel sequence in a stored document does not line up with the
    /// glucose sequence.
    #[error("Data integrity violation: `{field}` has {actual} entries, expected {expected}")]
    DataIntegrity {
        /// Document field name as stored (e.g. `times`).
        field: &'static str,
        /// Length of `bloodSugarLevels`.
        expected: usize,
        /// Length of the offending field.
        actual: usize,
    },

    /// A caller-supplied argument is outside the accepted set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A reading carries values that cannot be logged.
    #[error("Invalid reading: {0}")]
    InvalidReading(String),
}
