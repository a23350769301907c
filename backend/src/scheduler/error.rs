//! Fatal precondition errors for series generation.

use crate::api::{MAX_OCCURRENCES, MIN_OCCURRENCES};

/// Result type for series generation.
pub type SeriesResult<T> = Result<T, SeriesError>;

/// Errors raised before any occurrence is persisted.
///
/// Input shape is expected to be validated upstream; this subsystem
/// re-validates because it is the last line of defense against corrupting a
/// series. Everything past the validation gate is non-fatal and surfaces
/// through logs and the reschedule summary instead.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Recurrence settings are unusable: not marked recurring, or the
    /// occurrence count is outside the supported range.
    #[error("Invalid recurring config: {0}")]
    InvalidRecurringConfig(String),

    /// The occurrence template has no end date.
    #[error("Recurring event template is missing an end date")]
    MissingEndDate,

    /// The template's timezone is not a known IANA zone name.
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}

impl SeriesError {
    pub(crate) fn count_out_of_range(count: u32) -> Self {
        SeriesError::InvalidRecurringConfig(format!(
            "occurrence count {} outside supported range [{}, {}]",
            count, MIN_OCCURRENCES, MAX_OCCURRENCES
        ))
    }

    pub(crate) fn not_recurring() -> Self {
        SeriesError::InvalidRecurringConfig("config is not marked as recurring".to_string())
    }
}
