//! Public API surface for the series-generation backend.
//!
//! This file consolidates the ID newtypes and DTO types exchanged with the
//! caller and with the injected collaborators. All types derive
//! Serialize/Deserialize for JSON serialization.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Event identifier (database primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub i64);

/// User identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl EventId {
    pub fn new(value: i64) -> Self {
        EventId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl UserId {
    pub fn new(value: i64) -> Self {
        UserId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}
impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Series cadence between consecutive occurrences.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "BIWEEKLY")]
    Biweekly,
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "BIMONTHLY")]
    Bimonthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Biweekly => write!(f, "BIWEEKLY"),
            Frequency::Monthly => write!(f, "MONTHLY"),
            Frequency::Bimonthly => write!(f, "BIMONTHLY"),
        }
    }
}

/// Recurrence settings supplied by the event creator.
///
/// Valid iff `is_recurring` is set and `occurrence_count` lies in
/// `[MIN_OCCURRENCES, MAX_OCCURRENCES]`. Frequency validity is enforced by the
/// [`Frequency`] type; unknown cadence strings fail deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringConfig {
    pub is_recurring: bool,
    pub frequency: Frequency,
    pub occurrence_count: u32,
}

/// Smallest series a recurring config may request (the anchor plus one).
pub const MIN_OCCURRENCES: u32 = 2;
/// Largest series a recurring config may request.
pub const MAX_OCCURRENCES: u32 = 24;

/// The field set shared by every occurrence in a series.
///
/// Immutable input; only the date fields are recomputed per occurrence. The
/// base duration in days (`base_end_date - base_date`) is preserved when an
/// occurrence is shifted, so multi-day events stay multi-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceTemplate {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub base_date: NaiveDate,
    pub base_end_date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// IANA timezone name, e.g. `Europe/Berlin`.
    pub timezone: String,
    pub organizer: UserId,
    #[serde(default)]
    pub co_organizers: Vec<UserId>,
}

impl OccurrenceTemplate {
    /// Length of one occurrence in whole days (0 for a single-day event).
    pub fn duration_days(&self) -> i64 {
        self.base_end_date
            .map(|end| (end - self.base_date).num_days().max(0))
            .unwrap_or(0)
    }
}

/// Fully-specified payload handed to the injected persister for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub timezone: String,
    pub organizer: UserId,
    pub co_organizers: Vec<UserId>,
    /// 1-based position within the series.
    pub series_index: u32,
}

/// Reference to an already-scheduled event returned by the conflict query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingEventRef {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// An occurrence that was shifted forward to avoid a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedOccurrence {
    pub index: u32,
    pub original_date: NaiveDate,
    pub new_date: NaiveDate,
    /// Forward displacement in whole days; always > 0.
    pub offset_days: i64,
}

/// An occurrence that could not be placed and was left out of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOccurrence {
    pub index: u32,
    pub original_date: NaiveDate,
}

/// Summary of every adjustment made during one generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoRescheduled {
    pub moved: Vec<MovedOccurrence>,
    pub skipped: Vec<SkippedOccurrence>,
}

impl AutoRescheduled {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.skipped.is_empty()
    }
}

/// Outcome of one series-generation call.
///
/// `series_ids` always starts with `first_event_id` and is ordered by
/// occurrence index, regardless of the order occurrences were persisted in.
/// Its length may be less than the requested occurrence count when some
/// occurrences were permanently unschedulable (those appear in
/// `auto_rescheduled.skipped`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesGenerationResult {
    pub success: bool,
    pub series_ids: Vec<EventId>,
    pub first_event_id: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rescheduled: Option<AutoRescheduled>,
}

/// The user on whose behalf generation runs; attributed on system messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub username: String,
}
