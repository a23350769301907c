//! Conflict-aware slot resolution.
//!
//! For one nominal occurrence, scan candidate start days in ascending offset
//! order and pick the first day whose interval has no overlapping bookings.
//! The scan only ever moves forward: shifting an occurrence earlier than the
//! organizer asked for is never acceptable. Offsets are applied to the
//! wall-clock date with the time-of-day unchanged, then converted through the
//! event's timezone, so a shift across a DST boundary keeps the local start
//! time.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use log::warn;

use crate::api::EventId;
use crate::db::repository::ConflictQuery;
use crate::models::time;

/// A nominal occurrence's wall-clock coordinates.
#[derive(Debug, Clone, Copy)]
pub struct NominalOccurrence {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub tz: Tz,
}

/// A conflict-free candidate produced by the resolver.
///
/// `offset_days` is the forward displacement in whole days from the
/// occurrence's nominal start; 0 means no reschedule was needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub offset_days: i64,
}

impl NominalOccurrence {
    /// Candidate interval at a forward offset, or `None` if the shifted date
    /// falls outside the calendar's representable range.
    fn slot_at(&self, offset_days: i64) -> Option<CandidateSlot> {
        let shift = Days::new(offset_days as u64);
        let start_date = self.start_date.checked_add_days(shift)?;
        let end_date = self.end_date.checked_add_days(shift)?;
        Some(CandidateSlot {
            start: time::wall_clock_to_instant(start_date, self.start_time, self.tz),
            end: time::wall_clock_to_instant(end_date, self.end_time, self.tz),
            offset_days,
        })
    }
}

/// Searches forward from an occurrence's nominal day for a conflict-free slot.
pub struct SlotResolver<'a> {
    conflicts: &'a dyn ConflictQuery,
}

impl<'a> SlotResolver<'a> {
    pub fn new(conflicts: &'a dyn ConflictQuery) -> Self {
        Self { conflicts }
    }

    /// Search the initial bounded window: offsets `0..=max_offset` ascending.
    ///
    /// Returns the first conflict-free slot, or `None` when the occurrence is
    /// unschedulable within the window. Conflict hits whose id appears in
    /// `exclude` are ignored (series generation passes an empty list so
    /// siblings count against each other; rescheduling an existing event
    /// excludes that event itself).
    pub async fn resolve_within(
        &self,
        occurrence: &NominalOccurrence,
        exclude: &[EventId],
        max_offset: i64,
    ) -> Option<CandidateSlot> {
        self.scan(occurrence, exclude, 0, max_offset).await
    }

    /// Append-pass search: continue the day-by-day scan from `from_offset` up
    /// to the safety `ceiling` (both inclusive).
    pub async fn resolve_extended(
        &self,
        occurrence: &NominalOccurrence,
        exclude: &[EventId],
        from_offset: i64,
        ceiling: i64,
    ) -> Option<CandidateSlot> {
        self.scan(occurrence, exclude, from_offset, ceiling).await
    }

    async fn scan(
        &self,
        occurrence: &NominalOccurrence,
        exclude: &[EventId],
        from_offset: i64,
        to_offset: i64,
    ) -> Option<CandidateSlot> {
        for offset in from_offset..=to_offset {
            let Some(slot) = occurrence.slot_at(offset) else {
                continue;
            };
            if self.is_free(&slot, exclude).await {
                return Some(slot);
            }
        }
        None
    }

    /// A failed conflict lookup counts as "occupied": the slot may be taken,
    /// so the scan moves on rather than risking a double booking.
    async fn is_free(&self, slot: &CandidateSlot, exclude: &[EventId]) -> bool {
        match self
            .conflicts
            .find_conflicting_events(slot.start, slot.end)
            .await
        {
            Ok(hits) => hits.iter().all(|hit| exclude.contains(&hit.id)),
            Err(e) => {
                warn!(
                    "Conflict query failed for candidate at offset {} ({} – {}): {}",
                    slot.offset_days, slot.start, slot.end, e
                );
                false
            }
        }
    }
}
