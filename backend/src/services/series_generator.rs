//! Recurring-series generation service.
//!
//! Drives the whole generation pipeline: validate the recurrence settings,
//! plan nominal dates, resolve and persist each occurrence in order, run the
//! append pass for occurrences the initial window could not place, then
//! dispatch the best-effort reschedule summary.
//!
//! Generation is strictly sequential by design: every conflict check and
//! persistence call is awaited before the next occurrence starts, so
//! occurrences persisted earlier in the call are visible to later conflict
//! checks and siblings cannot slip into the same slot.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use chrono_tz::Tz;
use log::{debug, error, info, warn};

use crate::api::{
    Actor, AutoRescheduled, EventId, MovedOccurrence, OccurrenceFields, OccurrenceTemplate,
    RecurringConfig, SeriesGenerationResult, SkippedOccurrence, MAX_OCCURRENCES, MIN_OCCURRENCES,
};
use crate::db::repository::{EventRepository, UserDirectory};
use crate::models::time;
use crate::notify::{EmailSender, RescheduleNotifier, SystemMessageSender};
use crate::scheduler::{
    nominal_date, NominalOccurrence, SchedulerConfig, SeriesError, SeriesResult, SlotResolver,
};

/// An occurrence the main pass could not place within the initial window.
struct PendingOccurrence {
    index: u32,
    nominal: NominalOccurrence,
}

/// Series generation entry point with its injected collaborators.
///
/// Constructed once at the composition root; holds no mutable state of its
/// own, so one instance serves any number of sequential generation calls.
pub struct SeriesService {
    events: Arc<dyn EventRepository>,
    users: Arc<dyn UserDirectory>,
    messages: Arc<dyn SystemMessageSender>,
    email: Arc<dyn EmailSender>,
    config: SchedulerConfig,
}

impl SeriesService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserDirectory>,
        messages: Arc<dyn SystemMessageSender>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self::with_config(events, users, messages, email, SchedulerConfig::default())
    }

    pub fn with_config(
        events: Arc<dyn EventRepository>,
        users: Arc<dyn UserDirectory>,
        messages: Arc<dyn SystemMessageSender>,
        email: Arc<dyn EmailSender>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            events,
            users,
            messages,
            email,
            config,
        }
    }

    /// Generate the remaining occurrences of a recurring series.
    ///
    /// `first_event_id` is the already-persisted anchor occurrence; it is
    /// seeded into the result without a conflict check. Occurrences 2..=N are
    /// planned, resolved against the store, and persisted one at a time. An
    /// occurrence with no free slot in the initial window is deferred to the
    /// append pass; one with no free slot up to the safety ceiling is left
    /// out of the series and reported as skipped.
    ///
    /// # Errors
    /// [`SeriesError::InvalidRecurringConfig`], [`SeriesError::MissingEndDate`],
    /// and [`SeriesError::InvalidTimezone`] are raised before any occurrence
    /// is persisted. All later failures are localized: they are logged,
    /// reflected in the reschedule summary where an occurrence is lost, and
    /// never abort the call.
    pub async fn generate_recurring_series(
        &self,
        recurring: &RecurringConfig,
        template: &OccurrenceTemplate,
        first_event_id: EventId,
        actor: &Actor,
    ) -> SeriesResult<SeriesGenerationResult> {
        let tz = validate(recurring, template)?;
        let duration_days = template.duration_days();

        info!(
            "Generating {} {} occurrences of \"{}\" from {}",
            recurring.occurrence_count, recurring.frequency, template.title, template.base_date
        );

        let resolver = SlotResolver::new(self.events.as_conflict_query());
        let mut scheduled: Vec<(u32, EventId)> = vec![(1, first_event_id)];
        let mut moved: Vec<MovedOccurrence> = Vec::new();
        let mut skipped: Vec<SkippedOccurrence> = Vec::new();
        let mut pending: Vec<PendingOccurrence> = Vec::new();

        // Main pass: offsets 0..initial_window_days, persisting as we go so
        // each occurrence's booking is visible to the next one's check.
        for index in 2..=recurring.occurrence_count {
            let nominal =
                plan_occurrence(template, recurring, index, duration_days, tz);

            match resolver
                .resolve_within(&nominal, &[], self.config.max_initial_offset())
                .await
            {
                Some(slot) => {
                    match self
                        .persist_at(template, index, &nominal, slot.offset_days)
                        .await
                    {
                        Some(id) => {
                            scheduled.push((index, id));
                            if slot.offset_days > 0 {
                                moved.push(moved_record(&nominal, index, slot.offset_days));
                            }
                        }
                        None => skipped.push(skipped_record(&nominal, index)),
                    }
                }
                None => {
                    debug!(
                        "Occurrence {} of \"{}\" has no free slot within {} days; deferring",
                        index, template.title, self.config.initial_window_days
                    );
                    pending.push(PendingOccurrence { index, nominal });
                }
            }
        }

        // Append pass: retry deferred occurrences beyond the initial window,
        // now against the more complete set of scheduled siblings.
        for deferred in pending {
            let PendingOccurrence { index, nominal } = deferred;
            match resolver
                .resolve_extended(
                    &nominal,
                    &[],
                    self.config.initial_window_days as i64,
                    self.config.max_extended_offset(),
                )
                .await
            {
                Some(slot) => {
                    match self
                        .persist_at(template, index, &nominal, slot.offset_days)
                        .await
                    {
                        Some(id) => {
                            scheduled.push((index, id));
                            moved.push(moved_record(&nominal, index, slot.offset_days));
                        }
                        None => skipped.push(skipped_record(&nominal, index)),
                    }
                }
                None => {
                    warn!(
                        "Series \"{}\" is short one occurrence: index {} ({}) has no free slot \
                         within {} days",
                        template.title,
                        index,
                        nominal.start_date,
                        self.config.append_ceiling_days
                    );
                    skipped.push(skipped_record(&nominal, index));
                }
            }
        }

        // Append-pass resolutions were persisted out of order; report ids in
        // occurrence-index order like the adjustment records.
        scheduled.sort_by_key(|(index, _)| *index);
        let series_ids = scheduled.into_iter().map(|(_, id)| id).collect();
        moved.sort_by_key(|record| record.index);
        skipped.sort_by_key(|record| record.index);
        let adjustments = AutoRescheduled { moved, skipped };
        let result = SeriesGenerationResult {
            success: true,
            series_ids,
            first_event_id,
            auto_rescheduled: (!adjustments.is_empty()).then_some(adjustments),
        };

        // Best-effort; runs after all persistence and never alters the result.
        if result.auto_rescheduled.is_some() {
            RescheduleNotifier::new(
                self.users.as_ref(),
                self.messages.as_ref(),
                self.email.as_ref(),
            )
            .notify(&result, template, actor)
            .await;
        }

        Ok(result)
    }

    /// Persist one occurrence at the given offset from its nominal date.
    ///
    /// Returns `None` on persistence failure (logged; the caller records the
    /// occurrence as skipped and continues).
    async fn persist_at(
        &self,
        template: &OccurrenceTemplate,
        index: u32,
        nominal: &NominalOccurrence,
        offset_days: i64,
    ) -> Option<EventId> {
        let fields = occurrence_fields(template, index, nominal, offset_days);
        match self.events.persist_occurrence(&fields).await {
            Ok(id) => {
                if offset_days > 0 {
                    info!(
                        "Occurrence {} of \"{}\" rescheduled from {} to {} (offset {} days)",
                        index, template.title, nominal.start_date, fields.start_date, offset_days
                    );
                }
                Some(id)
            }
            Err(e) => {
                error!(
                    "Failed to persist occurrence {} of \"{}\": {}",
                    index, template.title, e
                );
                None
            }
        }
    }
}

/// Validation gate. Runs before any side effect; on error the caller must not
/// assume any occurrence was created.
fn validate(recurring: &RecurringConfig, template: &OccurrenceTemplate) -> SeriesResult<Tz> {
    if !recurring.is_recurring {
        return Err(SeriesError::not_recurring());
    }
    if !(MIN_OCCURRENCES..=MAX_OCCURRENCES).contains(&recurring.occurrence_count) {
        return Err(SeriesError::count_out_of_range(recurring.occurrence_count));
    }
    if template.base_end_date.is_none() {
        return Err(SeriesError::MissingEndDate);
    }
    time::parse_timezone(&template.timezone)
        .ok_or_else(|| SeriesError::InvalidTimezone(template.timezone.clone()))
}

fn plan_occurrence(
    template: &OccurrenceTemplate,
    recurring: &RecurringConfig,
    index: u32,
    duration_days: i64,
    tz: Tz,
) -> NominalOccurrence {
    let start_date = nominal_date(template.base_date, recurring.frequency, index);
    let end_date = add_days(start_date, duration_days);
    NominalOccurrence {
        start_date,
        end_date,
        start_time: template.start_time,
        end_time: template.end_time,
        tz,
    }
}

fn occurrence_fields(
    template: &OccurrenceTemplate,
    index: u32,
    nominal: &NominalOccurrence,
    offset_days: i64,
) -> OccurrenceFields {
    OccurrenceFields {
        title: template.title.clone(),
        description: template.description.clone(),
        location: template.location.clone(),
        start_date: add_days(nominal.start_date, offset_days),
        end_date: add_days(nominal.end_date, offset_days),
        start_time: template.start_time,
        end_time: template.end_time,
        timezone: template.timezone.clone(),
        organizer: template.organizer,
        co_organizers: template.co_organizers.clone(),
        series_index: index,
    }
}

fn moved_record(nominal: &NominalOccurrence, index: u32, offset_days: i64) -> MovedOccurrence {
    MovedOccurrence {
        index,
        original_date: nominal.start_date,
        new_date: add_days(nominal.start_date, offset_days),
        offset_days,
    }
}

fn skipped_record(nominal: &NominalOccurrence, index: u32) -> SkippedOccurrence {
    SkippedOccurrence {
        index,
        original_date: nominal.start_date,
    }
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    debug_assert!(days >= 0, "occurrences only ever shift forward");
    date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
}
