//! Nominal-date planning for recurring series.
//!
//! Pure cadence arithmetic: given the base occurrence's date and the series
//! frequency, compute the unshifted date each occurrence index falls on.
//! Start/end times and timezone are carried unchanged from the template; only
//! the date component varies per occurrence.

use chrono::{Days, Months, NaiveDate};

use crate::api::Frequency;

/// Compute the nominal (unshifted) date for `index` (1-based).
///
/// Index 1 is the base date itself. Biweekly advances 14 days per step;
/// monthly and bimonthly advance calendar months. When the base day-of-month
/// does not exist in a target month (e.g. the 31st advancing into April), the
/// date clamps to that month's last day rather than rolling over, so the
/// series keeps the organizer's end-of-month rhythm.
pub fn nominal_date(base: NaiveDate, frequency: Frequency, index: u32) -> NaiveDate {
    debug_assert!(index >= 1, "occurrence indices are 1-based");
    let steps = index.saturating_sub(1);
    match frequency {
        Frequency::Biweekly => base
            .checked_add_days(Days::new(14 * steps as u64))
            .unwrap_or(base),
        Frequency::Monthly => base
            .checked_add_months(Months::new(steps))
            .unwrap_or(base),
        Frequency::Bimonthly => base
            .checked_add_months(Months::new(2 * steps))
            .unwrap_or(base),
    }
}
