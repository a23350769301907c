//! Wall-clock ↔ instant conversion through IANA timezones.
//!
//! Occurrences are specified as a local date plus time-of-day in the event's
//! timezone; conflict checks and storage work on UTC instants. The round trip
//! is exact for any wall-clock that exists in the given zone.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve an IANA timezone name, e.g. `Europe/Madrid`.
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}

/// Convert a local date and time-of-day to a UTC instant.
///
/// Policy for irregular local times:
/// - a wall-clock inside a DST gap (it never occurs) resolves one hour later;
/// - an ambiguous wall-clock (it occurs twice) resolves to the earlier instant.
pub fn wall_clock_to_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let local = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = local + Duration::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
                // Zones never stack two gaps back to back; treat as UTC if
                // the shifted wall-clock is somehow still invalid.
                LocalResult::None => Utc.from_utc_datetime(&local),
            }
        }
    }
}

/// Convert a UTC instant back to the local date and time-of-day in `tz`.
pub fn instant_to_wall_clock(instant: DateTime<Utc>, tz: Tz) -> (NaiveDate, NaiveTime) {
    let local = instant.with_timezone(&tz);
    (local.date_naive(), local.time())
}
