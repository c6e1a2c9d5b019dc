//! Time and pause-window handling.
//!
//! The journey planner returns naive wall-clock times in the transit
//! network's local zone. Every day-boundary or pause-window decision is made
//! in that fixed reference zone, never in the host's local zone, so a
//! departure at 00:30 is "tomorrow" even when it is still today in UTC.

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Local zone of the transit network.
pub const REFERENCE_TZ: Tz = chrono_tz::Europe::Paris;

/// How long before the next departure a paused coordinator resumes polling.
pub const RESUME_LEAD_MINUTES: i64 = 60;

/// Interpret a naive local time in `tz`.
///
/// Ambiguous times (the repeated hour when clocks go back) resolve to the
/// earlier instant. Times skipped when clocks go forward keep the offset in
/// force before the transition, which moves them forward by the gap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use train_traveler::domain::time::{REFERENCE_TZ, localize};
///
/// let naive = NaiveDate::from_ymd_opt(2024, 1, 10)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let local = localize(naive, REFERENCE_TZ);
/// assert_eq!(local.to_rfc3339(), "2024-01-10T08:00:00+01:00");
/// ```
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    let before = tz
        .offset_from_utc_datetime(&(naive - Duration::days(1)))
        .fix();
    let utc = naive - Duration::seconds(i64::from(before.local_minus_utc()));
    tz.from_utc_datetime(&utc)
}

/// Instant at which a coordinator paused for `next_departure_local` resumes:
/// one hour before the departure.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use train_traveler::domain::time::{REFERENCE_TZ, compute_resume_at};
///
/// let departure = NaiveDate::from_ymd_opt(2024, 1, 11)
///     .unwrap()
///     .and_hms_opt(8, 0, 0)
///     .unwrap();
/// let resume_at = compute_resume_at(departure, REFERENCE_TZ);
/// assert_eq!(resume_at.to_rfc3339(), "2024-01-11T06:00:00+00:00");
/// ```
pub fn compute_resume_at(next_departure_local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    localize(next_departure_local, tz).with_timezone(&Utc) - Duration::minutes(RESUME_LEAD_MINUTES)
}

/// Returns true while `now` has not passed `resume_at`.
///
/// Both are absolute instants, so the comparison holds in any zone.
pub fn is_still_paused(now: DateTime<Utc>, resume_at: DateTime<Utc>) -> bool {
    now <= resume_at
}

/// Returns true if `departure` falls on the calendar day after `now`, with
/// both dates taken in `tz`.
pub fn is_next_day(departure: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> bool {
    let departure_date = departure.with_timezone(&tz).date_naive();
    let today = now.with_timezone(&tz).date_naive();
    today.succ_opt() == Some(departure_date)
}
