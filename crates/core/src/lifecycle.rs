//! Event lifecycle resolution.
//!
//! An event's status is derived from its scheduled date at calendar-day
//! granularity: an event dated any time "today" is ongoing for the whole day.
//! "Today" is evaluated in a reference calendar passed in explicitly, so the
//! resolver depends on nothing but its arguments.

use chrono::{Duration, FixedOffset, NaiveTime};

use crate::types::Timestamp;

define_text_enum! {
    /// Temporal status of an event.
    EventStatus {
        Upcoming = "Upcoming",
        Ongoing = "Ongoing",
        Completed = "Completed",
        /// Set only by soft delete; never produced by the resolver.
        Canceled = "Canceled",
    }
}

impl EventStatus {
    /// Statuses visible on public listings and by direct id.
    pub const PUBLIC: &'static [EventStatus] = &[EventStatus::Upcoming, EventStatus::Ongoing];

    /// Whether attendees may see the event.
    pub fn is_public(self) -> bool {
        Self::PUBLIC.contains(&self)
    }

    /// Completed and canceled events never change status again on their own.
    pub fn is_terminal(self) -> bool {
        matches!(self, EventStatus::Completed | EventStatus::Canceled)
    }
}

/// Derive the status of an event scheduled at `event_date`, observed at `now`.
///
/// Same calendar day in `tz` is `Ongoing`; otherwise strictly later is
/// `Upcoming` and anything else is `Completed`.
pub fn resolve_status(event_date: Timestamp, now: Timestamp, tz: &FixedOffset) -> EventStatus {
    let event_day = event_date.with_timezone(tz).date_naive();
    let today = now.with_timezone(tz).date_naive();

    if event_day == today {
        EventStatus::Ongoing
    } else if event_date > now {
        EventStatus::Upcoming
    } else {
        EventStatus::Completed
    }
}

/// Re-derive a stored status for display. `Canceled` is sticky.
pub fn refresh_status(
    stored: EventStatus,
    event_date: Timestamp,
    now: Timestamp,
    tz: &FixedOffset,
) -> EventStatus {
    if stored == EventStatus::Canceled {
        return stored;
    }
    resolve_status(event_date, now, tz)
}

/// UTC instant at which the current calendar day in `tz` began.
///
/// Any non-canceled event dated at or after this instant resolves to
/// `Upcoming` or `Ongoing`, which lets queries filter on the date column
/// instead of a possibly stale stored status.
pub fn day_start(now: Timestamp, tz: &FixedOffset) -> Timestamp {
    let local_midnight = now.with_timezone(tz).date_naive().and_time(NaiveTime::MIN);
    (local_midnight - Duration::seconds(i64::from(tz.local_minus_utc()))).and_utc()
}

/// UTC instant at which the next calendar day in `tz` begins. Events dated at
/// or after it resolve to `Upcoming`.
pub fn next_day_start(now: Timestamp, tz: &FixedOffset) -> Timestamp {
    day_start(now, tz) + Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn same_day_later_is_ongoing() {
        let now = at(2026, 5, 10, 9, 0);
        assert_eq!(resolve_status(at(2026, 5, 10, 20, 0), now, &utc()), EventStatus::Ongoing);
    }

    #[test]
    fn same_day_earlier_is_ongoing() {
        let now = at(2026, 5, 10, 22, 0);
        assert_eq!(resolve_status(at(2026, 5, 10, 0, 1), now, &utc()), EventStatus::Ongoing);
    }

    #[test]
    fn future_day_is_upcoming() {
        let now = at(2026, 5, 10, 23, 59);
        assert_eq!(resolve_status(at(2026, 5, 11, 0, 0), now, &utc()), EventStatus::Upcoming);
        assert_eq!(
            resolve_status(now + Duration::days(10), now, &utc()),
            EventStatus::Upcoming
        );
    }

    #[test]
    fn past_day_is_completed() {
        let now = at(2026, 5, 10, 0, 0);
        assert_eq!(resolve_status(at(2026, 5, 9, 23, 59), now, &utc()), EventStatus::Completed);
    }

    #[test]
    fn calendar_day_follows_reference_offset() {
        // 23:30 UTC on the 10th and 00:30 UTC on the 11th are both the 11th at +02:00.
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = at(2026, 5, 10, 23, 30);
        let event = at(2026, 5, 11, 0, 30);

        assert_eq!(resolve_status(event, now, &plus_two), EventStatus::Ongoing);
        assert_eq!(resolve_status(event, now, &utc()), EventStatus::Upcoming);
    }

    #[test]
    fn resolver_is_a_function_of_its_inputs() {
        let now = at(2026, 1, 1, 12, 0);
        let date = at(2026, 1, 3, 12, 0);
        let first = resolve_status(date, now, &utc());
        for _ in 0..5 {
            assert_eq!(resolve_status(date, now, &utc()), first);
        }
    }

    #[test]
    fn refresh_keeps_canceled() {
        let now = at(2026, 5, 10, 9, 0);
        let date = now + Duration::days(3);
        assert_eq!(
            refresh_status(EventStatus::Canceled, date, now, &utc()),
            EventStatus::Canceled
        );
    }

    #[test]
    fn refresh_updates_stale_status() {
        let now = at(2026, 5, 10, 9, 0);
        let date = at(2026, 5, 8, 9, 0);
        assert_eq!(
            refresh_status(EventStatus::Upcoming, date, now, &utc()),
            EventStatus::Completed
        );
    }

    #[test]
    fn day_boundaries_in_reference_calendar() {
        let now = at(2026, 5, 10, 23, 30);
        assert_eq!(day_start(now, &utc()), at(2026, 5, 10, 0, 0));
        assert_eq!(next_day_start(now, &utc()), at(2026, 5, 11, 0, 0));

        // At +02:00 it is already 01:30 on the 11th; that day began 22:00 UTC on the 10th.
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_start(now, &plus_two), at(2026, 5, 10, 22, 0));
    }

    #[test]
    fn day_boundaries_agree_with_resolver() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = at(2026, 8, 1, 3, 15);
        let start = day_start(now, &tz);
        let next = next_day_start(now, &tz);
        assert_eq!(resolve_status(start, now, &tz), EventStatus::Ongoing);
        assert_eq!(resolve_status(start - Duration::seconds(1), now, &tz), EventStatus::Completed);
        assert_eq!(resolve_status(next - Duration::seconds(1), now, &tz), EventStatus::Ongoing);
        assert_eq!(resolve_status(next, now, &tz), EventStatus::Upcoming);
    }

    #[test]
    fn public_statuses() {
        assert!(EventStatus::Upcoming.is_public());
        assert!(EventStatus::Ongoing.is_public());
        assert!(!EventStatus::Completed.is_public());
        assert!(!EventStatus::Canceled.is_public());
    }
}
