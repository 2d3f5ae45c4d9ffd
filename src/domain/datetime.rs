// Combining the session date with a picked slot into an absolute instant.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

use crate::domain::ports::LocalZone;
use crate::domain::time_of_day::TimeOfDay;

/// Wall-clock `time` on `date` in `zone`, as a UTC instant. Seconds are zero.
pub fn combine(date: NaiveDate, time: TimeOfDay, zone: &dyn LocalZone) -> DateTime<Utc> {
    zone.to_utc(date.and_time(time.to_naive_time()))
}

/// Resolves a local wall-clock reading in `tz` to UTC.
///
/// An ambiguous reading (clocks going back) picks the earlier instant. A reading
/// inside a spring-forward gap keeps the offset from just before the gap, which
/// moves it forward by the gap length.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => at.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Gaps are at most a few hours; find the offset in force before it.
            let before = (1..=24)
                .map(|hours| local - TimeDelta::hours(hours))
                .find_map(|probe| tz.from_local_datetime(&probe).earliest());
            match before {
                Some(probe) => {
                    let offset = probe.offset().fix().local_minus_utc();
                    (local - TimeDelta::seconds(i64::from(offset))).and_utc()
                }
                None => local.and_utc(),
            }
        }
    }
}

/// Renders an instant the way the booking backend expects: millisecond
/// precision with a trailing `Z`.
pub fn to_wire(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
