// Quarter-hour slot generation for the start and end pickers.

use std::iter::FusedIterator;

use chrono::{NaiveTime, Timelike};

use crate::domain::time_of_day::{LAST_SLOT_MINUTES, SLOT_MINUTES, TimeOfDay};

/// Lazy, ascending run of slots from a lower bound through 23:45.
///
/// Cloning restarts from the current position, so the same options can be
/// walked more than once without regenerating them.
#[derive(Debug, Clone)]
pub struct Slots {
    // Next candidate in minutes since midnight; past the last slot means exhausted.
    next: u16,
}

impl Slots {
    fn from_minutes(lower_bound: u16) -> Self {
        Self { next: lower_bound }
    }

    /// A run with no slots left.
    pub fn empty() -> Self {
        Self {
            next: LAST_SLOT_MINUTES + SLOT_MINUTES,
        }
    }
}

impl Iterator for Slots {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = TimeOfDay::from_minutes(self.next)?;
        self.next += SLOT_MINUTES;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next > LAST_SLOT_MINUTES {
            0
        } else {
            usize::from((LAST_SLOT_MINUTES - self.next) / SLOT_MINUTES + 1)
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slots {}

impl FusedIterator for Slots {}

/// Start options: every slot from the next quarter-hour boundary at or after
/// `now` through 23:45. Empty once the day has no bookable start left.
pub fn start_options(now: NaiveTime) -> Slots {
    // Work in total minutes so a rounded-up minute of 60 carries into the next hour.
    let minute = now.minute() as u16;
    let rounded = minute.div_ceil(SLOT_MINUTES) * SLOT_MINUTES;
    Slots::from_minutes(now.hour() as u16 * 60 + rounded)
}

/// End options for a chosen start: every slot strictly after it through 23:45.
/// An unset start has no end options.
pub fn end_options(start: Option<TimeOfDay>) -> Slots {
    match start {
        Some(start) => Slots::from_minutes(start.minutes_since_midnight() + SLOT_MINUTES),
        None => Slots::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid clock time")
    }

    fn slot(text: &str) -> TimeOfDay {
        text.parse().expect("valid slot")
    }

    #[test]
    fn when_now_is_between_quarters_then_first_start_rounds_up() {
        let first = start_options(at(10, 7)).next();
        assert_eq!(first, Some(slot("10.15")));
    }

    #[test]
    fn when_now_rounds_to_sixty_then_start_carries_into_next_hour() {
        let first = start_options(at(10, 50)).next();
        assert_eq!(first, Some(slot("11.00")));
    }

    #[test]
    fn when_now_is_on_a_boundary_then_it_is_the_first_start() {
        let options: Vec<_> = start_options(at(23, 30)).collect();
        assert_eq!(options, vec![slot("23.30"), slot("23.45")]);
    }

    #[test]
    fn when_now_is_midnight_then_whole_day_is_offered() {
        let options = start_options(at(0, 0));
        assert_eq!(options.len(), 96);
        assert_eq!(options.clone().next(), Some(slot("00.00")));
        assert_eq!(options.last(), Some(slot("23.45")));
    }

    #[test]
    fn when_now_is_past_last_slot_then_start_options_are_empty() {
        assert_eq!(start_options(at(23, 46)).next(), None);
        assert_eq!(start_options(at(23, 59)).len(), 0);
    }

    #[test]
    fn when_first_minute_rounds_then_every_start_matches_the_ceiling() {
        for minute in 0..60 {
            let first = start_options(at(9, minute)).next().expect("slots remain");
            let expected = (minute + 14) / 15 * 15;
            let expected_minutes = 9 * 60 + expected as u16;
            assert_eq!(first.minutes_since_midnight(), expected_minutes, "minute {minute}");
        }
    }

    #[test]
    fn when_start_is_set_then_end_options_follow_it_strictly() {
        let start = slot("09.45");
        let options: Vec<_> = end_options(Some(start)).collect();

        assert_eq!(options.first(), Some(&slot("10.00")));
        assert_eq!(options.last(), Some(&slot("23.45")));
        assert!(options.iter().all(|end| *end > start));
        assert!(options.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn when_start_is_last_slot_then_end_options_are_empty() {
        assert_eq!(end_options(Some(slot("23.45"))).next(), None);
    }

    #[test]
    fn when_start_is_unset_then_end_options_are_empty() {
        assert_eq!(end_options(None).len(), 0);
    }

    #[test]
    fn when_slots_are_cloned_then_iteration_restarts_from_same_point() {
        let mut options = end_options(Some(slot("23.00")));
        options.next();
        let rest: Vec<_> = options.clone().collect();
        let again: Vec<_> = options.collect();
        assert_eq!(rest, vec![slot("23.30"), slot("23.45")]);
        assert_eq!(rest, again);
    }
}
