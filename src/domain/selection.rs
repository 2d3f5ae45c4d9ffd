use chrono::NaiveDate;

use crate::domain::slots;
use crate::domain::time_of_day::TimeOfDay;

/// The user's in-progress booking choice for a single session day.
///
/// Every transition is total: bad input is clamped or ignored, never an error.
/// Any edit of start, end or headcount clears the availability flag and bumps
/// `revision`, which remote calls carry so late replies can be recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    date: NaiveDate,
    start_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
    headcount: Option<u32>,
    room_available: bool,
    revision: u64,
}

impl SelectionState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: None,
            end_time: None,
            headcount: None,
            room_available: false,
            revision: 0,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> Option<TimeOfDay> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<TimeOfDay> {
        self.end_time
    }

    pub fn headcount(&self) -> Option<u32> {
        self.headcount
    }

    pub fn room_available(&self) -> bool {
        self.room_available
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_start_time(&mut self, start: TimeOfDay) {
        self.start_time = Some(start);

        // Drop an end time the new start no longer offers.
        if let Some(end) = self.end_time
            && !slots::end_options(Some(start)).any(|slot| slot == end)
        {
            self.end_time = None;
        }
        self.touch();
    }

    /// Returns false, leaving the state untouched, when there is no start yet
    /// or `end` is not strictly after it.
    pub fn set_end_time(&mut self, end: TimeOfDay) -> bool {
        match self.start_time {
            Some(start) if end > start => {
                self.end_time = Some(end);
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Parses raw headcount text. Anything unparsable or below one becomes one.
    pub fn set_headcount(&mut self, raw: &str) -> u32 {
        let headcount = parse_headcount(raw);
        self.headcount = Some(headcount);
        self.touch();
        headcount
    }

    pub fn mark_availability(&mut self, available: bool) {
        self.room_available = available;
    }

    pub fn reset(&mut self) {
        self.start_time = None;
        self.end_time = None;
        self.headcount = None;
        self.touch();
    }

    pub fn is_submittable(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some() && self.headcount.is_some()
    }

    pub fn is_creatable(&self) -> bool {
        self.is_submittable() && self.room_available
    }

    fn touch(&mut self) {
        self.room_available = false;
        self.revision += 1;
    }
}

fn parse_headcount(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => 1,
    }
}
