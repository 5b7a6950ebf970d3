use crate::dates::parse_date;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

fn default_skip_weekends() -> bool {
    true
}

/// Caller-facing calendar settings.
///
/// Dates stay as strings here; [`WorkCalendar::from_config`] parses them and
/// drops the ones it cannot read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_skip_weekends")]
    pub skip_weekends: bool,
    #[serde(default)]
    pub unavailable_dates: Vec<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            skip_weekends: default_skip_weekends(),
            unavailable_dates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkCalendar {
    unavailable: HashSet<NaiveDate>,
    non_working_days: HashSet<Weekday>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::new(true, [])
    }
}

impl WorkCalendar {
    pub fn new<I>(skip_weekends: bool, unavailable_dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let non_working_days = if skip_weekends {
            HashSet::from([Weekday::Sat, Weekday::Sun])
        } else {
            HashSet::new()
        };

        Self {
            unavailable: unavailable_dates.into_iter().collect(),
            non_working_days,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        let dates = config.unavailable_dates.iter().filter_map(|raw| {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                warn!(date = %raw, "skipping unparsable unavailable date");
            }
            parsed
        });
        Self::new(config.skip_weekends, dates)
    }

    pub fn skips_weekends(&self) -> bool {
        self.non_working_days.contains(&Weekday::Sat)
            && self.non_working_days.contains(&Weekday::Sun)
    }

    /// Blackout dates, sorted
    pub fn unavailable_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.unavailable.iter().copied().collect();
        dates.sort();
        dates
    }

    pub fn add_unavailable_date(&mut self, date: NaiveDate) {
        self.unavailable.insert(date);
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !self.unavailable.contains(&date) && !self.non_working_days.contains(&date.weekday())
    }

    /// First working day strictly after `from`, or `None` past the last
    /// representable date.
    pub fn next_working_day(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.add_working_days(from, 1)
    }

    /// Step forward one calendar day at a time until `days` working days have
    /// been counted. `from` itself is never counted.
    ///
    /// Returns `None` when the walk runs off the end of the calendar.
    pub fn add_working_days(&self, from: NaiveDate, days: u32) -> Option<NaiveDate> {
        let mut current = from;
        let mut count = 0;

        while count < days {
            current = current.checked_add_days(Days::new(1))?;
            if self.is_working_day(current) {
                count += 1;
            }
        }
        Some(current)
    }

    /// Count working days in a date range (inclusive)
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;

        while current <= end {
            if self.is_working_day(current) {
                count += 1;
            }
            match current.checked_add_days(Days::new(1)) {
                Some(next) => current = next,
                None => break,
            }
        }
        count
    }
}
