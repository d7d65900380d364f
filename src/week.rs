//! Local calendar week boundaries
//!
//! The goal week runs Sunday through Saturday in the user's local zone. All
//! date math in the crate happens on `chrono::NaiveDate` values: dates never
//! carry a time-of-day, so there is no UTC/local shift to guard against.
//! "Today" enters the system exactly once, at the CLI boundary, via
//! `Local::now().date_naive()`.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive date range scoping one goal week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// Most recent Sunday on or before the anchor date
    pub start: NaiveDate,

    /// Upper bound, inclusive: the anchor for progress windows, the
    /// following Saturday for full-week windows
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Full Sunday..Saturday week containing `date`.
    ///
    /// Used for week-over-week comparisons and week-close evaluation.
    pub fn containing(date: NaiveDate) -> Self {
        let start = week_start(date);
        // Sunday + 6 days is always representable within chrono's range
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        WeekWindow { start, end }
    }

    /// Week-so-far window: most recent Sunday through `today` inclusive.
    ///
    /// Used for progress queries, where future days must not count.
    pub fn to_date(today: NaiveDate) -> Self {
        WeekWindow {
            start: week_start(today),
            end: today,
        }
    }

    /// Whether a date falls inside this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Most recent Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(days_from_sunday))
        .unwrap_or(date)
}
