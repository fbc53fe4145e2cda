//! Week window type and week numbering

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A `[start, end)` interval covering exactly seven days
///
/// One window corresponds to one staged data file and one engine
/// invocation. Windows are immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    /// Inclusive start of the window (midnight)
    pub start: NaiveDateTime,
    /// Exclusive end of the window, always `start + 7 days`
    pub end: NaiveDateTime,
}

impl WeekWindow {
    /// Build the window that begins at `start`
    pub fn starting(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + Duration::days(7),
        }
    }

    /// Calendar year of the window start
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Week number of the window start, see [`week_of_year`]
    pub fn week(&self) -> u32 {
        week_of_year(self.start)
    }
}

/// Week number used to address source files: day-of-year / 7, one-based
///
/// Days 1-7 of the year are week 1, days 8-14 are week 2, and so on. This
/// is plain integer division over the day of year, not ISO-8601 week
/// numbering, and it must stay that way because the storage layout encodes
/// these numbers in filenames.
pub fn week_of_year(at: NaiveDateTime) -> u32 {
    at.date().ordinal0() / 7 + 1
}
