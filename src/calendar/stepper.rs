//! Fixed-epoch weekly stepper

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// First day of history kept by the rate storage: 2000-01-01 00:00:00
fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .expect("fixed epoch date is valid")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
}

/// Produces consecutive week-start instants, seven days apart
///
/// The sequence is infinite and only ever moves forward; to restart from
/// the epoch, construct a fresh stepper. Time-of-day stays at midnight for
/// every state.
#[derive(Debug, Clone)]
pub struct WeekStepper {
    current: NaiveDateTime,
}

impl WeekStepper {
    /// Stepper positioned at the storage epoch
    pub fn new() -> Self {
        Self { current: epoch() }
    }

    /// Stepper positioned at an arbitrary start instant
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self { current: start }
    }

    /// Current week start, without advancing
    pub fn current(&self) -> NaiveDateTime {
        self.current
    }

    /// Advance by exactly seven days and return the new week start
    ///
    /// Month and year rollovers (including leap years) follow ordinary
    /// calendar normalization; this never fails.
    pub fn advance(&mut self) -> NaiveDateTime {
        self.current += Duration::days(7);
        self.current
    }
}

impl Default for WeekStepper {
    fn default() -> Self {
        Self::new()
    }
}
