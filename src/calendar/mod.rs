//! Weekly calendar arithmetic
//!
//! The whole pipeline is partitioned into fixed 7-day windows starting from
//! a fixed epoch. Windows are calendar-naive: no timezone, no alignment to
//! ISO week boundaries, time-of-day pinned at midnight.

mod stepper;
mod window;

pub use stepper::WeekStepper;
pub use window::{week_of_year, WeekWindow};
