//! Run accounting counters

/// Counter families emitted while the weekly loop runs
#[derive(Debug, Clone, Copy)]
pub enum RunCounter {
    /// Week windows visited, successful or not
    WeeksTotal,
    /// Week windows that ran through staging and invocation cleanly
    WeeksCompleted,
    /// Week windows that failed somewhere and were skipped past
    WeeksFailed,
    /// Engine processes that finished with a nonzero exit status
    EngineNonzeroExits,
}

/// Increment a run counter by one
pub fn increment(counter: RunCounter) {
    let name = match counter {
        RunCounter::WeeksTotal => "massbt_weeks_total",
        RunCounter::WeeksCompleted => "massbt_weeks_completed",
        RunCounter::WeeksFailed => "massbt_weeks_failed",
        RunCounter::EngineNonzeroExits => "massbt_engine_nonzero_exits",
    };
    metrics::counter!(name).increment(1);
}
