//! Encoding of bars into the engine's tick-history format

use super::types::PriceBar;
use chrono::NaiveDateTime;
use std::io::{self, Write};

/// Engine-side timestamp rendering: no zero padding on day, month or hour
const ENGINE_TIMESTAMP_FORMAT: &str = "%-d.%-m.%Y %-H:%M:%S";

fn engine_timestamp(at: NaiveDateTime) -> String {
    at.format(ENGINE_TIMESTAMP_FORMAT).to_string()
}

/// Write the single `HDR` line that opens a staged tick-history file
///
/// Layout: `HDR;<instrument>;<from>;<to>;m1;<0|1 has_volume>;<pip_size>`.
/// The instrument is the symbol whose data follows, e.g. `EUR/USD`.
pub fn write_header<W: Write>(
    out: &mut W,
    instrument: &str,
    from: NaiveDateTime,
    to: NaiveDateTime,
    has_volume: bool,
    pip_size: f64,
) -> io::Result<()> {
    writeln!(
        out,
        "HDR;{};{};{};m1;{};{}",
        instrument,
        engine_timestamp(from),
        engine_timestamp(to),
        u8::from(has_volume),
        pip_size
    )
}

/// Write one `DATA` line for a bar
///
/// Prices and volumes use the shortest decimal representation that
/// round-trips, so `113.3` stays `113.3` rather than `113.30`. Volumes are
/// appended only when `has_volume` is set, matching the header flag.
pub fn write_record<W: Write>(out: &mut W, bar: &PriceBar, has_volume: bool) -> io::Result<()> {
    write!(
        out,
        "DATA;{};{};{};{};{};{};{};{};{}",
        engine_timestamp(bar.timestamp),
        bar.bid.open,
        bar.bid.high,
        bar.bid.low,
        bar.bid.close,
        bar.ask.open,
        bar.ask.high,
        bar.ask.low,
        bar.ask.close
    )?;
    if has_volume {
        write!(out, ";{};{}", bar.bid.volume, bar.ask.volume)?;
    }
    writeln!(out)
}
