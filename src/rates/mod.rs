//! Rate record codec
//!
//! Bridges two wire formats: the rate-history storage convention
//! (semicolon-delimited records, `DD.MM.YYYY HH:MM:SS` timestamps, comma or
//! dot decimal separators) and the backtesting engine's tick-history
//! convention (`HDR`/`DATA` tagged lines). The engine parses the output
//! byte-for-byte, so both directions are exact.

mod decode;
mod encode;
mod types;

pub use decode::{decode_line, DecodeResult, MalformedRecord, RateReader};
pub use encode::{write_header, write_record};
pub use types::{BarSide, PriceBar};
