//! Price bar types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLC plus volume for one side of the book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSide {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// One minute-bar observation with separate bid and ask sides
///
/// Produced by the decoder and consumed immediately by the encoder; bars
/// are never persisted on their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: NaiveDateTime,
    pub bid: BarSide,
    pub ask: BarSide,
}
