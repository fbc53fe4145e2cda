//! Backtest job descriptor
//!
//! One descriptor is built per week window, serialized to XML for the
//! engine, and discarded together with its staged artifacts after the
//! invocation.

mod serializer;

pub use serializer::write_project;

use crate::calendar::WeekWindow;
use crate::storage::SymbolMetadata;
use std::path::PathBuf;

/// One instrument entry of a job descriptor
#[derive(Debug, Clone)]
pub struct InstrumentSpec {
    pub metadata: SymbolMetadata,
    /// Staged tick-history file for the week, when staging produced one
    pub prices_file: Option<PathBuf>,
}

/// A named strategy parameter passed through to the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyParameter {
    pub id: String,
    pub value: String,
}

/// Everything the engine needs to run one week of one strategy
#[derive(Debug, Clone)]
pub struct BacktestProject {
    pub strategy: String,
    pub window: WeekWindow,
    pub account_currency: String,
    pub initial_amount: f64,
    pub default_period: String,
    pub account_lot_size: i64,
    pub instruments: Vec<InstrumentSpec>,
    pub strategy_params: Vec<StrategyParameter>,
}
