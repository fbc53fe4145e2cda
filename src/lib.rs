//! mass-backtester: batch driver for an external FX backtesting engine
//!
//! This library provides the core components for:
//! - Weekly iteration over historical rate data from a fixed epoch
//! - Decoding locale-tolerant delimited rate records into price bars
//! - Re-encoding bars into the engine's tick-history format
//! - Per-symbol metadata resolution from a JSON store
//! - Job-descriptor XML generation
//! - Subprocess invocation of the engine with bounded wait
//! - Success/failure accounting across the whole history

pub mod calendar;
pub mod cli;
pub mod config;
pub mod engine;
pub mod orchestrator;
pub mod project;
pub mod rates;
pub mod storage;
pub mod telemetry;
