//! Per-symbol static metadata

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Static trading attributes of one symbol, loaded from `info.json`
///
/// Every field is optional in the store; absent keys take the documented
/// defaults (empty string, zero, false). A key that is present with the
/// wrong JSON type is an error, not a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct SymbolMetadata {
    pub name: String,
    pub provider: Option<String>,
    pub contract_currency: String,
    pub profit_currency: String,
    pub base_unit_size: f64,
    pub contract_multiplier: f64,
    pub instrument_type: i32,
    #[serde(rename = "MMR")]
    pub mmr: f64,
    pub pip_size: f64,
    pub precision: i32,
    pub margin_enabled: bool,
    pub without_history: bool,
    pub end_of_history_reached: bool,
}

/// Failure to load a symbol's metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed metadata: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SymbolMetadata {
    /// Load metadata from a JSON file
    ///
    /// The file is expected to exist; existence checks belong to the
    /// caller, which knows whether "missing" is an error.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
