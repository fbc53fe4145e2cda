//! Rate-history storage access
//!
//! The storage root holds one directory per symbol (pair separator
//! stripped, `EUR/USD` -> `EURUSD`) containing `info.json` metadata and
//! one `<year>-<week>.csv` rate file per week of history.

mod metadata;
mod stager;

pub use metadata::{MetadataError, SymbolMetadata};
pub use stager::{StageError, StageOutcome, WeekDataStager};

/// Strip the pair separator so a symbol can be used as a path segment
pub(crate) fn escape_symbol(symbol: &str) -> String {
    symbol.replace('/', "")
}
