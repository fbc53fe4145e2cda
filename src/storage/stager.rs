//! Weekly data staging

use super::metadata::{MetadataError, SymbolMetadata};
use super::escape_symbol;
use crate::calendar::WeekWindow;
use crate::rates::{write_header, write_record, DecodeResult, RateReader};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Result of staging one week of rate data
#[derive(Debug, PartialEq, Eq)]
pub enum StageOutcome {
    /// Week data was reformatted into the given staging file
    Staged(PathBuf),
    /// The storage has no source file for this symbol and week
    NotFound,
}

/// Failure while reformatting a week that does exist
#[derive(Debug, Error)]
pub enum StageError {
    #[error("failed to read source rates: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write staging file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Locates weekly source rate files and reformats them for the engine
///
/// The stager writes into an explicitly configured staging directory and
/// embeds the run identifier in every filename, so concurrent runs with
/// distinct identifiers never collide. Staged files are owned by the
/// caller; the stager never deletes anything it created.
#[derive(Debug, Clone)]
pub struct WeekDataStager {
    history_root: PathBuf,
    staging_dir: PathBuf,
    run_id: String,
}

impl WeekDataStager {
    pub fn new(history_root: PathBuf, staging_dir: PathBuf, run_id: String) -> Self {
        Self {
            history_root,
            staging_dir,
            run_id,
        }
    }

    /// Directory all staged artifacts for this run are written to
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Path of the source rate file backing a week, whether or not it exists
    pub fn source_path(&self, symbol: &str, window: WeekWindow) -> PathBuf {
        self.history_root
            .join(escape_symbol(symbol))
            .join(format!("{}-{}.csv", window.year(), window.week()))
    }

    /// Resolve the static metadata stored next to a symbol's rate files
    ///
    /// `Ok(None)` means the store has no entry for the symbol. A present
    /// but malformed entry is an error.
    pub fn resolve_metadata(&self, symbol: &str) -> Result<Option<SymbolMetadata>, MetadataError> {
        let path = self
            .history_root
            .join(escape_symbol(symbol))
            .join("info.json");
        if !path.exists() {
            return Ok(None);
        }
        SymbolMetadata::load(&path).map(Some)
    }

    /// Reformat one week of source data into a staging file
    ///
    /// Records are decoded until the stream ends or the first malformed
    /// record is hit; a malformed record terminates the stream rather than
    /// being skipped, so everything before it survives and everything
    /// after it is dropped. The staged file always carries one header line
    /// naming the symbol and its pip size, followed by the surviving
    /// records with volumes.
    pub fn stage_week(
        &self,
        symbol: &str,
        window: WeekWindow,
        pip_size: f64,
    ) -> Result<StageOutcome, StageError> {
        let source_path = self.source_path(symbol, window);
        let source = match File::open(&source_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StageOutcome::NotFound),
            Err(e) => return Err(StageError::Read(e)),
        };

        let staged_path = self.staging_dir.join(format!(
            "{}-{}-{}.csv",
            window.year(),
            window.week(),
            self.run_id
        ));
        std::fs::create_dir_all(&self.staging_dir).map_err(|e| StageError::Write {
            path: self.staging_dir.clone(),
            source: e,
        })?;
        let staged = File::create(&staged_path).map_err(|e| StageError::Write {
            path: staged_path.clone(),
            source: e,
        })?;
        let mut out = BufWriter::new(staged);
        let write_err = |e: io::Error| StageError::Write {
            path: staged_path.clone(),
            source: e,
        };

        write_header(&mut out, symbol, window.start, window.end, true, pip_size)
            .map_err(write_err)?;

        let mut reader = RateReader::new(BufReader::new(source));
        let mut records = 0u64;
        loop {
            match reader.read_next().map_err(StageError::Read)? {
                DecodeResult::Record(bar) => {
                    write_record(&mut out, &bar, true).map_err(write_err)?;
                    records += 1;
                }
                DecodeResult::EndOfInput => break,
                DecodeResult::Malformed(reason) => {
                    debug!(
                        source = %source_path.display(),
                        record = records + 1,
                        %reason,
                        "malformed record terminates week stream"
                    );
                    break;
                }
            }
        }
        out.flush().map_err(write_err)?;

        debug!(
            staged = %staged_path.display(),
            records,
            "staged week data"
        );
        Ok(StageOutcome::Staged(staged_path))
    }
}
