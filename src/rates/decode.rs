//! Decoding of storage rate records

use super::types::{BarSide, PriceBar};
use chrono::NaiveDateTime;
use std::io::{self, BufRead};
use thiserror::Error;

/// Field count every record must have: timestamp, 4 bid prices,
/// 4 ask prices, bid volume, ask volume
const FIELD_COUNT: usize = 11;

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Why a record line could not be decoded
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedRecord {
    /// Line did not split into exactly eleven fields
    #[error("expected {FIELD_COUNT} fields, got {0}")]
    FieldCount(usize),
    /// Timestamp deviated from `DD.MM.YYYY HH:MM:SS`
    #[error("bad timestamp {0:?}")]
    Timestamp(String),
    /// A price or volume field was not numeric after separator normalization
    #[error("bad number {value:?} in field {field}")]
    Number { field: usize, value: String },
}

/// Outcome of one read from a rate stream
#[derive(Debug, PartialEq)]
pub enum DecodeResult {
    /// A fully decoded bar
    Record(PriceBar),
    /// The stream is exhausted
    EndOfInput,
    /// The line was present but not decodable
    Malformed(MalformedRecord),
}

/// Decode one record line into a bar
///
/// Timestamps are parsed strictly against `DD.MM.YYYY HH:MM:SS` (day and
/// month may be unpadded, the clock is 24-hour). Numeric fields accept
/// either `.` or `,` as the decimal separator; `,` is normalized to `.`
/// before parsing. Anything else, including a wrong field count, is a
/// [`MalformedRecord`].
pub fn decode_line(line: &str) -> Result<PriceBar, MalformedRecord> {
    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() != FIELD_COUNT {
        return Err(MalformedRecord::FieldCount(fields.len()));
    }

    let timestamp = NaiveDateTime::parse_from_str(fields[0], TIMESTAMP_FORMAT)
        .map_err(|_| MalformedRecord::Timestamp(fields[0].to_string()))?;

    let number = |field: usize| -> Result<f64, MalformedRecord> {
        fields[field]
            .replace(',', ".")
            .parse()
            .map_err(|_| MalformedRecord::Number {
                field,
                value: fields[field].to_string(),
            })
    };

    Ok(PriceBar {
        timestamp,
        bid: BarSide {
            open: number(1)?,
            high: number(2)?,
            low: number(3)?,
            close: number(4)?,
            volume: number(9)?,
        },
        ask: BarSide {
            open: number(5)?,
            high: number(6)?,
            low: number(7)?,
            close: number(8)?,
            volume: number(10)?,
        },
    })
}

/// Line-by-line reader over a rate stream
///
/// Wraps any [`BufRead`] source and yields one [`DecodeResult`] per line.
/// The reader itself never skips lines; the caller decides whether a
/// malformed record terminates the stream (the staging pipeline stops at
/// the first one).
pub struct RateReader<R> {
    inner: R,
}

impl<R: BufRead> RateReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read and decode the next line
    ///
    /// I/O failures are real errors; end of stream and malformed content
    /// are data, not errors.
    pub fn read_next(&mut self) -> io::Result<DecodeResult> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(DecodeResult::EndOfInput);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(match decode_line(trimmed) {
            Ok(bar) => DecodeResult::Record(bar),
            Err(reason) => DecodeResult::Malformed(reason),
        })
    }
}
