//! Job-descriptor XML writer
//!
//! The schema is fixed and flat, and the engine's reader is whitespace
//! sensitive, so the document is written line by line instead of going
//! through a DOM builder.

use super::BacktestProject;
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn xml_date(at: NaiveDateTime) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// Serialize a project descriptor to `path`
///
/// Monetary amounts (`initial-amount`, `mmr`) are rendered with exactly
/// two decimal places; every other number uses its shortest decimal form.
pub fn write_project(project: &BacktestProject, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
    writeln!(out, "<project>")?;
    writeln!(out, " <simplified-format value=\"1\"/>")?;
    writeln!(out, " <strategy value=\"{}\"/>", project.strategy)?;
    writeln!(
        out,
        " <date-from value=\"{}\"/>",
        xml_date(project.window.start)
    )?;
    writeln!(out, " <date-to value=\"{}\"/>", xml_date(project.window.end))?;
    writeln!(
        out,
        " <account-currency value=\"{}\"/>",
        project.account_currency
    )?;
    writeln!(
        out,
        " <initial-amount value=\"{:.2}\"/>",
        project.initial_amount
    )?;
    writeln!(
        out,
        " <default-period value=\"{}\"/>",
        project.default_period
    )?;
    writeln!(
        out,
        " <account-lot-size value=\"{}\"/>",
        project.account_lot_size
    )?;
    writeln!(out, " <instruments>")?;
    for instrument in &project.instruments {
        let meta = &instrument.metadata;
        write!(out, " <instrument name=\"{}\"", meta.name)?;
        if let Some(prices) = &instrument.prices_file {
            write!(out, " filename=\"{}\"", prices.display())?;
        }
        writeln!(out, ">")?;
        writeln!(out, " <mmr value=\"{:.2}\"/>", meta.mmr)?;
        writeln!(out, " <pipSize value=\"{}\"/>", meta.pip_size)?;
        writeln!(out, " <precision value=\"{}\"/>", meta.precision)?;
        writeln!(
            out,
            " <contractCurrency value=\"{}\"/>",
            meta.contract_currency
        )?;
        writeln!(out, " <profitCurrency value=\"{}\"/>", meta.profit_currency)?;
        writeln!(
            out,
            " <contractMultiplier value=\"{}\"/>",
            meta.contract_multiplier
        )?;
        writeln!(out, " <baseUnitSize value=\"{}\"/>", meta.base_unit_size)?;
        writeln!(out, " <instrumentType value=\"{}\"/>", meta.instrument_type)?;
        writeln!(out, " </instrument>")?;
    }
    writeln!(out, " </instruments>")?;
    writeln!(out, " <strategy-params>")?;
    for param in &project.strategy_params {
        writeln!(
            out,
            " <strategy-param id=\"{}\" value=\"{}\"/>",
            param.id, param.value
        )?;
    }
    writeln!(out, " </strategy-params>")?;
    writeln!(out, " </project>")?;
    out.flush()
}
