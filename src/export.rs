//! CSV export of an amortization schedule.
//!
//! Output columns: `month,payment,interest,principal,balance`, header first.
//! Money fields are fixed-scale decimal strings carrying exactly as many
//! fractional digits as the schedule's precision.

use crate::error::Result;
use crate::schedule::{PeriodRow, Schedule};
use csv::Writer;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialized form of a [`PeriodRow`].
#[derive(Debug, Serialize)]
struct CsvRecord {
    month: u32,
    #[serde(with = "rust_decimal::serde::str")]
    payment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    principal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    balance: Decimal,
}

impl CsvRecord {
    fn from_row(row: &PeriodRow, schedule: &Schedule) -> Self {
        let precision = schedule.precision();
        let fixed = |value: f64| precision.to_decimal(value).unwrap_or_default();
        CsvRecord {
            month: row.period,
            payment: fixed(row.payment),
            interest: fixed(row.interest),
            principal: fixed(row.principal),
            balance: fixed(row.balance),
        }
    }
}

/// Writes `schedule` as CSV to `writer`.
pub fn write_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    for row in schedule {
        csv_writer.serialize(CsvRecord::from_row(row, schedule))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `schedule` as CSV to the file at `path`, replacing it if present.
pub fn export_csv_file<P: AsRef<Path>>(schedule: &Schedule, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(schedule, BufWriter::new(file))?;
    debug!("Wrote {} periods to {}", schedule.len(), path.display());
    Ok(())
}
