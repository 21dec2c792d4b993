//! Hourly time series for HOMER-style load import.
//!
//! HOMER accepts a primary load as a plain text file with one kW value per
//! line for each of the 8760 hours of a non-leap year. The series is built
//! by repeating, for every day of a month, that month's 24-hour profile from
//! a summary table.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{LoadSimError, Result};
use crate::sim::month::Month;
use crate::sim::results::HourlyTable;

/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Expands an hour-by-month table into an 8760-value hourly series starting
/// at 1 January 00:00.
pub fn annual_series(table: &HourlyTable) -> Vec<f32> {
    let mut series = Vec::with_capacity(HOURS_PER_YEAR);
    for month in Month::ALL {
        let day = table.month_column(month);
        for _ in 0..month.days() {
            series.extend_from_slice(&day);
        }
    }
    series
}

/// Writes the annual series, one value per line, no header.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_series(table: &HourlyTable, mut writer: impl Write, decimals: usize) -> Result<()> {
    for v in annual_series(table) {
        writeln!(writer, "{v:.decimals$}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the annual series to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_series(table: &HourlyTable, path: &Path, decimals: usize) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|source| LoadSimError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_series(table, std::io::BufWriter::new(file), decimals)?;
    info!(path = %path.display(), hours = HOURS_PER_YEAR, "wrote HOMER load series");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> HourlyTable {
        let mut t = HourlyTable::default();
        for month in Month::ALL {
            for hour in 0..24 {
                t.set(hour, month, month.index() as f32 + hour as f32 / 100.0);
            }
        }
        t
    }

    #[test]
    fn series_covers_one_year() {
        assert_eq!(annual_series(&table()).len(), HOURS_PER_YEAR);
    }

    #[test]
    fn series_switches_month_on_calendar_boundary() {
        let s = annual_series(&table());
        // last hour of 31 January, then first hour of 1 February
        assert!((s[31 * 24 - 1] - 0.23).abs() < 1e-6);
        assert!((s[31 * 24] - 1.0).abs() < 1e-6);
        // 31 December 23:00
        assert!((s[HOURS_PER_YEAR - 1] - 11.23).abs() < 1e-5);
    }

    #[test]
    fn writes_one_line_per_hour() {
        let mut buf = Vec::new();
        write_series(&table(), &mut buf, 2).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        assert_eq!(output.lines().count(), HOURS_PER_YEAR);
        assert_eq!(output.lines().next(), Some("0.00"));
    }
}
