//! CSV export of summary tables, daily energy and per-device breakdowns.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{LoadSimError, Result};
use crate::sim::daily::DailyEnergy;
use crate::sim::detailed::DetailedRecord;
use crate::sim::month::Month;
use crate::sim::results::{HourlyTable, LoadResults, Statistic};

/// Suffix shared by the four summary table files.
const TABLE_FILE_SUFFIX: &str = "_system_load_values.csv";

/// Formats a percentile for file names: `90` for 90.0, `97.5` otherwise.
pub fn percentile_label(percentile: f32) -> String {
    if percentile.fract() == 0.0 {
        format!("{}", percentile as u32)
    } else {
        format!("{percentile}")
    }
}

/// File name of the table for `statistic`.
pub fn table_file_name(statistic: Statistic, percentile: f32) -> String {
    let stem = match statistic {
        Statistic::Mean => "mean".to_string(),
        Statistic::StdDev => "standard_deviation".to_string(),
        Statistic::Variability => "percentage_variability".to_string(),
        Statistic::Percentile => format!("{}_percentile", percentile_label(percentile)),
    };
    format!("{stem}{TABLE_FILE_SUFFIX}")
}

/// Writes one hour-by-month table: header `Hour,Jan,...,Dec`, then one row
/// per hour.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_table(table: &HourlyTable, writer: impl Write, decimals: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Hour"];
    header.extend(Month::ALL.iter().map(|m| m.name()));
    wtr.write_record(&header)?;

    for (hour, row) in table.rows() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(hour.to_string());
        record.extend(row.iter().map(|v| format!("{v:.decimals$}")));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Creates `path` and hands a buffered writer to `write`.
fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let file = File::create(path).map_err(|source| LoadSimError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufWriter::new(file);
    write(&mut buf)?;
    buf.flush().map_err(|source| LoadSimError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Ensures `dir` exists.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| LoadSimError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes the mean, standard deviation, variability and percentile tables
/// into `dir`, creating it if needed.
///
/// # Returns
///
/// The paths written, in that order.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn write_hourly_tables(
    results: &LoadResults,
    dir: &Path,
    decimals: usize,
) -> Result<Vec<PathBuf>> {
    ensure_dir(dir)?;
    let mut written = Vec::with_capacity(Statistic::ALL.len());
    for statistic in Statistic::ALL {
        let path = dir.join(table_file_name(statistic, results.percentile_rank));
        write_file(&path, |w| write_table(results.table(statistic), w, decimals))?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "wrote hourly load tables");
    Ok(written)
}

/// Writes one row per simulated day: month, trial, 24 hourly loads (kW) and
/// the daily sum (kWh).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_daily_energy(rows: &[DailyEnergy], writer: impl Write, decimals: usize) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["month".to_string(), "trial".to_string()];
    header.extend((0..24).map(|h| format!("hour_{h}")));
    header.push("daily_sum_kwh".to_string());
    wtr.write_record(&header)?;

    for r in rows {
        let mut record = Vec::with_capacity(header.len());
        record.push(r.month.name().to_string());
        record.push(r.trial.to_string());
        record.extend(r.hourly_kw.iter().map(|v| format!("{v:.decimals$}")));
        record.push(format!("{:.decimals$}", r.daily_sum_kwh));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the per-device breakdown:
/// `trial,device,type,month,hour,load_kwh`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_detailed(
    records: &[DetailedRecord],
    writer: impl Write,
    decimals: usize,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["trial", "device", "type", "month", "hour", "load_kwh"])?;

    for r in records {
        wtr.write_record(&[
            r.trial.to_string(),
            r.device.clone(),
            r.device_type.clone(),
            r.month.name().to_string(),
            r.hour.to_string(),
            format!("{:.decimals$}", r.load_kwh),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes [`write_daily_energy`] output to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export_daily_energy(rows: &[DailyEnergy], path: &Path, decimals: usize) -> Result<()> {
    write_file(path, |w| write_daily_energy(rows, w, decimals))?;
    info!(path = %path.display(), rows = rows.len(), "wrote daily energy");
    Ok(())
}

/// Writes [`write_detailed`] output to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn export_detailed(records: &[DetailedRecord], path: &Path, decimals: usize) -> Result<()> {
    write_file(path, |w| write_detailed(records, w, decimals))?;
    info!(path = %path.display(), rows = records.len(), "wrote detailed breakdown");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trials::MonthTrials;

    fn results() -> LoadResults {
        let trials: Vec<MonthTrials> = Month::ALL
            .iter()
            .map(|&m| {
                let mut t = MonthTrials::new(m);
                t.push([1.0; 24]);
                t.push([2.0; 24]);
                t
            })
            .collect();
        LoadResults::from_trials(&trials, 90.0)
    }

    #[test]
    fn table_header_and_rows() {
        let mut buf = Vec::new();
        write_table(&results().mean, &mut buf, 3).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 25);
        assert_eq!(lines[0], "Hour,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec");
        assert!(lines[1].starts_with("0,1.500,1.500"));
        assert!(lines[24].starts_with("23,"));
    }

    #[test]
    fn table_respects_decimals() {
        let mut buf = Vec::new();
        write_table(&results().percentile, &mut buf, 1).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        assert!(output.lines().nth(1).is_some_and(|l| l.starts_with("0,1.9,")));
    }

    #[test]
    fn file_names_follow_convention() {
        assert_eq!(
            table_file_name(Statistic::Mean, 90.0),
            "mean_system_load_values.csv"
        );
        assert_eq!(
            table_file_name(Statistic::Percentile, 90.0),
            "90_percentile_system_load_values.csv"
        );
        assert_eq!(
            table_file_name(Statistic::Percentile, 97.5),
            "97.5_percentile_system_load_values.csv"
        );
    }

    #[test]
    fn daily_energy_columns() {
        let rows = vec![DailyEnergy {
            month: Month::May,
            trial: 3,
            hourly_kw: [0.5; 24],
            daily_sum_kwh: 12.0,
        }];
        let mut buf = Vec::new();
        write_daily_energy(&rows, &mut buf, 2).ok();
        let mut rdr = csv::Reader::from_reader(buf.as_slice());
        assert_eq!(rdr.headers().map(csv::StringRecord::len).ok(), Some(27));
        let record = rdr.records().next().and_then(|r| r.ok());
        assert_eq!(record.as_ref().map(|r| &r[0]), Some("May"));
        assert_eq!(record.as_ref().map(|r| &r[26]), Some("12.00"));
    }

    #[test]
    fn detailed_columns() {
        let records = vec![DetailedRecord {
            trial: 0,
            device: "light".to_string(),
            device_type: "Domestic".to_string(),
            month: Month::Dec,
            hour: 19,
            load_kwh: 0.12,
        }];
        let mut buf = Vec::new();
        write_detailed(&records, &mut buf, 3).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("trial,device,type,month,hour,load_kwh"));
        assert_eq!(lines.next(), Some("0,light,Domestic,Dec,19,0.120"));
    }
}
