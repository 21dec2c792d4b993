//! Readers for the device list and utilisation profile CSV files.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::devices::{Device, DeviceInventory, UtilisationProfile};
use crate::error::{LoadSimError, Result};

/// One row of the device list, as written by a spreadsheet.
#[derive(Debug, Deserialize)]
struct DeviceRow {
    #[serde(rename = "Device")]
    device: String,
    #[serde(rename = "Available")]
    available: String,
    #[serde(rename = "Number")]
    number: f64,
    #[serde(rename = "Power (W)")]
    power_w: f32,
    #[serde(rename = "Type", default)]
    device_type: String,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| LoadSimError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn list_error(path: &Path, message: String) -> LoadSimError {
    LoadSimError::DeviceList {
        path: path.to_path_buf(),
        message,
    }
}

/// Parses device list CSV from any reader.
///
/// Required columns are `Device`, `Available`, `Number`, `Power (W)` and
/// `Type`; any other columns are ignored. `path` is only used in error
/// messages.
///
/// # Errors
///
/// Returns an error on malformed CSV, an `Available` value other than
/// `Y`/`N`, a negative or fractional `Number`, a negative power, or a
/// duplicate device name.
pub fn parse_device_list(reader: impl Read, path: &Path) -> Result<Vec<Device>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut devices: Vec<Device> = Vec::new();

    for (i, row) in rdr.deserialize::<DeviceRow>().enumerate() {
        let row = row.map_err(|source| LoadSimError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = i + 2;

        let available = match row.available.to_ascii_uppercase().as_str() {
            "Y" => true,
            "N" => false,
            other => {
                return Err(list_error(
                    path,
                    format!("line {line}: Available must be Y or N, got \"{other}\""),
                ));
            }
        };
        if row.number < 0.0 || row.number.fract() != 0.0 || row.number > f64::from(u32::MAX) {
            return Err(list_error(
                path,
                format!(
                    "line {line}: Number must be a non-negative whole number, got {}",
                    row.number
                ),
            ));
        }
        if !row.power_w.is_finite() || row.power_w < 0.0 {
            return Err(list_error(
                path,
                format!("line {line}: Power (W) must be >= 0, got {}", row.power_w),
            ));
        }
        if devices.iter().any(|d| d.name == row.device) {
            return Err(list_error(
                path,
                format!("line {line}: duplicate device \"{}\"", row.device),
            ));
        }

        devices.push(Device::new(
            row.device,
            available,
            row.number as u32,
            row.power_w,
            row.device_type,
        ));
    }

    Ok(devices)
}

/// Reads the device list CSV at `path`.
///
/// # Errors
///
/// See [`parse_device_list`]; also fails if the file cannot be opened.
pub fn read_device_list(path: &Path) -> Result<Vec<Device>> {
    parse_device_list(open(path)?, path)
}

/// Parses a headerless 24 x 12 utilisation profile from any reader.
///
/// One trailing empty cell per row is dropped, as spreadsheets often end
/// every exported line with a comma.
///
/// # Errors
///
/// Returns [`LoadSimError::Profile`] for non-numeric cells or a wrongly
/// shaped grid, and [`LoadSimError::Csv`] for unreadable CSV.
pub fn parse_profile(reader: impl Read, device: &str, path: &Path) -> Result<UtilisationProfile> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::with_capacity(24);
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| LoadSimError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let cells: Vec<&str> = record.iter().collect();
        let cells = match cells.split_last() {
            Some((&"", rest)) => rest,
            _ => &cells[..],
        };
        let mut row = Vec::with_capacity(cells.len());
        for (j, &cell) in cells.iter().enumerate() {
            let value = cell.parse::<f32>().map_err(|_| LoadSimError::Profile {
                device: device.to_string(),
                message: format!("row {i}, column {j}: \"{cell}\" is not a number"),
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    UtilisationProfile::from_rows(&rows).map_err(|message| LoadSimError::Profile {
        device: device.to_string(),
        message,
    })
}

/// Path of the utilisation profile for `device`.
pub fn profile_path(profiles_dir: &Path, device: &str, suffix: &str) -> PathBuf {
    profiles_dir.join(format!("{device}{suffix}"))
}

/// Reads the device list and every device's utilisation profile.
///
/// A missing profile is tolerated for unavailable devices (they never draw
/// load) and is an error for available ones.
///
/// # Errors
///
/// Propagates any file, CSV or validation error.
pub fn read_inventory(
    device_list: &Path,
    profiles_dir: &Path,
    suffix: &str,
) -> Result<DeviceInventory> {
    let devices = read_device_list(device_list)?;
    let mut inventory = DeviceInventory::new();

    for device in devices {
        let path = profile_path(profiles_dir, &device.name, suffix);
        let profile = if !device.available && !path.exists() {
            debug!(device = %device.name, "unavailable device has no profile, using zeros");
            UtilisationProfile::zeros()
        } else {
            parse_profile(open(&path)?, &device.name, &path)?
        };
        inventory.push(device, profile)?;
    }

    info!(
        devices = inventory.len(),
        path = %device_list.display(),
        "loaded device inventory"
    );
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "\
Device,Available,Number,Power (W),Type,Notes
light,Y,20,6,Domestic,LED
tv, n ,3,60,Domestic,
mill,Y,1.0,2200,Commercial,diesel replacement
";

    fn profile_csv(p: f32) -> String {
        let row = vec![format!("{p}"); 12].join(",");
        let mut s = String::new();
        for _ in 0..24 {
            s.push_str(&row);
            s.push('\n');
        }
        s
    }

    #[test]
    fn parses_device_list() {
        let devices = parse_device_list(LIST.as_bytes(), Path::new("list.csv"));
        let devices = devices.ok().unwrap_or_default();
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].name, "light");
        assert_eq!(devices[0].owned(), 20);
        assert!(!devices[1].available);
        assert_eq!(devices[1].owned(), 0);
        assert_eq!(devices[2].number, 1);
        assert_eq!(devices[2].device_type, "Commercial");
    }

    #[test]
    fn rejects_bad_available_flag() {
        let csv = "Device,Available,Number,Power (W),Type\nlight,maybe,2,5,Domestic\n";
        let err = parse_device_list(csv.as_bytes(), Path::new("list.csv")).unwrap_err();
        assert!(err.to_string().contains("Available must be Y or N"));
    }

    #[test]
    fn rejects_fractional_number() {
        let csv = "Device,Available,Number,Power (W),Type\nlight,Y,2.5,5,Domestic\n";
        assert!(parse_device_list(csv.as_bytes(), Path::new("list.csv")).is_err());
    }

    #[test]
    fn rejects_duplicate_device() {
        let csv = "Device,Available,Number,Power (W),Type\na,Y,1,5,X\na,Y,1,5,X\n";
        let err = parse_device_list(csv.as_bytes(), Path::new("list.csv")).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_missing_column() {
        let csv = "Device,Available,Number,Type\na,Y,1,X\n";
        let err = parse_device_list(csv.as_bytes(), Path::new("list.csv")).unwrap_err();
        assert!(matches!(err, LoadSimError::Csv { .. }));
    }

    #[test]
    fn parses_profile_grid() {
        let csv = profile_csv(0.25);
        let profile = parse_profile(csv.as_bytes(), "light", Path::new("p.csv")).ok();
        assert_eq!(
            profile.map(|p| p.probability(10, crate::sim::month::Month::Aug)),
            Some(0.25)
        );
    }

    #[test]
    fn rejects_non_numeric_profile_cell() {
        let csv = profile_csv(0.25).replacen("0.25", "high", 1);
        let err = parse_profile(csv.as_bytes(), "light", Path::new("p.csv")).unwrap_err();
        assert!(matches!(err, LoadSimError::Profile { .. }));
    }

    #[test]
    fn accepts_trailing_comma_on_each_row() {
        let csv: String = profile_csv(0.4)
            .lines()
            .map(|line| format!("{line},\n"))
            .collect();
        let profile = parse_profile(csv.as_bytes(), "light", Path::new("p.csv"));
        assert!(profile.is_ok(), "trailing commas should parse: {:?}", profile.err());
        assert_eq!(
            profile.ok().map(|p| p.probability(23, crate::sim::month::Month::Dec)),
            Some(0.4)
        );
    }

    #[test]
    fn rejects_empty_cell_inside_row() {
        let csv = profile_csv(0.4).replacen("0.4,", ",", 1);
        assert!(parse_profile(csv.as_bytes(), "light", Path::new("p.csv")).is_err());
    }

    #[test]
    fn rejects_short_profile() {
        let csv: String = profile_csv(0.1).lines().take(12).collect::<Vec<_>>().join("\n");
        let err = parse_profile(csv.as_bytes(), "light", Path::new("p.csv")).unwrap_err();
        assert!(err.to_string().contains("24 rows"));
    }

    #[test]
    fn profile_path_appends_suffix() {
        let p = profile_path(Path::new("profiles"), "light", "_times.csv");
        assert_eq!(p, PathBuf::from("profiles/light_times.csv"));
    }
}
