//! Built-in device catalogs for running without input files.

use super::device::Device;
use super::inventory::DeviceInventory;
use super::profile::UtilisationProfile;
use crate::error::Result;
use crate::sim::month::MONTHS_PER_YEAR;
use crate::sim::types::{HOURS_PER_DAY, HourlyLoad};

/// Names accepted by [`builtin`].
pub const BUILTIN_CATALOGS: &[&str] = &["village", "household"];

/// Returns the named built-in inventory, or `None` if the name is unknown.
///
/// # Errors
///
/// Propagates inventory construction errors (none occur for the shipped
/// catalogs).
pub fn builtin(name: &str) -> Option<Result<DeviceInventory>> {
    match name {
        "village" => Some(village()),
        "household" => Some(household()),
        _ => None,
    }
}

/// Flat probability `base` with `peak` over the half-open hour ranges given.
fn shape(base: f32, peaks: &[(usize, usize, f32)]) -> HourlyLoad {
    let mut hourly = [base; HOURS_PER_DAY];
    for &(start, end, p) in peaks {
        for cell in hourly.iter_mut().take(end.min(HOURS_PER_DAY)).skip(start) {
            *cell = p;
        }
    }
    hourly
}

const FLAT_YEAR: [f32; MONTHS_PER_YEAR] = [1.0; MONTHS_PER_YEAR];

// Longer evenings in the northern winter months.
const LIGHTING_SEASON: [f32; MONTHS_PER_YEAR] =
    [1.15, 1.1, 1.0, 0.95, 0.9, 0.85, 0.85, 0.9, 0.95, 1.0, 1.1, 1.15];

// Pre-monsoon heat peaks in May and June.
const COOLING_SEASON: [f32; MONTHS_PER_YEAR] =
    [0.1, 0.2, 0.5, 0.9, 1.0, 1.0, 0.8, 0.8, 0.7, 0.5, 0.2, 0.1];

// Irrigation demand is highest in the dry season.
const PUMPING_SEASON: [f32; MONTHS_PER_YEAR] =
    [0.8, 0.9, 1.0, 1.2, 1.3, 1.1, 0.5, 0.4, 0.5, 0.7, 0.8, 0.8];

fn lighting() -> UtilisationProfile {
    UtilisationProfile::from_shape(
        &shape(0.02, &[(5, 7, 0.3), (18, 19, 0.6), (19, 22, 0.8), (22, 23, 0.3)]),
        &LIGHTING_SEASON,
    )
}

fn phone_charging() -> UtilisationProfile {
    UtilisationProfile::from_shape(&shape(0.05, &[(8, 18, 0.1), (18, 23, 0.35)]), &FLAT_YEAR)
}

fn radio() -> UtilisationProfile {
    UtilisationProfile::from_shape(
        &shape(0.0, &[(6, 9, 0.3), (12, 14, 0.2), (18, 22, 0.4)]),
        &FLAT_YEAR,
    )
}

fn television() -> UtilisationProfile {
    UtilisationProfile::from_shape(&shape(0.0, &[(12, 14, 0.1), (19, 23, 0.6)]), &FLAT_YEAR)
}

fn fan() -> UtilisationProfile {
    UtilisationProfile::from_shape(
        &shape(0.3, &[(6, 11, 0.4), (11, 17, 0.7), (17, 23, 0.5)]),
        &COOLING_SEASON,
    )
}

fn water_pump() -> UtilisationProfile {
    UtilisationProfile::from_shape(&shape(0.0, &[(6, 9, 0.5), (16, 18, 0.4)]), &PUMPING_SEASON)
}

fn street_light() -> UtilisationProfile {
    UtilisationProfile::from_shape(&shape(1.0, &[(6, 18, 0.0)]), &FLAT_YEAR)
}

/// A village of roughly sixty households with shops and public services.
fn village() -> Result<DeviceInventory> {
    let mut inv = DeviceInventory::new();
    inv.push(Device::new("light", true, 180, 5.0, "Domestic"), lighting())?;
    inv.push(Device::new("phone", true, 90, 5.0, "Domestic"), phone_charging())?;
    inv.push(Device::new("radio", true, 30, 10.0, "Domestic"), radio())?;
    inv.push(Device::new("television", true, 15, 60.0, "Domestic"), television())?;
    inv.push(Device::new("fan", true, 25, 50.0, "Domestic"), fan())?;
    inv.push(
        Device::new("refrigerator", true, 3, 150.0, "Commercial"),
        UtilisationProfile::constant(0.4),
    )?;
    inv.push(Device::new("water_pump", true, 2, 750.0, "Commercial"), water_pump())?;
    inv.push(Device::new("street_light", true, 8, 40.0, "Public"), street_light())?;
    inv.push(
        Device::new("computer", false, 2, 100.0, "Public"),
        UtilisationProfile::zeros(),
    )?;
    Ok(inv)
}

/// A single off-grid household, useful for small quick runs.
fn household() -> Result<DeviceInventory> {
    let mut inv = DeviceInventory::new();
    inv.push(Device::new("light", true, 4, 5.0, "Domestic"), lighting())?;
    inv.push(Device::new("phone", true, 2, 5.0, "Domestic"), phone_charging())?;
    inv.push(Device::new("radio", true, 1, 10.0, "Domestic"), radio())?;
    inv.push(Device::new("fan", true, 1, 50.0, "Domestic"), fan())?;
    Ok(inv)
}
