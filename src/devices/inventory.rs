//! The set of device types simulated for one community.

use std::collections::BTreeSet;

use super::device::Device;
use super::profile::UtilisationProfile;
use crate::error::{LoadSimError, Result};
use crate::sim::month::Month;

/// A device together with its utilisation profile.
#[derive(Debug, Clone)]
pub struct DeviceEntry {
    pub device: Device,
    pub profile: UtilisationProfile,
}

/// Ordered collection of device types with unique names.
///
/// Order is significant: the engine draws random numbers device by device,
/// so reordering the inventory changes individual trials (not their
/// distribution).
#[derive(Debug, Clone, Default)]
pub struct DeviceInventory {
    entries: Vec<DeviceEntry>,
}

impl DeviceInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a device and its profile.
    ///
    /// # Errors
    ///
    /// Returns [`LoadSimError::DeviceList`] if a device with the same name
    /// is already present.
    pub fn push(&mut self, device: Device, profile: UtilisationProfile) -> Result<()> {
        if self.get(&device.name).is_some() {
            return Err(LoadSimError::DeviceList {
                path: "<inventory>".into(),
                message: format!("duplicate device \"{}\"", device.name),
            });
        }
        self.entries.push(DeviceEntry { device, profile });
        Ok(())
    }

    /// Looks up an entry by device name.
    pub fn get(&self, name: &str) -> Option<&DeviceEntry> {
        self.entries.iter().find(|e| e.device.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[DeviceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct device categories, sorted.
    pub fn device_types(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .map(|e| e.device.device_type.as_str())
            .collect()
    }

    /// Installed capacity: sum of `owned * power` over all devices (kW).
    pub fn connected_load_kw(&self) -> f32 {
        self.entries
            .iter()
            .map(|e| e.device.owned() as f32 * e.device.power_kw())
            .sum()
    }

    /// Analytical expected daily energy for `month` (kWh), the value the
    /// Monte Carlo mean converges to.
    pub fn expected_daily_energy_kwh(&self, month: Month) -> f32 {
        self.entries
            .iter()
            .map(|e| {
                e.device.owned() as f32 * e.device.power_kw() * e.profile.expected_daily_hours(month)
            })
            .sum()
    }
}
