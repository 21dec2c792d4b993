//! Device inventory: device types, utilisation profiles, built-in catalogs.

/// Built-in device catalogs.
pub mod catalog;
mod device;
pub mod inventory;
/// Hour-by-month on-probabilities.
pub mod profile;

pub use device::Device;
pub use inventory::{DeviceEntry, DeviceInventory};
pub use profile::UtilisationProfile;
