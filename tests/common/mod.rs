//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use load_sim::devices::{Device, DeviceInventory, UtilisationProfile};
use load_sim::sim::engine::Engine;
use load_sim::sim::types::SimConfig;

/// Simulation configuration with `trials` per month, P90, seed 42.
pub fn config(trials: usize) -> SimConfig {
    SimConfig::new(trials, 90.0, 42)
}

/// Ten 100 W lamps at 50% duty plus two 1 kW pumps that are never on, and
/// one unavailable appliance.
///
/// Expected hourly mean is 0.5 kW in every hour of every month.
pub fn half_on_inventory() -> DeviceInventory {
    let mut inv = DeviceInventory::new();
    inv.push(
        Device::new("Lamp", true, 10, 100.0, "Domestic"),
        UtilisationProfile::constant(0.5),
    )
    .expect("unique device");
    inv.push(
        Device::new("Pump", true, 2, 1000.0, "Productive"),
        UtilisationProfile::zeros(),
    )
    .expect("unique device");
    inv.push(
        Device::new("Freezer", false, 4, 300.0, "Domestic"),
        UtilisationProfile::constant(1.0),
    )
    .expect("unique device");
    inv
}

/// Engine over [`half_on_inventory`].
pub fn half_on_engine(trials: usize) -> Engine {
    Engine::new(config(trials), half_on_inventory())
}

/// Twelve comma-separated copies of `p`, one profile row.
fn profile_row(p: f32) -> String {
    vec![p.to_string(); 12].join(",")
}

/// Writes a device list and utilisation profiles in the on-disk input
/// format. Returns `(device_list, profiles_dir)`.
///
/// Lights are on from 18:00 to 22:00 every day; the radio plays with
/// probability 0.25 all day; the fridge is unavailable and has no profile.
pub fn write_inputs(root: &Path) -> (PathBuf, PathBuf) {
    let device_list = root.join("Device list.csv");
    fs::write(
        &device_list,
        "Device,Available,Number,Power (W),Type\n\
         Light,Y,20,10,Domestic\n\
         Radio,y,4,5,Domestic\n\
         Fridge,N,1,150,Commercial\n",
    )
    .expect("write device list");

    let profiles = root.join("Utilisation profiles");
    fs::create_dir_all(&profiles).expect("create profiles dir");

    let light: Vec<String> = (0..24)
        .map(|h| profile_row(if (18..22).contains(&h) { 1.0 } else { 0.0 }))
        .collect();
    fs::write(profiles.join("Light_times.csv"), light.join("\n")).expect("write light profile");

    let radio: Vec<String> = (0..24).map(|_| profile_row(0.25)).collect();
    fs::write(profiles.join("Radio_times.csv"), radio.join("\n")).expect("write radio profile");

    (device_list, profiles)
}
