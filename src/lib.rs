//! Monte Carlo electricity demand simulator for rural microgrids.
//!
//! Device ownership and hour-by-month utilisation profiles drive binomial
//! draws of how many devices are on; summing over devices gives the system
//! load of one trial, and many trials give hourly load distributions for
//! each month that energy-system tools such as HOMER or CLOVER can consume.

pub mod cli;
pub mod config;
/// Device inventory and utilisation profiles.
pub mod devices;
pub mod error;
/// File readers and writers.
pub mod io;
pub mod logging;
pub mod runner;
/// Monte Carlo engine and statistics.
pub mod sim;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
