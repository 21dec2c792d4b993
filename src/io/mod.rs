//! File input and output.

/// CSV export of results.
pub mod export;
/// HOMER hourly load series.
pub mod homer;
/// Device list and utilisation profile readers.
pub mod input;
