/// Daily energy per trial and monthly spread.
pub mod daily;
/// Per-device breakdown records and grouping.
pub mod detailed;
pub mod engine;
/// Calendar months.
pub mod month;
pub mod results;
/// Binomial draws.
pub mod sampler;
pub mod stats;
pub mod summary;
pub mod trials;
pub mod types;
