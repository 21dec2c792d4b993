//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::sim::month::Month;
use crate::sim::summary::LoadSummary;
use crate::sim::types::SimConfig;

/// Run parameters and headline figures.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub config: SimConfig,
    pub summary: LoadSummary,
}

/// Query for `/profiles`.
///
/// `statistic` defaults to `mean`; without `month` all twelve months are
/// returned.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub statistic: Option<String>,
    pub month: Option<String>,
}

/// One cell of a summary table.
#[derive(Debug, Serialize)]
pub struct ProfileRecord {
    pub month: Month,
    pub hour: usize,
    /// kW for load statistics; a ratio for variability.
    pub value: f32,
}

/// Error body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
