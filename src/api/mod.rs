//! REST API over the results of a completed simulation.
//!
//! Provides three GET endpoints:
//! - `/summary`: simulation config and headline figures
//! - `/profiles`: hourly values of one summary table, optionally one month
//! - `/daily`: daily energy box statistics per month

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::runner::SimulationRun;
use crate::sim::daily::MonthDailyStats;
use crate::sim::results::LoadResults;
use crate::sim::summary::LoadSummary;
use crate::sim::types::SimConfig;

pub use types::{ErrorResponse, ProfileQuery, ProfileRecord, SummaryResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; no locks are needed since all data is read-only.
pub struct AppState {
    /// Simulation parameters used for this run.
    pub config: SimConfig,
    /// Headline figures.
    pub summary: LoadSummary,
    /// Hour-by-month summary tables.
    pub results: LoadResults,
    /// Daily energy spread per month.
    pub daily: Vec<MonthDailyStats>,
}

impl AppState {
    /// Copies the served data out of a finished run.
    pub fn from_run(run: &SimulationRun) -> Self {
        Self {
            config: run.config.clone(),
            summary: run.summary.clone(),
            results: run.results.clone(),
            daily: run.daily_stats(),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/profiles", get(handlers::get_profiles))
        .route("/daily", get(handlers::get_daily))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
