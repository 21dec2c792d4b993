//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, ProfileQuery, ProfileRecord, SummaryResponse};
use crate::sim::daily::MonthDailyStats;
use crate::sim::month::Month;
use crate::sim::results::Statistic;
use crate::sim::types::HOURS_PER_DAY;

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        config: state.config.clone(),
        summary: state.summary.clone(),
    })
}

/// Returns the hourly values of one summary table.
///
/// `GET /profiles` → all months of the mean table
/// `GET /profiles?statistic=percentile&month=Jul` → 24 records
/// `GET /profiles?statistic=median` → 400 + `ErrorResponse`
pub async fn get_profiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
) -> impl IntoResponse {
    let statistic = match query.statistic.as_deref().map(str::parse::<Statistic>) {
        None => Statistic::Mean,
        Some(Ok(s)) => s,
        Some(Err(e)) => return Err(bad_request(e)),
    };
    let months: Vec<Month> = match query.month.as_deref().map(str::parse::<Month>) {
        None => Month::ALL.to_vec(),
        Some(Ok(m)) => vec![m],
        Some(Err(e)) => return Err(bad_request(e.to_string())),
    };

    let table = state.results.table(statistic);
    let records: Vec<ProfileRecord> = months
        .into_iter()
        .flat_map(|month| {
            (0..HOURS_PER_DAY).map(move |hour| ProfileRecord {
                month,
                hour,
                value: table.get(hour, month),
            })
        })
        .collect();

    Ok(Json(records))
}

/// `GET /daily` → 200 + `Vec<MonthDailyStats>` JSON
pub async fn get_daily(State(state): State<Arc<AppState>>) -> Json<Vec<MonthDailyStats>> {
    Json(state.daily.clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sim::daily::monthly_daily_stats;
    use crate::sim::results::LoadResults;
    use crate::sim::summary::LoadSummary;
    use crate::sim::trials::MonthTrials;
    use crate::sim::types::SimConfig;

    fn make_test_state() -> Arc<AppState> {
        let config = SimConfig::new(2, 90.0, 42);
        let trials: Vec<MonthTrials> = Month::ALL
            .iter()
            .map(|&m| {
                let mut t = MonthTrials::new(m);
                t.push([1.0; HOURS_PER_DAY]);
                t.push([3.0; HOURS_PER_DAY]);
                t
            })
            .collect();
        let results = LoadResults::from_trials(&trials, config.percentile);
        let summary = LoadSummary::from_results(&results);
        Arc::new(AppState {
            config,
            summary,
            results,
            daily: monthly_daily_stats(&trials),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn summary_returns_200() {
        let (status, json) = get_json("/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("config").is_some());
        assert_eq!(json["summary"]["trials"], 2);
    }

    #[tokio::test]
    async fn profiles_default_to_mean_of_all_months() {
        let (status, json) = get_json("/profiles").await;
        assert_eq!(status, StatusCode::OK);
        let records = json.as_array().cloned().unwrap_or_default();
        assert_eq!(records.len(), 12 * 24);
        assert_eq!(records[0]["month"], "Jan");
        assert_eq!(records[0]["value"], 2.0);
    }

    #[tokio::test]
    async fn profiles_filter_by_statistic_and_month() {
        let (status, json) = get_json("/profiles?statistic=std_dev&month=jul").await;
        assert_eq!(status, StatusCode::OK);
        let records = json.as_array().cloned().unwrap_or_default();
        assert_eq!(records.len(), 24);
        assert_eq!(records[23]["month"], "Jul");
        assert_eq!(records[23]["hour"], 23);
    }

    #[tokio::test]
    async fn unknown_statistic_returns_400() {
        let (status, json) = get_json("/profiles?statistic=median").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn unknown_month_returns_400() {
        let (status, _) = get_json("/profiles?month=Smarch").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn daily_has_twelve_months() {
        let (status, json) = get_json("/daily").await;
        assert_eq!(status, StatusCode::OK);
        let months = json.as_array().cloned().unwrap_or_default();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0]["daily_kwh"]["min"], 24.0);
    }
}
