//! Chart endpoints. Every request fetches fresh records from the read API.

use axum::extract::State;
use axum::Json;
use quarterly_core::dashboard::{
    self, ReasonsPoint, TrendPoint, REASON_FIELDS, TREND_FIELDS,
};

use crate::error::DashboardError;
use crate::response::ChartResponse;
use crate::state::DashboardState;

pub const REPORTING_TRENDS_TITLE: &str = "Disparity in cases reported to police";
pub const REASONS_TITLE: &str = "Reasons for not reporting cases to the police";

/// GET /charts/reporting-trends
pub async fn reporting_trends(
    State(state): State<DashboardState>,
) -> Result<Json<ChartResponse<TrendPoint>>, DashboardError> {
    let records = state.backend.fetch_responses(TREND_FIELDS).await?;
    let points = dashboard::reporting_trends(&records)?;
    Ok(Json(ChartResponse::series(REPORTING_TRENDS_TITLE, points)))
}

/// GET /charts/reasons-not-reported
pub async fn reasons_not_reported(
    State(state): State<DashboardState>,
) -> Result<Json<ChartResponse<ReasonsPoint>>, DashboardError> {
    let records = state.backend.fetch_responses(REASON_FIELDS).await?;
    let points = dashboard::reasons_not_reported(&records);
    Ok(Json(ChartResponse::series(REASONS_TITLE, points)))
}
