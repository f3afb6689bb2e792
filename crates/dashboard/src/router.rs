use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::charts;
use crate::state::DashboardState;

/// Build the dashboard router.
///
/// ```text
/// GET /charts/reporting-trends       reporting_trends
/// GET /charts/reasons-not-reported   reasons_not_reported
/// GET /health                        health_check
/// ```
pub fn build_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/charts/reporting-trends", get(charts::reporting_trends))
        .route("/charts/reasons-not-reported", get(charts::reasons_not_reported))
        .route("/health", get(health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
