use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quarterly_core::error::CoreError;

use crate::response::ChartResponse;

/// Errors raised while building a chart.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// The read API could not be reached or its reply could not be decoded.
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The read API answered with a non-2xx status code.
    #[error("Backend returned HTTP {0}")]
    HttpStatus(u16),

    /// Shaping the records failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Request(_) | DashboardError::HttpStatus(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        tracing::error!(error = %message, status = status.as_u16(), "Chart request failed");
        (status, Json(ChartResponse::error(message))).into_response()
    }
}
