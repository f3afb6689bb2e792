use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quarterly_core::error::CoreError;

use crate::response::{Envelope, Status};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for pipeline faults. Implements [`IntoResponse`] to
/// produce `fail` / `error` envelopes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A fault raised by `quarterly_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status and envelope tier for this error.
    pub fn classify(&self) -> (StatusCode, Status) {
        match self {
            AppError::Core(e) if e.is_client_fault() => (StatusCode::BAD_REQUEST, Status::Fail),
            AppError::Core(CoreError::MalformedBody(_)) => {
                (StatusCode::BAD_REQUEST, Status::Error)
            }
            AppError::Core(_) => (StatusCode::INTERNAL_SERVER_ERROR, Status::Error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, tier) = self.classify();
        let message = self.to_string();

        let envelope = match tier {
            Status::Fail => {
                tracing::debug!(reason = %message, "Rejected submission");
                Envelope::fail(message)
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %message, "Submission processing failed");
                Envelope::error(message)
            }
            _ => {
                tracing::warn!(error = %message, "Unreadable request body");
                Envelope::error(message)
            }
        };

        (status, Json(envelope)).into_response()
    }
}
