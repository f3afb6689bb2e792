use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::response::Envelope;

/// Response for a handler that panicked, used with
/// `CatchPanicLayer::custom`.
///
/// Keeps the response a well-formed `error` envelope so a programming fault
/// never reaches the client as a dropped connection or bare 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::error(format!("Internal error: {detail}"))),
    )
        .into_response()
}
