//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code and envelope. They do NOT need an HTTP server -- they call
//! `IntoResponse` directly on `AppError` values.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use quarterly_api::error::AppError;
use quarterly_api::response::Status;
use quarterly_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_fail_envelope() {
    let err = AppError::Core(CoreError::Validation("[] is too short".into()));
    assert_matches!(err.classify(), (StatusCode::BAD_REQUEST, Status::Fail));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({"status": "fail", "message": "[] is too short"}));
}

#[tokio::test]
async fn malformed_body_returns_error_envelope() {
    let err = AppError::Core(CoreError::MalformedBody("EOF while parsing".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Malformed request body: EOF while parsing");
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn aggregation_error_returns_500_error_envelope() {
    let err = AppError::Core(CoreError::Aggregation("totalHandled overflows for Q1 2021".into()));

    let (status, json) = error_to_response(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert_eq!(
        json["message"],
        "Aggregation failed: totalHandled overflows for Q1 2021"
    );
}

#[test]
fn only_validation_faults_are_the_callers_fault() {
    let malformed = AppError::Core(CoreError::MalformedBody("EOF".into()));
    assert_matches!(malformed.classify(), (StatusCode::BAD_REQUEST, Status::Error));

    let overflow = AppError::Core(CoreError::Aggregation("reported overflows".into()));
    assert_matches!(overflow.classify(), (StatusCode::INTERNAL_SERVER_ERROR, Status::Error));
}

#[test]
fn core_errors_convert_with_question_mark() {
    fn run() -> Result<(), AppError> {
        Err(CoreError::Validation("bad".into()))?
    }
    assert_matches!(run(), Err(AppError::Core(CoreError::Validation(msg))) if msg == "bad");
}
