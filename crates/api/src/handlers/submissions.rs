//! Handlers for the quarterly submission endpoints.
//!
//! Both endpoints share [`submit`]; they differ only in the
//! [`Endpoint`] definition passed to it.

use axum::body::Bytes;
use axum::Json;
use quarterly_core::aggregate::QuarterGroup;
use quarterly_core::pipeline::{self, Endpoint, REPORTING_NUMBERS, UNREPORTED_CASES};

use crate::error::AppResult;
use crate::response::{BodyData, Envelope};

/// Success payload of a submission endpoint.
pub type SubmissionResponse = Json<Envelope<BodyData<Vec<QuarterGroup>>>>;

/// Run the raw request body through the pipeline for `endpoint`.
///
/// The body is taken as bytes rather than through the `Json` extractor so
/// that a parse failure is reported in the envelope like any other fault.
pub fn submit(endpoint: &'static Endpoint, body: &[u8]) -> AppResult<SubmissionResponse> {
    let groups = pipeline::process(body, endpoint)?;
    tracing::debug!(
        endpoint = endpoint.name,
        quarters = groups.len(),
        "Aggregated submission"
    );
    Ok(Json(Envelope::success(BodyData { body: groups })))
}

/// POST /reportingNumbers
///
/// Groups reported/supported counts by quarter and adds `totalHandled`.
pub async fn reporting_numbers(body: Bytes) -> AppResult<SubmissionResponse> {
    submit(&REPORTING_NUMBERS, &body)
}

/// POST /unreportedCases
///
/// Groups the eight reasons-not-reported counts by quarter.
pub async fn unreported_cases(body: Bytes) -> AppResult<SubmissionResponse> {
    submit(&UNREPORTED_CASES, &body)
}
