pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers::submissions;

/// Build the submission route tree.
///
/// ```text
/// POST /reportingNumbers    reporting_numbers
/// POST /unreportedCases     unreported_cases
/// ```
///
/// Any other method on these paths is answered with 405 by the router.
pub fn api_routes() -> Router {
    Router::new()
        .route("/reportingNumbers", post(submissions::reporting_numbers))
        .route("/unreportedCases", post(submissions::unreported_cases))
}
