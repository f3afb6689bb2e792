#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use quarterly_api::config::ServerConfig;
use quarterly_api::router::{build_app_router, with_middleware};
use quarterly_api::routes;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router exactly as `main.rs` does.
pub fn build_test_app() -> Router {
    build_app_router(&test_config())
}

/// Build the application router with `extra` routes mounted inside the
/// same middleware stack.
pub fn build_test_app_with(extra: Router) -> Router {
    let routes = Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .merge(extra);
    with_middleware(routes, &test_config())
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, json.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub fn reporting_numbers_payload() -> serde_json::Value {
    serde_json::json!({
        "body": [
            {"year": 2021, "quarter": 1, "reportingDetails": {"reported": 6, "supported": 7}},
            {"year": 2021, "quarter": 2, "reportingDetails": {"reported": 0, "supported": 1}}
        ]
    })
}

pub fn unreported_cases_payload() -> serde_json::Value {
    serde_json::json!({
        "body": [
            {
                "year": 2021,
                "quarter": 1,
                "unreportedCases": {
                    "lackEvidence": 0, "notTrustPolice": 1, "policeNotBelieve": 5, "afraid": 2,
                    "abuseStop": 7, "talk": 9, "clientOther": 4, "other": 0
                }
            },
            {
                "year": 2021,
                "quarter": 2,
                "unreportedCases": {
                    "lackEvidence": 2, "notTrustPolice": 1, "policeNotBelieve": 2, "afraid": 2,
                    "abuseStop": 7, "talk": 9, "clientOther": 4, "other": 0
                }
            }
        ]
    })
}
