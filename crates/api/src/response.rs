//! Shared response envelope types for API handlers.
//!
//! Every response uses the `{ "status", "message"?, "data"? }` envelope:
//! `success` carries `data`, `fail` (the caller sent invalid data) and
//! `error` (processing went wrong) carry `message`. Use [`Envelope`] instead
//! of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// Outcome tier reported in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Envelope::success(BodyData { body: groups })))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: None,
            data: Some(data),
        }
    }
}

impl Envelope {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// The `data` member of a successful submission response: `{ "body": [...] }`.
#[derive(Debug, Serialize)]
pub struct BodyData<T: Serialize> {
    pub body: T,
}
