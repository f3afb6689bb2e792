//! Chart response envelope.
//!
//! Same `{ "status", "message"?, "data"? }` shape as the submission API, with
//! the chart title alongside.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ChartData<T: Serialize> {
    pub body: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse<T: Serialize = ()> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ChartData<T>>,
}

impl<T: Serialize> ChartResponse<T> {
    /// A chart series, or the "No data" placeholder when `points` is empty.
    pub fn series(title: &'static str, points: Vec<T>) -> Self {
        if points.is_empty() {
            return Self {
                title: None,
                status: Status::Success,
                message: Some("No data".into()),
                data: Some(ChartData { body: points }),
            };
        }
        Self {
            title: Some(title),
            status: Status::Success,
            message: None,
            data: Some(ChartData { body: points }),
        }
    }
}

impl ChartResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: None,
            status: Status::Error,
            message: Some(message.into()),
            data: None,
        }
    }
}
