//! Client for the read API that backs the dashboard.
//!
//! [`BackendClient`] asks `GET {backend}/api/getResponses` for a list of
//! fields (sent as a JSON array in the request body) and decodes the reply as
//! [`ResponseRecord`]s.

use std::time::Duration;

use quarterly_core::dashboard::ResponseRecord;

use crate::error::DashboardError;

/// HTTP request timeout for a single read-API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const RESPONSES_PATH: &str = "/api/getResponses";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the read API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every record, restricted to `fields`.
    pub async fn fetch_responses(
        &self,
        fields: &[&str],
    ) -> Result<Vec<ResponseRecord>, DashboardError> {
        let url = format!("{}{RESPONSES_PATH}", self.base_url);
        let response = self.client.get(&url).json(fields).send().await?;

        if !response.status().is_success() {
            return Err(DashboardError::HttpStatus(response.status().as_u16()));
        }

        let records: Vec<ResponseRecord> = response.json().await?;
        tracing::debug!(url, records = records.len(), "Fetched responses");
        Ok(records)
    }
}
