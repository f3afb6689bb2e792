use crate::client::BackendClient;

/// Shared state for the dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub backend: BackendClient,
}
