/// Faults raised by the submission pipeline.
///
/// `Validation` is the caller's fault and surfaces as a `fail` envelope.
/// The other variants are processing faults and surface as `error`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Aggregation failed: {0}")]
    Aggregation(String),
}

impl CoreError {
    /// Whether this fault was caused by the caller's data rather than by
    /// processing it.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}
