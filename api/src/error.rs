//! Error taxonomy for backend calls.

/// Errors surfaced by [`BackendClient`](crate::BackendClient).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, body decode).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success HTTP status from the backend.
    #[error("backend returned status {0}")]
    Status(u16),
    /// `/login` answered without a usable token or user id. Surfaced to the
    /// user as a generic failure; never a crash, never a partial session write.
    #[error("credentials rejected by the backend")]
    Rejected,
}
