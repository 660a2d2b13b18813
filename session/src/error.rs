//! Error taxonomy for the session core.
//!
//! Resolution itself never returns an error — a failed persistence read is a
//! denied decision, and an unloaded identity service is a pending one. These
//! variants cover the sign-in/sign-out actions and the data paths gated behind
//! an authorized session.

use api::ApiError;
use store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The credential backend answered without a usable token or user id.
    /// Shown to the user as a generic failure; no session state was written.
    #[error("authentication rejected")]
    AuthenticationRejected,
    /// The federated identity service is not loaded or has no active session.
    #[error("federated identity service unavailable")]
    IdentityUnavailable,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Rejected => SessionError::AuthenticationRejected,
            other => SessionError::Api(other),
        }
    }
}
