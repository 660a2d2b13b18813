//! # Session Resolver — which identity source is authoritative
//!
//! [`SessionResolver::resolve`] is the single place the "who is logged in, via
//! which provider" question is answered. Screens receive its
//! [`SessionState`] instead of re-deriving the decision from scattered flag
//! reads.
//!
//! ## Decision order
//!
//! 1. Valid backend credentials (`token` *and* `userId` non-empty) win
//!    outright, even over a stale `provider = "google"` tag — two identity
//!    sources must never race, so the tie-break is deterministic.
//! 2. A persisted federated marker is confirmed against the identity service:
//!    still loading → [`SessionState::Pending`] (retry, do not redirect);
//!    signed in → authorized with a fresh profile snapshot, and the persisted
//!    federated user id is refreshed; signed out → the stale `provider` key is
//!    cleared and the decision is denied.
//! 3. Anything else — no marker, or a `db` marker missing its token or id —
//!    is denied, and the invalid residue is removed so the next resolution
//!    starts clean.
//!
//! Persistence failures deny (fail closed); a prior authorized state is never
//! assumed.

use store::{keys, KeyValueStore, StoreError};
use tracing::{debug, warn};

use crate::identity::{FederatedProfile, IdentityService};
use crate::provider::Provider;

/// Terminal (or pending) outcome of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The identity service has not finished loading; neither authorized nor
    /// denied. Callers retry on the next focus event instead of redirecting.
    Pending,
    Authorized(AuthorizedSession),
    Denied,
}

/// The effective identity handed to screens once a session is authorized.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizedSession {
    /// [`Provider::Db`] or [`Provider::Federated`], never unset.
    pub provider: Provider,
    pub user_id: String,
    /// Bearer token, present only for backend sessions.
    pub token: Option<String>,
    /// Profile snapshot, present only for federated sessions.
    pub profile: Option<FederatedProfile>,
}

/// Resolves the authoritative identity source from persisted state plus the
/// federated service's live flags. Owns all writes to the session marker;
/// screens only read the resulting [`SessionState`].
pub struct SessionResolver<S, I> {
    store: S,
    identity: I,
}

impl<S: KeyValueStore, I: IdentityService> SessionResolver<S, I> {
    pub fn new(store: S, identity: I) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Resolve the current session. Safe to call repeatedly and concurrently:
    /// resolution with no intervening writes yields the same decision, and all
    /// marker mutations are single batched writes.
    pub async fn resolve(&self) -> SessionState {
        match self.try_resolve().await {
            Ok(state) => state,
            Err(err) => {
                // Fail closed: an unreadable marker is an absent marker.
                warn!("session marker unreadable, denying: {err}");
                SessionState::Denied
            }
        }
    }

    async fn try_resolve(&self) -> Result<SessionState, StoreError> {
        let values = self
            .store
            .multi_get(&[keys::PROVIDER, keys::TOKEN, keys::USER_ID])
            .await?;
        let provider_tag = non_empty(values[0].as_deref());
        let token = non_empty(values[1].as_deref());
        let user_id = non_empty(values[2].as_deref());

        // Backend credentials, when complete, always take precedence.
        if let (Some(token), Some(user_id)) = (token, user_id) {
            return Ok(SessionState::Authorized(AuthorizedSession {
                provider: Provider::Db,
                user_id: user_id.to_string(),
                token: Some(token.to_string()),
                profile: None,
            }));
        }

        match Provider::from_tag(provider_tag) {
            Provider::Federated => self.resolve_federated().await,
            Provider::Db => {
                // Marker says backend but the credentials are gone or partial.
                // Treat as unset and clear the residue.
                debug!("invalid backend marker, clearing");
                self.store
                    .multi_remove(&[keys::TOKEN, keys::USER_ID, keys::PROVIDER])
                    .await?;
                Ok(SessionState::Denied)
            }
            Provider::Unset => Ok(SessionState::Denied),
        }
    }

    async fn resolve_federated(&self) -> Result<SessionState, StoreError> {
        if !self.identity.is_loaded().await {
            return Ok(SessionState::Pending);
        }

        if self.identity.is_signed_in().await {
            if let Some(profile) = self.identity.profile().await {
                // Keep the persisted federated id current so the next
                // differing sign-in knows whose caches to purge.
                self.store.set(keys::GOOGLE_USER_ID, &profile.id).await?;
                return Ok(SessionState::Authorized(AuthorizedSession {
                    provider: Provider::Federated,
                    user_id: profile.id.clone(),
                    token: None,
                    profile: Some(profile),
                }));
            }
        }

        // Loaded but no active session: the marker is stale.
        self.store.remove(keys::PROVIDER).await?;
        Ok(SessionState::Denied)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
