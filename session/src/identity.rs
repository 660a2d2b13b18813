//! # IdentityService — the federated identity provider's exposed surface
//!
//! The federated service manages its own sign-in session out of process; this
//! trait is the slice of it that session resolution consumes: a load flag, a
//! signed-in flag, a profile snapshot, and `sign_out`. The real implementation
//! wraps the platform SDK; [`StaticIdentity`] is a scripted implementation for
//! tests and local development.
//!
//! `is_loaded` is the gate for the resolver's *pending* state: until the
//! service has finished its own startup, a persisted federated marker can be
//! neither confirmed nor denied.

use std::future::Future;
use std::sync::{Arc, Mutex};

/// Snapshot of the federated service's current user.
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedProfile {
    pub id: String,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub username: Option<String>,
    /// The address the service marks as primary, if any.
    pub primary_email: Option<String>,
    /// Every address on the account, in service order.
    pub emails: Vec<String>,
    pub image_url: Option<String>,
}

impl FederatedProfile {
    /// Display name fallback chain: full name, first name, username, `"User"`.
    /// An empty string counts as absent at every link, not just the last.
    pub fn display_name(&self) -> &str {
        non_empty(self.full_name.as_deref())
            .or_else(|| non_empty(self.first_name.as_deref()))
            .or_else(|| non_empty(self.username.as_deref()))
            .unwrap_or("User")
    }

    /// Primary email, else the first listed address, else empty. An empty
    /// primary falls through to the listed addresses.
    pub fn email(&self) -> &str {
        non_empty(self.primary_email.as_deref())
            .or_else(|| self.emails.first().map(String::as_str))
            .unwrap_or("")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Async surface of the federated identity service.
pub trait IdentityService {
    /// Whether the service has finished its own startup load.
    fn is_loaded(&self) -> impl Future<Output = bool>;
    /// Whether a federated session is active. Meaningless until loaded.
    fn is_signed_in(&self) -> impl Future<Output = bool>;
    /// Snapshot of the signed-in user, or `None` when signed out.
    fn profile(&self) -> impl Future<Output = Option<FederatedProfile>>;
    /// End the federated session. Implementations swallow their own failures;
    /// local sign-out proceeds regardless.
    fn sign_out(&self) -> impl Future<Output = ()>;
}

#[derive(Debug, Default)]
struct StaticState {
    loaded: bool,
    signed_in: bool,
    profile: Option<FederatedProfile>,
}

/// Scripted [`IdentityService`] for tests and local development.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity {
    state: Arc<Mutex<StaticState>>,
}

impl StaticIdentity {
    /// A service that has not finished loading.
    pub fn loading() -> Self {
        Self::default()
    }

    /// A loaded service with no active session.
    pub fn signed_out() -> Self {
        let identity = Self::default();
        identity.state.lock().unwrap().loaded = true;
        identity
    }

    /// A loaded service signed in as the given profile.
    pub fn signed_in(profile: FederatedProfile) -> Self {
        let identity = Self::default();
        {
            let mut state = identity.state.lock().unwrap();
            state.loaded = true;
            state.signed_in = true;
            state.profile = Some(profile);
        }
        identity
    }

    /// Mark the startup load as finished.
    pub fn finish_loading(&self) {
        self.state.lock().unwrap().loaded = true;
    }
}

impl IdentityService for StaticIdentity {
    async fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().loaded
    }

    async fn is_signed_in(&self) -> bool {
        self.state.lock().unwrap().signed_in
    }

    async fn profile(&self) -> Option<FederatedProfile> {
        let state = self.state.lock().unwrap();
        if state.signed_in {
            state.profile.clone()
        } else {
            None
        }
    }

    async fn sign_out(&self) {
        let mut state = self.state.lock().unwrap();
        state.signed_in = false;
        state.profile = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full: Option<&str>, first: Option<&str>, username: Option<&str>) -> FederatedProfile {
        FederatedProfile {
            id: "fed_1".to_string(),
            full_name: full.map(String::from),
            first_name: first.map(String::from),
            username: username.map(String::from),
            primary_email: None,
            emails: Vec::new(),
            image_url: None,
        }
    }

    #[test]
    fn display_name_fallback_chain() {
        assert_eq!(
            profile(Some("Ana Lima"), Some("Ana"), Some("ana")).display_name(),
            "Ana Lima"
        );
        assert_eq!(profile(None, Some("Ana"), Some("ana")).display_name(), "Ana");
        assert_eq!(profile(None, None, Some("ana")).display_name(), "ana");
        assert_eq!(profile(None, None, None).display_name(), "User");
    }

    #[test]
    fn display_name_skips_empty_links() {
        assert_eq!(
            profile(Some(""), Some("Ana"), Some("ana")).display_name(),
            "Ana"
        );
        assert_eq!(profile(Some(""), Some(""), Some("ana")).display_name(), "ana");
        assert_eq!(profile(Some(""), Some(""), Some("")).display_name(), "User");
    }

    #[test]
    fn empty_primary_email_falls_through_to_listed() {
        let mut p = profile(None, None, None);
        p.primary_email = Some(String::new());
        p.emails = vec!["second@example.com".to_string()];
        assert_eq!(p.email(), "second@example.com");
    }

    #[test]
    fn email_prefers_primary() {
        let mut p = profile(None, None, None);
        p.emails = vec!["second@example.com".to_string()];
        assert_eq!(p.email(), "second@example.com");

        p.primary_email = Some("first@example.com".to_string());
        assert_eq!(p.email(), "first@example.com");

        assert_eq!(profile(None, None, None).email(), "");
    }

    #[tokio::test]
    async fn static_identity_sign_out() {
        let identity = StaticIdentity::signed_in(profile(Some("Ana"), None, None));
        assert!(identity.is_signed_in().await);

        identity.sign_out().await;
        assert!(identity.is_loaded().await);
        assert!(!identity.is_signed_in().await);
        assert_eq!(identity.profile().await, None);
    }
}
