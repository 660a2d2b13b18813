//! # Sign-in and sign-out actions
//!
//! These are the only paths that create or destroy a session marker. Each one
//! enforces the ordering the rest of the app relies on: the previous
//! identity's caches are purged before the new marker lands, and the marker
//! itself is written as one batch so a concurrent resolution never observes a
//! half-written session.
//!
//! A rejected credential sign-in leaves the store untouched — the failure
//! happens before any write.

use api::{BackendClient, Credentials};
use store::{keys, KeyValueStore};
use tracing::debug;

use crate::cache::purge_user_scoped;
use crate::error::SessionError;
use crate::identity::IdentityService;
use crate::provider::Provider;
use crate::resolver::AuthorizedSession;

/// Sign in against the credential backend and persist the resulting session.
pub async fn sign_in_db<S: KeyValueStore>(
    store: &S,
    backend: &BackendClient,
    email: &str,
    password: &str,
) -> Result<AuthorizedSession, SessionError> {
    let credentials = backend.login(email, password).await?;
    apply_db_credentials(store, credentials).await
}

/// Persist a backend sign-in: purge a differing previous user's caches, then
/// write the whole marker in one batch.
pub async fn apply_db_credentials<S: KeyValueStore>(
    store: &S,
    credentials: Credentials,
) -> Result<AuthorizedSession, SessionError> {
    let previous = store.get(keys::LAST_USER_ID).await?;
    if let Some(previous) = previous.filter(|p| !p.is_empty() && *p != credentials.user_id) {
        purge_user_scoped(store, &previous).await;
    }

    store
        .multi_set(&[
            (keys::TOKEN, &credentials.access_token),
            (keys::USER_ID, &credentials.user_id),
            (keys::LAST_USER_ID, &credentials.user_id),
            (keys::PROVIDER, "db"),
        ])
        .await?;
    store.remove(keys::GOOGLE_USER_ID).await?;

    debug!(user_id = %credentials.user_id, "backend sign-in persisted");
    Ok(AuthorizedSession {
        provider: Provider::Db,
        user_id: credentials.user_id,
        token: Some(credentials.access_token),
        profile: None,
    })
}

/// Adopt the federated service's active session as the app session.
///
/// The previous backend user's caches are always purged (the device is
/// switching provider families), and a *different* previous federated user's
/// caches are purged as well. The profile snapshot is persisted as the initial
/// override so the profile screen has data before any network round-trip.
pub async fn sign_in_federated<S: KeyValueStore, I: IdentityService>(
    store: &S,
    identity: &I,
) -> Result<AuthorizedSession, SessionError> {
    if !identity.is_loaded().await || !identity.is_signed_in().await {
        return Err(SessionError::IdentityUnavailable);
    }
    let profile = identity
        .profile()
        .await
        .ok_or(SessionError::IdentityUnavailable)?;

    store
        .set(keys::PROVIDER, Provider::Federated.tag().unwrap_or_default())
        .await?;

    if let Some(prev_db) = store
        .get(keys::LAST_USER_ID)
        .await?
        .filter(|p| !p.is_empty())
    {
        purge_user_scoped(store, &prev_db).await;
        store.remove(keys::LAST_USER_ID).await?;
    }
    if let Some(prev_fed) = store
        .get(keys::GOOGLE_USER_ID)
        .await?
        .filter(|p| !p.is_empty() && *p != profile.id)
    {
        purge_user_scoped(store, &prev_fed).await;
    }

    let snapshot = crate::profile::ProfileOverride::from_profile(&profile);
    let snapshot_json = snapshot.to_json().unwrap_or_default();
    store
        .multi_set(&[
            (keys::PROFILE_OVERRIDE, &snapshot_json),
            (keys::GOOGLE_USER_ID, &profile.id),
            (keys::TOKEN, ""),
            (keys::USER_ID, ""),
        ])
        .await?;

    debug!(user_id = %profile.id, "federated sign-in persisted");
    Ok(AuthorizedSession {
        provider: Provider::Federated,
        user_id: profile.id.clone(),
        token: None,
        profile: Some(profile),
    })
}

/// End the current session: clear the marker and profile keys, and end the
/// federated session too when it was the active provider. `lastUserId` is
/// deliberately kept so the next differing backend sign-in can purge.
pub async fn sign_out<S: KeyValueStore, I: IdentityService>(
    store: &S,
    identity: &I,
) -> Result<(), SessionError> {
    let provider = Provider::from_tag(store.get(keys::PROVIDER).await?.as_deref());

    store
        .multi_remove(&[
            keys::TOKEN,
            keys::USER_ID,
            keys::PROVIDER,
            keys::PROFILE_OVERRIDE,
            keys::AVATAR_URI,
        ])
        .await?;

    if provider == Provider::Federated {
        identity.sign_out().await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{FederatedProfile, StaticIdentity};
    use crate::resolver::{SessionResolver, SessionState};
    use store::MemoryStore;

    fn creds(user_id: &str) -> Credentials {
        Credentials {
            access_token: format!("tok-{user_id}"),
            user_id: user_id.to_string(),
        }
    }

    fn profile(id: &str) -> FederatedProfile {
        FederatedProfile {
            id: id.to_string(),
            full_name: Some("Ana Lima".to_string()),
            first_name: None,
            username: None,
            primary_email: Some("ana@example.com".to_string()),
            emails: vec!["ana@example.com".to_string()],
            image_url: None,
        }
    }

    #[tokio::test]
    async fn db_sign_in_writes_the_full_marker() {
        let store = MemoryStore::new();
        let session = apply_db_credentials(&store, creds("42")).await.unwrap();
        assert_eq!(session.provider, Provider::Db);

        let values = store
            .multi_get(&["token", "userId", "lastUserId", "provider"])
            .await
            .unwrap();
        assert_eq!(
            values,
            vec![
                Some("tok-42".to_string()),
                Some("42".to_string()),
                Some("42".to_string()),
                Some("db".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn switching_db_users_purges_the_previous_scope() {
        let store = MemoryStore::new();
        apply_db_credentials(&store, creds("42")).await.unwrap();
        store.set("list_items:db:42:milk", "2").await.unwrap();

        apply_db_credentials(&store, creds("99")).await.unwrap();

        assert_eq!(store.get("list_items:db:42:milk").await.unwrap(), None);
        assert_eq!(store.get("lastUserId").await.unwrap().as_deref(), Some("99"));
    }

    #[tokio::test]
    async fn same_user_re_login_purges_nothing() {
        let store = MemoryStore::new();
        apply_db_credentials(&store, creds("42")).await.unwrap();
        store.set("list_items:db:42:milk", "2").await.unwrap();

        apply_db_credentials(&store, creds("42")).await.unwrap();
        assert!(store.get("list_items:db:42:milk").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn db_sign_in_clears_the_federated_marker() {
        let store = MemoryStore::new();
        store.set("googleUserId", "fed_1").await.unwrap();

        apply_db_credentials(&store, creds("42")).await.unwrap();
        assert_eq!(store.get("googleUserId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn federated_sign_in_persists_marker_and_snapshot() {
        let store = MemoryStore::new();
        let identity = StaticIdentity::signed_in(profile("fed_1"));

        let session = sign_in_federated(&store, &identity).await.unwrap();
        assert_eq!(session.provider, Provider::Federated);
        assert_eq!(session.user_id, "fed_1");

        assert_eq!(store.get("provider").await.unwrap().as_deref(), Some("google"));
        assert_eq!(
            store.get("googleUserId").await.unwrap().as_deref(),
            Some("fed_1")
        );
        // Credentials are cleared so backend precedence cannot resurrect them.
        assert_eq!(store.get("token").await.unwrap().as_deref(), Some(""));
        assert_eq!(store.get("userId").await.unwrap().as_deref(), Some(""));

        let snapshot: serde_json::Value =
            serde_json::from_str(&store.get("google_profile_override").await.unwrap().unwrap())
                .unwrap();
        assert_eq!(snapshot["name"], "Ana Lima");
        assert_eq!(snapshot["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn federated_sign_in_purges_previous_db_user() {
        let store = MemoryStore::new();
        apply_db_credentials(&store, creds("42")).await.unwrap();
        store.set("list_items:db:42:milk", "2").await.unwrap();

        let identity = StaticIdentity::signed_in(profile("fed_1"));
        sign_in_federated(&store, &identity).await.unwrap();

        assert_eq!(store.get("list_items:db:42:milk").await.unwrap(), None);
        assert_eq!(store.get("lastUserId").await.unwrap(), None);
    }

    #[tokio::test]
    async fn federated_sign_in_requires_a_loaded_session() {
        let store = MemoryStore::new();
        let err = sign_in_federated(&store, &StaticIdentity::loading())
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::IdentityUnavailable));
        // Nothing was written.
        assert!(store.all_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sign_in_then_resolve_round_trip() {
        let store = MemoryStore::new();
        apply_db_credentials(&store, creds("42")).await.unwrap();

        let resolver = SessionResolver::new(store, StaticIdentity::signed_out());
        match resolver.resolve().await {
            SessionState::Authorized(session) => assert_eq!(session.user_id, "42"),
            other => panic!("expected authorized, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_out_clears_session_but_keeps_last_user_id() {
        let store = MemoryStore::new();
        apply_db_credentials(&store, creds("42")).await.unwrap();
        store.set("userAvatar", "file:///a.png").await.unwrap();

        sign_out(&store, &StaticIdentity::signed_out()).await.unwrap();

        for key in ["token", "userId", "provider", "userAvatar"] {
            assert_eq!(store.get(key).await.unwrap(), None, "{key}");
        }
        // Retained for the purge-on-next-differing-sign-in path.
        assert_eq!(store.get("lastUserId").await.unwrap().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn federated_sign_out_ends_the_service_session() {
        let store = MemoryStore::new();
        let identity = StaticIdentity::signed_in(profile("fed_1"));
        sign_in_federated(&store, &identity).await.unwrap();

        sign_out(&store, &identity).await.unwrap();
        assert!(!identity.is_signed_in().await);
        assert_eq!(store.get("provider").await.unwrap(), None);
        assert_eq!(store.get("google_profile_override").await.unwrap(), None);
    }
}
