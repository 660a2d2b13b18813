//! # Profile override and effective-profile assembly
//!
//! Federated profiles cannot be edited at the identity service from inside the
//! app, so user edits are persisted locally as a [`ProfileOverride`] and laid
//! over the live snapshot whenever a federated profile is displayed. Backend
//! profiles are edited at the backend; no override is ever created under the
//! backend provider.
//!
//! The locally picked avatar URI is a separate key and applies to both
//! providers, preferred over the federated image URL when present.

use api::{BackendClient, UserRecord};
use serde::{Deserialize, Serialize};
use store::{keys, KeyValueStore, StoreError};

use crate::error::SessionError;
use crate::identity::FederatedProfile;
use crate::provider::Provider;
use crate::resolver::AuthorizedSession;

/// Local `{name, email}` edits for a federated profile. Persisted as JSON
/// under [`store::keys::PROFILE_OVERRIDE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverride {
    pub name: String,
    pub email: String,
}

impl ProfileOverride {
    /// Snapshot of a federated profile, using its display fallbacks.
    pub fn from_profile(profile: &FederatedProfile) -> Self {
        Self {
            name: profile.display_name().to_string(),
            email: profile.email().to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Read the persisted override. A corrupt record reads as absent rather
    /// than failing the profile screen.
    pub async fn load<S: KeyValueStore>(store: &S) -> Result<Option<Self>, StoreError> {
        let raw = store.get(keys::PROFILE_OVERRIDE).await?;
        Ok(raw.and_then(|json| serde_json::from_str(&json).ok()))
    }

    pub async fn save<S: KeyValueStore>(&self, store: &S) -> Result<(), StoreError> {
        let json = self.to_json().unwrap_or_default();
        store.set(keys::PROFILE_OVERRIDE, &json).await
    }
}

/// What a profile screen renders, independent of provider.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayProfile {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// Assemble the displayed federated profile: persisted edits over the live
/// snapshot, local avatar over the service image.
pub async fn federated_display<S: KeyValueStore>(
    store: &S,
    snapshot: &FederatedProfile,
) -> Result<DisplayProfile, StoreError> {
    let override_ = ProfileOverride::load(store).await?;
    let avatar = store.get(keys::AVATAR_URI).await?;
    let (name, email) = match override_ {
        Some(o) => (
            if o.name.is_empty() {
                snapshot.display_name().to_string()
            } else {
                o.name
            },
            if o.email.is_empty() {
                snapshot.email().to_string()
            } else {
                o.email
            },
        ),
        None => (
            snapshot.display_name().to_string(),
            snapshot.email().to_string(),
        ),
    };
    Ok(DisplayProfile {
        name,
        email,
        avatar_url: avatar.or_else(|| snapshot.image_url.clone()),
    })
}

/// Assemble the displayed backend profile from a fetched record plus the
/// local avatar.
pub async fn db_display<S: KeyValueStore>(
    store: &S,
    record: &UserRecord,
) -> Result<DisplayProfile, StoreError> {
    let avatar = store.get(keys::AVATAR_URI).await?;
    Ok(DisplayProfile {
        name: record.name.clone().unwrap_or_default(),
        email: record.email.clone().unwrap_or_default(),
        avatar_url: avatar,
    })
}

/// Persist profile edits for the active session: federated sessions write the
/// local override (device-only), backend sessions update the backend record.
pub async fn save_edits<S: KeyValueStore>(
    store: &S,
    backend: &BackendClient,
    session: &AuthorizedSession,
    name: &str,
    email: &str,
) -> Result<(), SessionError> {
    let name = name.trim();
    let email = email.trim();
    match session.provider {
        Provider::Federated => {
            ProfileOverride {
                name: name.to_string(),
                email: email.to_string(),
            }
            .save(store)
            .await?;
            Ok(())
        }
        Provider::Db => {
            let token = session.token.as_deref().unwrap_or_default();
            backend
                .update_user(&session.user_id, token, name, email)
                .await?;
            Ok(())
        }
        Provider::Unset => Err(SessionError::IdentityUnavailable),
    }
}
