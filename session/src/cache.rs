//! # Cache isolation — purging the previous identity's persisted data
//!
//! When a sign-in lands on a *different* underlying user than the last active
//! one, every cache key scoped to the previous identity is removed before any
//! screen loads data under the new identity. The match is strictly
//! prefix-based (see [`store::keys::purge_prefixes`]), so the session marker
//! and unrelated settings are never touched.
//!
//! Purge failures are logged and swallowed by policy: a failed purge must not
//! block sign-in. The trade-off — stale data may surface until the next
//! successful purge — is accepted rather than retried. [`PurgeReport`] carries
//! the outcome so a caller *may* surface a warning.

use store::{keys, KeyValueStore, StoreError};
use tracing::{debug, warn};

use crate::provider::Provider;

/// Outcome of one purge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeReport {
    /// Keys removed.
    pub removed: usize,
    /// True when enumeration or removal failed and stale keys may remain.
    pub failed: bool,
}

/// Remove every persisted key scoped to the identity `prev_id`. Non-fatal:
/// errors are logged and reflected in the report, never returned.
pub async fn purge_user_scoped<S: KeyValueStore>(store: &S, prev_id: &str) -> PurgeReport {
    match try_purge(store, prev_id).await {
        Ok(removed) => {
            debug!(prev_id, removed, "purged user-scoped caches");
            PurgeReport {
                removed,
                failed: false,
            }
        }
        Err(err) => {
            warn!(prev_id, "cache purge failed, continuing sign-in: {err}");
            PurgeReport {
                removed: 0,
                failed: true,
            }
        }
    }
}

async fn try_purge<S: KeyValueStore>(store: &S, prev_id: &str) -> Result<usize, StoreError> {
    let all = store.all_keys().await?;
    let prefixes = keys::purge_prefixes(prev_id);
    let doomed: Vec<&str> = all
        .iter()
        .filter(|k| prefixes.iter().any(|p| k.starts_with(p.as_str())))
        .map(String::as_str)
        .collect();
    if !doomed.is_empty() {
        store.multi_remove(&doomed).await?;
    }
    Ok(doomed.len())
}

/// Reconcile the identity about to become active with the last one seen for
/// the same provider family: purge the previous identity's caches when the
/// underlying user changed, then update the family's last-identity marker.
///
/// Callers must await this before issuing the first data load under the new
/// identity, otherwise stale cross-user data may render transiently.
pub async fn reconcile_identity<S: KeyValueStore>(
    store: &S,
    provider: Provider,
    new_id: &str,
) -> Result<PurgeReport, StoreError> {
    let marker_key = match provider {
        Provider::Db => keys::LAST_USER_ID,
        Provider::Federated => keys::GOOGLE_USER_ID,
        Provider::Unset => return Ok(PurgeReport::default()),
    };

    let prev = store.get(marker_key).await?;
    let report = match prev {
        Some(prev) if !prev.is_empty() && prev != new_id => {
            purge_user_scoped(store, &prev).await
        }
        _ => PurgeReport::default(),
    };

    store.set(marker_key, new_id).await?;
    Ok(report)
}
