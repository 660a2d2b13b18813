//! # ListRepository — provider-routed shopping-list data
//!
//! The shopping-list data path is deliberately asymmetric across providers:
//!
//! - **Backend sessions** always go to the API and never read a local cache —
//!   a failed load is a failed load, not stale data.
//! - **Federated sessions** have no backend rows at all; the local store *is*
//!   primary storage, one JSON array per list under the
//!   [`store::keys::GOOGLE_LIST_ITEMS`] prefix. These are exactly the keys the
//!   cache isolation purge sweeps on identity switch.
//!
//! Every operation takes an [`AuthorizedSession`], so callers cannot reach
//! list data before resolution (and therefore before any pending purge) has
//! completed. For backend sessions `list` is the backend list id; for
//! federated sessions it is the local list name.

use api::{BackendClient, ShoppingItem};
use store::{keys, KeyValueStore};

use crate::error::SessionError;
use crate::provider::Provider;
use crate::resolver::AuthorizedSession;

/// Provider-routed access to shopping-list items.
pub struct ListRepository<'a, S> {
    store: &'a S,
    backend: &'a BackendClient,
}

impl<'a, S: KeyValueStore> ListRepository<'a, S> {
    pub fn new(store: &'a S, backend: &'a BackendClient) -> Self {
        Self { store, backend }
    }

    /// Load the items of one list.
    pub async fn items(
        &self,
        session: &AuthorizedSession,
        list: &str,
    ) -> Result<Vec<ShoppingItem>, SessionError> {
        match session.provider {
            Provider::Db => {
                let items = self.backend.list_items(list, self.token(session)).await?;
                Ok(items)
            }
            Provider::Federated => self.read_local(list).await,
            Provider::Unset => Err(SessionError::IdentityUnavailable),
        }
    }

    /// Add an item to a list, returning the stored item.
    pub async fn add(
        &self,
        session: &AuthorizedSession,
        list: &str,
        name: &str,
    ) -> Result<ShoppingItem, SessionError> {
        match session.provider {
            Provider::Db => {
                let item = self
                    .backend
                    .add_item(list, name, self.token(session))
                    .await?;
                Ok(item)
            }
            Provider::Federated => {
                let mut items = self.read_local(list).await?;
                let item = ShoppingItem {
                    id: next_local_id(&items),
                    name: name.to_string(),
                    done: false,
                    list_id: Some(list.to_string()),
                };
                items.push(item.clone());
                self.write_local(list, &items).await?;
                Ok(item)
            }
            Provider::Unset => Err(SessionError::IdentityUnavailable),
        }
    }

    /// Mark an item done / not done.
    pub async fn set_done(
        &self,
        session: &AuthorizedSession,
        list: &str,
        item_id: &str,
        done: bool,
    ) -> Result<(), SessionError> {
        match session.provider {
            Provider::Db => {
                self.backend
                    .set_item_done(item_id, done, self.token(session))
                    .await?;
                Ok(())
            }
            Provider::Federated => {
                let mut items = self.read_local(list).await?;
                for item in &mut items {
                    if item.id == item_id {
                        item.done = done;
                    }
                }
                self.write_local(list, &items).await?;
                Ok(())
            }
            Provider::Unset => Err(SessionError::IdentityUnavailable),
        }
    }

    fn token<'s>(&self, session: &'s AuthorizedSession) -> &'s str {
        session.token.as_deref().unwrap_or_default()
    }

    async fn read_local(&self, list: &str) -> Result<Vec<ShoppingItem>, SessionError> {
        let raw = self.store.get(&keys::google_list_items(list)).await?;
        // Corrupt local data degrades to an empty list.
        Ok(raw
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default())
    }

    async fn write_local(&self, list: &str, items: &[ShoppingItem]) -> Result<(), SessionError> {
        let json = serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string());
        self.store
            .set(&keys::google_list_items(list), &json)
            .await?;
        Ok(())
    }
}

fn next_local_id(items: &[ShoppingItem]) -> String {
    let max = items
        .iter()
        .filter_map(|i| i.id.strip_prefix("local-"))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("local-{}", max + 1)
}
