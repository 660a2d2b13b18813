//! # KeyValueStore — async string-keyed durable persistence
//!
//! [`KeyValueStore`] is the abstract persistence surface the rest of Hearth is
//! written against. It mirrors the mobile platform's async storage: string keys,
//! string values, no transactions across keys, crash-consistent per key. The two
//! batch mutators (`multi_set`, `multi_remove`) are the only way related fields
//! may be written together — a batch is applied as one unit, so a concurrent
//! reader never observes half of a session marker.
//!
//! Implementations live in sibling modules ([`crate::memory`],
//! [`crate::file_store`]). Every method is fallible; callers that gate access on
//! stored state are expected to treat an error the same as an absent value
//! (deny, never assume a prior authorized state).

use std::future::Future;

/// Errors surfaced by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The on-disk map could not be parsed.
    #[error("store data corrupt: {0}")]
    Corrupt(String),
}

/// Async trait for string-keyed, string-valued durable storage.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), StoreError>>;
    fn remove(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>>;
    /// Read several keys in order; absent keys yield `None` at their position.
    fn multi_get(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = Result<Vec<Option<String>>, StoreError>>;
    /// Write several entries as a single batch.
    fn multi_set(
        &self,
        entries: &[(&str, &str)],
    ) -> impl Future<Output = Result<(), StoreError>>;
    /// Remove several keys as a single batch. Absent keys are not an error.
    fn multi_remove(
        &self,
        keys: &[&str],
    ) -> impl Future<Output = Result<(), StoreError>>;
    /// Every key currently present, in no particular order.
    fn all_keys(&self) -> impl Future<Output = Result<Vec<String>, StoreError>>;
}
