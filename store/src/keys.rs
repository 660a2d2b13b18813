//! # Canonical key names and cache-prefix conventions
//!
//! These names are part of the persisted on-device format and must stay
//! bit-exact across releases — a device upgrading the app keeps its session.
//!
//! ## Session marker keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | [`TOKEN`] | Opaque bearer token, present only for the credential backend. |
//! | [`USER_ID`] | Backend user id, present only alongside [`TOKEN`]. |
//! | [`PROVIDER`] | Active identity source tag: `"db"` or `"google"`. |
//! | [`LAST_USER_ID`] | Most recently active backend user id, retained across sign-outs so the next differing sign-in can purge that user's caches. |
//! | [`GOOGLE_USER_ID`] | Last-known federated user id. |
//!
//! ## Profile keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | [`PROFILE_OVERRIDE`] | JSON `{name, email}` — local edits to a federated profile that cannot be written back to the identity service. |
//! | [`AVATAR_URI`] | Locally picked avatar image URI. |
//!
//! ## Cache prefixes
//!
//! Provider-scoped cache keys start with one of the prefixes below; the purge
//! path matches them with a starts-with predicate and must never touch the
//! session marker keys above.

/// Bearer token for the credential backend.
pub const TOKEN: &str = "token";
/// Backend user id.
pub const USER_ID: &str = "userId";
/// Active provider tag: `"db"` or `"google"`.
pub const PROVIDER: &str = "provider";
/// Most recently active backend user id (survives sign-out).
pub const LAST_USER_ID: &str = "lastUserId";
/// Last-known federated user id.
pub const GOOGLE_USER_ID: &str = "googleUserId";
/// JSON `{name, email}` override for a federated profile.
pub const PROFILE_OVERRIDE: &str = "google_profile_override";
/// Locally picked avatar image URI.
pub const AVATAR_URI: &str = "userAvatar";

/// Prefix for backend-scoped list caches of one user.
///
/// Nothing currently writes under this prefix (backend mode always hits the
/// API), but historical installs may carry such keys, so the purge path still
/// sweeps it.
///
/// The prefix carries no trailing separator, so a prefix match for user `"4"`
/// also covers user `"42"`'s keys. Part of the persisted format; do not
/// tighten without a migration.
pub fn db_list_items(user_id: &str) -> String {
    format!("list_items:db:{user_id}")
}

/// Prefix for federated-mode local list storage.
pub const GOOGLE_LIST_ITEMS: &str = "list_items:google:";

/// Legacy federated-mode prefix from earlier releases; still swept on purge.
pub const LEGACY_GOOGLE_LIST_ITEMS: &str = "google_list_items:";

/// Key for one federated-mode local list.
pub fn google_list_items(list: &str) -> String {
    format!("{GOOGLE_LIST_ITEMS}{list}")
}

/// Every prefix swept when the identity `prev_id`'s cached data is purged.
///
/// The federated local prefixes are included unconditionally: a device that
/// switches identity must not leak the previous user's local-only lists either.
pub fn purge_prefixes(prev_id: &str) -> [String; 3] {
    [
        db_list_items(prev_id),
        GOOGLE_LIST_ITEMS.to_string(),
        LEGACY_GOOGLE_LIST_ITEMS.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_prefix_embeds_user_id() {
        assert_eq!(db_list_items("42"), "list_items:db:42");
    }

    #[test]
    fn db_prefix_has_no_trailing_separator() {
        // Persisted format: "list_items:db:4" prefix-matches "list_items:db:42:x".
        let prefix = db_list_items("4");
        assert!("list_items:db:42:milk".starts_with(&prefix));
        assert!(!prefix.ends_with(':'));
    }

    #[test]
    fn purge_prefixes_never_cover_marker_keys() {
        for prefix in purge_prefixes("42") {
            for marker in [TOKEN, USER_ID, PROVIDER, LAST_USER_ID, GOOGLE_USER_ID] {
                assert!(!marker.starts_with(&prefix));
            }
        }
    }
}
