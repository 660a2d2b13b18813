//! The identity-source discriminator persisted under the `provider` key.

/// Which identity source is authoritative for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// The app's own credential backend.
    Db,
    /// The federated identity service.
    Federated,
    /// No usable session marker.
    Unset,
}

impl Provider {
    /// The persisted tag, or `None` for [`Provider::Unset`]. These strings are
    /// part of the on-device format and must not change.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Provider::Db => Some("db"),
            Provider::Federated => Some("google"),
            Provider::Unset => None,
        }
    }

    /// Parse a persisted tag; anything unrecognised is treated as unset.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("db") => Provider::Db,
            Some("google") => Provider::Federated,
            _ => Provider::Unset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        for provider in [Provider::Db, Provider::Federated] {
            assert_eq!(Provider::from_tag(provider.tag()), provider);
        }
        assert_eq!(Provider::from_tag(None), Provider::Unset);
        assert_eq!(Provider::from_tag(Some("facebook")), Provider::Unset);
    }
}
