//! # API crate — HTTP client for the Hearth credential backend
//!
//! Everything the app asks of its own backend goes through [`BackendClient`]:
//! credential sign-in, profile reads and edits, and the shopping-list
//! endpoints used when the backend is the active identity provider. The
//! federated identity service is *not* reached from here — it has its own SDK
//! surface, abstracted in the `session` crate.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`BackendClient`] — thin `reqwest` wrapper, one method per endpoint |
//! | [`models`] | Wire types (`serde`), including the tolerant `/login` response parsing |
//! | [`config`] | Base URL from the environment with a hosted default |
//! | [`error`] | [`ApiError`] taxonomy |

mod client;
pub use client::BackendClient;

mod config;
pub use config::ApiConfig;

mod error;
pub use error::ApiError;

pub mod models;
pub use models::{Credentials, ShoppingItem, ShoppingList, UserRecord};
