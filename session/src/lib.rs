//! # Session crate — provider reconciliation and identity-scoped isolation
//!
//! This crate is the headless core of Hearth's authentication story. A device
//! can be signed in through the app's own credential backend *or* through a
//! federated identity service; this crate decides which source is
//! authoritative, keeps that decision persisted, and makes sure one identity's
//! cached data never leaks into another's.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `resolver` | [`SessionResolver`] — the single authorization decision over persisted state + the identity service's live flags |
//! | `cache` | Identity-switch cache purge and the [`reconcile_identity`] contract |
//! | `guard` | [`RouteGuard`] — gates privileged screens, single deferred redirect on denial |
//! | [`actions`] | Sign-in / sign-out flows with purge-before-write ordering |
//! | `identity` | [`IdentityService`] trait over the federated provider's SDK surface |
//! | [`profile`] | Local profile override and effective-profile assembly |
//! | `lists` | Provider-routed shopping-list data (backend API vs. local-primary) |
//!
//! ## State machine
//!
//! Resolution lands in one of {pending, authorized(db), authorized(federated),
//! denied} — an explicit [`SessionState`], not booleans re-derived per screen.
//! Pending only occurs while the federated service is still loading; denial
//! always comes with the guard's redirect to the login entry point.

pub mod actions;

mod cache;
pub use cache::{purge_user_scoped, reconcile_identity, PurgeReport};

mod error;
pub use error::SessionError;

mod guard;
pub use guard::{GuardView, Navigator, RouteGuard, LOGIN_ROUTE};

mod identity;
pub use identity::{FederatedProfile, IdentityService, StaticIdentity};

mod lists;
pub use lists::ListRepository;

pub mod profile;
pub use profile::{DisplayProfile, ProfileOverride};

mod provider;
pub use provider::Provider;

mod resolver;
pub use resolver::{AuthorizedSession, SessionResolver, SessionState};
