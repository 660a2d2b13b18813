//! # Route Guard — gating privileged screens on session resolution
//!
//! [`RouteGuard`] wraps a privileged screen. The embedding calls
//! [`RouteGuard::on_focus`] on mount and on every dependency change (identity
//! service load/signed-in state); the returned [`GuardView`] says whether to
//! render a neutral waiting state or the wrapped content with the resolved
//! identity passed through.
//!
//! A denied resolution schedules exactly one redirect to the login entry point
//! via the injected [`Navigator`]; repeated focus events while still denied do
//! not redirect again, and re-resolving an already-authorized session never
//! triggers a redirect or a purge. `Navigator::replace` implementations should
//! defer the actual navigation until the current UI interaction settles, so an
//! in-flight gesture is not visibly interrupted.

use store::KeyValueStore;

use crate::identity::IdentityService;
use crate::resolver::{AuthorizedSession, SessionResolver, SessionState};

/// Route name of the login entry point.
pub const LOGIN_ROUTE: &str = "Login";

/// Navigation capability handed to the guard. Only `replace` is used.
pub trait Navigator {
    fn replace(&mut self, route: &str);
}

/// What the embedding should render after a focus event.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardView {
    /// Neutral waiting state: resolution pending, or a redirect is in flight.
    Waiting,
    /// Render the wrapped screen with the resolved identity.
    Content(AuthorizedSession),
}

/// Guards a privileged screen behind session resolution.
pub struct RouteGuard<S, I, N> {
    resolver: SessionResolver<S, I>,
    navigator: N,
    redirected: bool,
}

impl<S: KeyValueStore, I: IdentityService, N: Navigator> RouteGuard<S, I, N> {
    pub fn new(resolver: SessionResolver<S, I>, navigator: N) -> Self {
        Self {
            resolver,
            navigator,
            redirected: false,
        }
    }

    pub fn resolver(&self) -> &SessionResolver<S, I> {
        &self.resolver
    }

    /// Resolve and decide what to render. Call on mount and on every focus or
    /// identity-service state change; idempotent under repeated invocation.
    pub async fn on_focus(&mut self) -> GuardView {
        match self.resolver.resolve().await {
            SessionState::Pending => GuardView::Waiting,
            SessionState::Authorized(session) => {
                self.redirected = false;
                GuardView::Content(session)
            }
            SessionState::Denied => {
                if !self.redirected {
                    self.redirected = true;
                    self.navigator.replace(LOGIN_ROUTE);
                }
                GuardView::Waiting
            }
        }
    }
}
