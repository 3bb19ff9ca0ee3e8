//! Navigation
//!
//! - **routes**: the route table and path parsing
//! - **guard**: redirect rules derived from the session
//!
//! [`Navigator`] keeps the current route and re-applies the guard on every
//! navigation and whenever the session changes.

mod guard;
mod routes;

pub use guard::{evaluate, resolve, Decision};
pub use routes::{Route, RouteError};

use crate::session::{Session, SessionStore};
use tokio::sync::watch;

/// Result of one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub resolved: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.resolved
    }
}

/// Route history guarded by the session
pub struct Navigator {
    session: SessionStore,
    session_rx: watch::Receiver<Option<Session>>,
    history: Vec<Route>,
}

impl Navigator {
    /// Start at the login screen, already passed through the guard
    pub fn new(session: SessionStore) -> Self {
        let session_rx = session.subscribe();
        let start = resolve(Route::Login, session.auth_state());
        Self {
            session,
            session_rx,
            history: vec![start],
        }
    }

    pub fn current(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::Login)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Push `target`, or the route the guard sends us to instead
    pub fn navigate(&mut self, target: Route) -> Navigation {
        let navigation = self.check(target);
        self.history.push(navigation.resolved);
        navigation
    }

    /// Like [`navigate`](Self::navigate) but replaces the current entry
    pub fn replace(&mut self, target: Route) -> Navigation {
        let navigation = self.check(target);
        self.history.pop();
        self.history.push(navigation.resolved);
        navigation
    }

    pub fn navigate_path(&mut self, path: &str) -> Result<Navigation, RouteError> {
        Ok(self.navigate(Route::parse(path)?))
    }

    /// Go back one entry; the previous route is re-checked by the guard
    pub fn back(&mut self) -> Navigation {
        if self.history.len() > 1 {
            self.history.pop();
        }
        let previous = self.current();
        self.replace(previous)
    }

    /// Re-check the current route if the session changed since the last
    /// check. Returns the navigation when the guard moved us.
    pub fn refresh(&mut self) -> Option<Navigation> {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return None;
        }
        let current = self.current();
        let navigation = self.replace(current);
        navigation.redirected().then_some(navigation)
    }

    /// Wait for the next session change and re-check the current route
    pub async fn session_changed(&mut self) -> Navigation {
        // The store outlives the navigator, so the channel stays open.
        let _ = self.session_rx.changed().await;
        let current = self.current();
        self.replace(current)
    }

    /// Log out and return to the login screen, as the navbar does
    pub fn logout(&mut self) -> Navigation {
        self.session.logout();
        self.replace(Route::Login)
    }

    fn check(&mut self, requested: Route) -> Navigation {
        self.session_rx.borrow_and_update();
        let auth = self.session.auth_state();
        let resolved = resolve(requested, auth);
        if resolved != requested {
            tracing::info!(%requested, %resolved, ?auth, "navigation redirected");
        } else {
            tracing::debug!(route = %resolved, "navigated");
        }
        Navigation {
            requested,
            resolved,
        }
    }
}
