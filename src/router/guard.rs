//! Navigation guard

use super::Route;
use crate::session::AuthState;

/// Outcome of checking a route against the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Route),
}

/// Anonymous visitors may only see the login screen; authenticated users
/// never see it.
pub fn evaluate(route: Route, auth: AuthState) -> Decision {
    match (auth, route) {
        (AuthState::Anonymous, route) if route.is_protected() => Decision::Redirect(Route::Login),
        (AuthState::Authenticated, Route::Login) => Decision::Redirect(Route::LANDING),
        _ => Decision::Allow,
    }
}

/// Follow the guard to the route that will actually be shown
pub fn resolve(route: Route, auth: AuthState) -> Route {
    match evaluate(route, auth) {
        Decision::Allow => route,
        Decision::Redirect(target) => target,
    }
}
