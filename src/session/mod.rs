//! Session State
//!
//! In-memory record of who is logged in. The store is created once at
//! application start and handed to whatever needs it; there is no global.
//! Every change is broadcast so the navigation guard can re-evaluate.

mod credentials;

pub use credentials::{Credentials, LoginError, EMAIL_DOMAIN, MIN_PASSWORD_CHARS};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Display profile of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub username: String,
    pub email: String,
}

impl Profile {
    pub fn for_username(username: impl Into<String>) -> Self {
        let username = username.into();
        let email = format!("{username}@{EMAIL_DOMAIN}");
        Self { username, email }
    }
}

/// A live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub profile: Profile,
    pub since: DateTime<Utc>,
}

/// Authentication state derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

/// Shared handle to the session. Clones observe the same state.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn login(&self, profile: Profile) {
        tracing::info!(username = %profile.username, "logged in");
        self.state.send_replace(Some(Session {
            profile,
            since: Utc::now(),
        }));
    }

    /// Validate the login form and log in; the session is untouched on failure
    pub fn submit(&self, credentials: Credentials) -> Result<Profile, LoginError> {
        let profile = credentials.into_profile().map_err(|e| {
            tracing::debug!(error = %e, "login rejected");
            e
        })?;
        self.login(profile.clone());
        Ok(profile)
    }

    pub fn logout(&self) {
        let previous = self.state.send_replace(None);
        if let Some(session) = previous {
            tracing::info!(username = %session.profile.username, "logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn auth_state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub fn user(&self) -> Option<Profile> {
        self.state.borrow().as_ref().map(|s| s.profile.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every login and logout
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
