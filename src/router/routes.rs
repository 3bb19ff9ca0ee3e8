//! Route table

use crate::model::PostId;
use std::fmt;
use thiserror::Error;

/// A screen the user can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Login,
    /// `/dashboard`, the post list
    Dashboard,
    /// `/dashboard/post/{id}`
    PostDetail(PostId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches {0:?}")]
    Unknown(String),
}

impl Route {
    /// Landing screen for authenticated users
    pub const LANDING: Route = Route::Dashboard;

    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let unknown = || RouteError::Unknown(path.to_string());
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Route::Login),
            ["dashboard"] => Ok(Route::Dashboard),
            ["dashboard", "post", id] => id.parse().map(Route::PostDetail).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::PostDetail(id) => format!("/dashboard/post/{id}"),
        }
    }

    /// Whether the route requires an authenticated session
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
