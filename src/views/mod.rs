//! View Layer
//!
//! Screens built from fetch state. Views hold no business logic beyond
//! truncation, excerpts and counts.
//!
//! - **list**: the first page of posts
//! - **detail**: one post with its comments

mod detail;
mod list;

pub use detail::{DetailScreen, PostDetailView, PostPage};
pub use list::{excerpt, ListScreen, PostCard, PostListView};

use crate::session::SessionStore;

/// Brand shown in the navigation bar
pub const BRAND: &str = "Blog Dash";

/// Navigation bar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub brand: &'static str,
    pub user_label: String,
}

impl Navbar {
    pub fn for_session(session: &SessionStore) -> Self {
        Self {
            brand: BRAND,
            user_label: session
                .user()
                .map(|profile| profile.username)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "User".to_string()),
        }
    }
}
