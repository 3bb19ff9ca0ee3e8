//! # Blog Dash
//!
//! A small dashboard client: log in with mock credentials, then browse blog
//! posts and comments served by a read-only REST API.
//!
//! ## Modules
//!
//! - [`source`]: the remote API behind the [`DataSource`] trait
//! - [`fetch`]: the fetch-state lifecycle shared by all screens
//! - [`session`]: in-memory session store and login validation
//! - [`router`]: routes, the navigation guard and the navigator
//! - [`views`]: post list and post detail screens
//! - [`app`]: the application context tying them together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogdash::{App, Config, Credentials, Route};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::new(Config::default())?;
//!     let mut navigator = app.navigator();
//!
//!     app.session().submit(Credentials::new("alice", "longenough"))?;
//!     let navigation = navigator.navigate(Route::Dashboard);
//!
//!     let page = app.open(navigation.resolved);
//!     println!("{:?}", page.settled().await);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod render;
pub mod router;
pub mod session;
pub mod source;
pub mod views;

#[cfg(test)]
mod test_support;

pub use app::{App, Page, Screen};
pub use config::{generate_default_config, Config, ConfigError};
pub use error::{AppError, AppResult};
pub use fetch::{FetchController, FetchError, FetchPhase, FetchState};
pub use model::{Comment, Lookup, Post, PostId};
pub use router::{Navigation, Navigator, Route, RouteError};
pub use session::{AuthState, Credentials, LoginError, Profile, SessionStore};
pub use source::{DataSource, Endpoints, HttpSource, Locator, RequestOptions, SourceResponse};
pub use views::{DetailScreen, ListScreen, Navbar, PostDetailView, PostListView};
