//! Application Context
//!
//! Created once at start-up. Owns the configuration, the session store and
//! the data source, and hands them to the views it mounts.

use crate::config::Config;
use crate::error::AppResult;
use crate::model::PostId;
use crate::router::{Navigator, Route};
use crate::session::SessionStore;
use crate::source::{DataSource, Endpoints, HttpSource};
use crate::views::{DetailScreen, ListScreen, Navbar, PostDetailView, PostListView};
use serde::Serialize;
use std::sync::Arc;

pub struct App {
    config: Config,
    session: SessionStore,
    source: Arc<dyn DataSource>,
    endpoints: Endpoints,
}

/// A mounted screen. Dropping it tears down its fetches.
pub enum Page {
    Login,
    List(PostListView),
    Detail { id: PostId, view: PostDetailView },
}

/// Rendered state of a [`Page`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", content = "view", rename_all = "snake_case")]
pub enum Screen {
    Login,
    List(ListScreen),
    Detail(DetailScreen),
}

impl App {
    /// Build the context with the HTTP source described by `config.api`
    pub fn new(config: Config) -> AppResult<Self> {
        let source = Arc::new(HttpSource::new(&config.api)?);
        Self::with_source(config, source)
    }

    pub fn with_source(config: Config, source: Arc<dyn DataSource>) -> AppResult<Self> {
        let endpoints = Endpoints::new(&config.api.base_url)?;
        tracing::debug!(base_url = %endpoints.base(), "application context created");
        Ok(Self {
            config,
            session: SessionStore::new(),
            source,
            endpoints,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.session.clone())
    }

    pub fn navbar(&self) -> Navbar {
        Navbar::for_session(&self.session)
    }

    pub fn post_list(&self) -> PostListView {
        PostListView::new(
            Arc::clone(&self.source),
            self.endpoints.clone(),
            self.config.dashboard.clone(),
        )
    }

    pub fn post_detail(&self) -> PostDetailView {
        PostDetailView::new(Arc::clone(&self.source), self.endpoints.clone())
    }

    /// Mount the view for an already guarded route
    pub fn open(&self, route: Route) -> Page {
        match route {
            Route::Login => Page::Login,
            Route::Dashboard => {
                let view = self.post_list();
                view.mount();
                Page::List(view)
            }
            Route::PostDetail(id) => {
                let view = self.post_detail();
                view.mount(id);
                Page::Detail { id, view }
            }
        }
    }
}

impl Page {
    pub fn route(&self) -> Route {
        match self {
            Page::Login => Route::Login,
            Page::List(_) => Route::Dashboard,
            Page::Detail { id, .. } => Route::PostDetail(*id),
        }
    }

    pub fn screen(&self) -> Screen {
        match self {
            Page::Login => Screen::Login,
            Page::List(view) => Screen::List(view.screen()),
            Page::Detail { view, .. } => Screen::Detail(view.screen()),
        }
    }

    pub async fn settled(&self) -> Screen {
        match self {
            Page::Login => Screen::Login,
            Page::List(view) => Screen::List(view.settled().await),
            Page::Detail { view, .. } => Screen::Detail(view.settled().await),
        }
    }

    pub fn retry(&self) {
        match self {
            Page::Login => {}
            Page::List(view) => view.retry(),
            Page::Detail { view, .. } => view.retry(),
        }
    }
}
