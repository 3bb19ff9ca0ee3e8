//! Post list screen

use crate::config::DashboardConfig;
use crate::fetch::{FetchController, FetchState};
use crate::model::{Post, PostId};
use crate::router::Route;
use crate::source::{DataSource, Endpoints};
use serde::Serialize;
use std::sync::Arc;

/// One entry on the post list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub excerpt: String,
    #[serde(skip)]
    pub link: Route,
}

/// What the list screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListScreen {
    Loading,
    Error { message: String },
    Ready { count: usize, posts: Vec<PostCard> },
}

/// Fetches `/posts` and keeps the first page in source order
pub struct PostListView {
    controller: FetchController<Vec<Post>>,
    endpoints: Endpoints,
    settings: DashboardConfig,
}

impl PostListView {
    pub fn new(source: Arc<dyn DataSource>, endpoints: Endpoints, settings: DashboardConfig) -> Self {
        Self {
            controller: FetchController::new(source),
            endpoints,
            settings,
        }
    }

    pub fn mount(&self) -> ListScreen {
        let state = self.controller.observe(Some(self.endpoints.posts()));
        self.present(&state)
    }

    pub fn retry(&self) {
        self.controller.retry();
    }

    pub fn screen(&self) -> ListScreen {
        self.present(&self.controller.snapshot())
    }

    pub async fn settled(&self) -> ListScreen {
        let state = self.controller.settled().await;
        self.present(&state)
    }

    fn present(&self, state: &FetchState<Vec<Post>>) -> ListScreen {
        if state.loading {
            return ListScreen::Loading;
        }
        if let Some(error) = &state.error {
            return ListScreen::Error {
                message: error.to_string(),
            };
        }

        let posts: Vec<PostCard> = state
            .data
            .iter()
            .flatten()
            .take(self.settings.page_size)
            .map(|post| PostCard {
                id: post.id,
                title: post.title.clone(),
                excerpt: excerpt(&post.body, self.settings.excerpt_chars),
                link: Route::PostDetail(post.id),
            })
            .collect();

        ListScreen::Ready {
            count: posts.len(),
            posts,
        }
    }
}

/// First `chars` characters of `body` followed by an ellipsis
pub fn excerpt(body: &str, chars: usize) -> String {
    let mut out: String = body.chars().take(chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Reply, ScriptedSource};

    const BASE: &str = "http://api.test";

    fn posts_json(n: u64) -> String {
        let posts: Vec<Post> = (1..=n)
            .map(|id| Post {
                id,
                user_id: id % 10,
                title: format!("title {id}"),
                body: "x".repeat(150),
            })
            .collect();
        serde_json::to_string(&posts).unwrap()
    }

    fn view_with(reply: Reply) -> PostListView {
        let endpoints = Endpoints::new(BASE).unwrap();
        let source = Arc::new(ScriptedSource::new());
        source.reply(&endpoints.posts(), reply);
        PostListView::new(source, endpoints, DashboardConfig::default())
    }

    #[tokio::test]
    async fn test_truncates_to_first_twenty_in_source_order() {
        let view = view_with(Reply::json(200, &posts_json(100)));
        assert_eq!(view.mount(), ListScreen::Loading);

        let ListScreen::Ready { count, posts } = view.settled().await else {
            panic!("expected ready screen");
        };
        assert_eq!(count, 20);
        let ids: Vec<PostId> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(posts[0].link, Route::PostDetail(1));
    }

    #[tokio::test]
    async fn test_short_collection_shows_everything() {
        let view = view_with(Reply::json(200, &posts_json(3)));
        view.mount();

        let ListScreen::Ready { count, posts } = view.settled().await else {
            panic!("expected ready screen");
        };
        assert_eq!(count, 3);
        assert_eq!(posts.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let view = view_with(Reply::json(200, "[]"));
        view.mount();
        assert_eq!(
            view.settled().await,
            ListScreen::Ready {
                count: 0,
                posts: vec![]
            }
        );
    }

    #[tokio::test]
    async fn test_error_screen() {
        let view = view_with(Reply::json(500, ""));
        view.mount();
        assert_eq!(
            view.settled().await,
            ListScreen::Error {
                message: "HTTP error! status: 500".into()
            }
        );
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let endpoints = Endpoints::new(BASE).unwrap();
        let source = Arc::new(ScriptedSource::new());
        source.reply(&endpoints.posts(), Reply::transport("connection reset"));
        source.reply(&endpoints.posts(), Reply::json(200, &posts_json(2)));
        let view = PostListView::new(source, endpoints, DashboardConfig::default());

        view.mount();
        assert!(matches!(view.settled().await, ListScreen::Error { .. }));

        view.retry();
        assert_eq!(view.screen(), ListScreen::Loading);
        assert!(matches!(view.settled().await, ListScreen::Ready { count: 2, .. }));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 100), "short...");
        let long = "a".repeat(150);
        let cut = excerpt(&long, 100);
        assert_eq!(cut.chars().count(), 103);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("ünïcödé", 3), "ünï...");
    }
}
