//! Post detail screen
//!
//! Fetches the post and its comments concurrently and folds both states
//! into one screen. The post's error wins when both fail.

use crate::fetch::{FetchController, FetchState};
use crate::model::{Comment, Lookup, Post, PostId};
use crate::router::Route;
use crate::source::{DataSource, Endpoints};
use serde::Serialize;
use std::sync::Arc;

/// A post with its comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPage {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub comment_count: usize,
}

/// What the detail screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailScreen {
    Loading,
    Error { message: String },
    NotFound,
    Ready(PostPage),
}

impl DetailScreen {
    /// Where the "back" action leads from this screen
    pub fn back_route(&self) -> Route {
        Route::Dashboard
    }
}

pub struct PostDetailView {
    post: FetchController<Lookup<Post>>,
    comments: FetchController<Vec<Comment>>,
    endpoints: Endpoints,
}

impl PostDetailView {
    pub fn new(source: Arc<dyn DataSource>, endpoints: Endpoints) -> Self {
        Self {
            post: FetchController::new(Arc::clone(&source)),
            comments: FetchController::new(source),
            endpoints,
        }
    }

    /// Show `id`. Both requests are issued before either is awaited.
    pub fn mount(&self, id: PostId) -> DetailScreen {
        let post = self.post.observe(Some(self.endpoints.post(id)));
        let comments = self.comments.observe(Some(self.endpoints.comments(id)));
        combine(&post, &comments)
    }

    pub fn retry(&self) {
        self.post.retry();
        self.comments.retry();
    }

    pub fn screen(&self) -> DetailScreen {
        combine(&self.post.snapshot(), &self.comments.snapshot())
    }

    pub async fn settled(&self) -> DetailScreen {
        let (post, comments) = tokio::join!(self.post.settled(), self.comments.settled());
        combine(&post, &comments)
    }
}

fn combine(post: &FetchState<Lookup<Post>>, comments: &FetchState<Vec<Comment>>) -> DetailScreen {
    if post.loading || comments.loading {
        return DetailScreen::Loading;
    }
    if let Some(error) = post.error.as_ref().or(comments.error.as_ref()) {
        return DetailScreen::Error {
            message: error.to_string(),
        };
    }

    let Some(found) = post.data.as_ref().and_then(Lookup::found) else {
        return DetailScreen::NotFound;
    };
    let comments = comments.data.clone().unwrap_or_default();

    DetailScreen::Ready(PostPage {
        post: found.clone(),
        comment_count: comments.len(),
        comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Reply, ScriptedSource};

    const BASE: &str = "http://api.test";

    const COMMENTS_7: &str = r#"[
        {"postId": 7, "id": 31, "name": "first", "email": "a@x.io", "body": "nice"},
        {"postId": 7, "id": 32, "name": "second", "email": "b@x.io", "body": "agreed"}
    ]"#;

    fn setup() -> (Arc<ScriptedSource>, Endpoints) {
        (
            Arc::new(ScriptedSource::new()),
            Endpoints::new(BASE).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_ready_screen() {
        let (source, endpoints) = setup();
        source.reply(
            &endpoints.post(7),
            Reply::json(200, r#"{"id": 7, "userId": 3, "title": "T", "body": "B"}"#),
        );
        source.reply(&endpoints.comments(7), Reply::json(200, COMMENTS_7));
        let view = PostDetailView::new(source.clone(), endpoints.clone());

        assert_eq!(view.mount(7), DetailScreen::Loading);
        let DetailScreen::Ready(page) = view.settled().await else {
            panic!("expected ready screen");
        };
        assert_eq!(page.post.title, "T");
        assert_eq!(page.post.user_id.to_string(), "3");
        assert_eq!(page.post.body, "B");
        assert_eq!(page.comment_count, 2);
        assert_eq!(page.comments[1].name, "second");

        assert_eq!(source.calls(&endpoints.post(7)), 1);
        assert_eq!(source.calls(&endpoints.comments(7)), 1);
    }

    #[tokio::test]
    async fn test_loading_while_either_pending() {
        let (source, endpoints) = setup();
        source.reply(
            &endpoints.post(1),
            Reply::json(200, r#"{"id": 1, "userId": 1, "title": "a", "body": "b"}"#),
        );
        let (slow, release) = Reply::json(200, "[]").gated();
        source.reply(&endpoints.comments(1), slow);
        let view = PostDetailView::new(source, endpoints);

        view.mount(1);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(view.screen(), DetailScreen::Loading);

        release.notify_one();
        assert!(matches!(view.settled().await, DetailScreen::Ready(_)));
    }

    #[tokio::test]
    async fn test_post_error_takes_precedence() {
        let (source, endpoints) = setup();
        source.reply(&endpoints.post(2), Reply::json(500, ""));
        source.reply(&endpoints.comments(2), Reply::transport("comments down"));
        let view = PostDetailView::new(source, endpoints);

        view.mount(2);
        assert_eq!(
            view.settled().await,
            DetailScreen::Error {
                message: "HTTP error! status: 500".into()
            }
        );
    }

    #[tokio::test]
    async fn test_comments_error_alone() {
        let (source, endpoints) = setup();
        source.reply(
            &endpoints.post(3),
            Reply::json(200, r#"{"id": 3, "userId": 1, "title": "a", "body": "b"}"#),
        );
        source.reply(&endpoints.comments(3), Reply::transport("comments down"));
        let view = PostDetailView::new(source, endpoints);

        view.mount(3);
        let screen = view.settled().await;
        assert_eq!(
            screen,
            DetailScreen::Error {
                message: "comments down".into()
            }
        );
        assert_eq!(screen.back_route(), Route::Dashboard);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let (source, endpoints) = setup();
        source.reply(&endpoints.post(9), Reply::json(200, "{}"));
        source.reply(&endpoints.comments(9), Reply::json(200, "[]"));
        let view = PostDetailView::new(source, endpoints);

        view.mount(9);
        assert_eq!(view.settled().await, DetailScreen::NotFound);
    }

    #[tokio::test]
    async fn test_wrong_shape_post_is_a_parse_error() {
        let (source, endpoints) = setup();
        source.reply(
            &endpoints.post(7),
            Reply::json(200, r#"{"id": "7", "userId": 3, "title": "T", "body": "B"}"#),
        );
        source.reply(&endpoints.comments(7), Reply::json(200, "[]"));
        let view = PostDetailView::new(source, endpoints);

        view.mount(7);
        let DetailScreen::Error { message } = view.settled().await else {
            panic!("expected an error screen");
        };
        assert!(message.contains("invalid type"), "{message}");
    }

    #[tokio::test]
    async fn test_http_404_is_an_error_not_not_found() {
        let (source, endpoints) = setup();
        source.reply(&endpoints.post(999), Reply::json(404, "{}"));
        source.reply(&endpoints.comments(999), Reply::json(200, "[]"));
        let view = PostDetailView::new(source, endpoints);

        view.mount(999);
        assert_eq!(
            view.settled().await,
            DetailScreen::Error {
                message: "HTTP error! status: 404".into()
            }
        );
    }

    #[tokio::test]
    async fn test_switching_posts_refetches_both() {
        let (source, endpoints) = setup();
        for id in [1, 2] {
            source.reply(
                &endpoints.post(id),
                Reply::json(
                    200,
                    &format!(r#"{{"id": {id}, "userId": 1, "title": "post {id}", "body": "b"}}"#),
                ),
            );
            source.reply(&endpoints.comments(id), Reply::json(200, "[]"));
        }
        let view = PostDetailView::new(source.clone(), endpoints.clone());

        view.mount(1);
        view.settled().await;
        view.mount(2);
        let DetailScreen::Ready(page) = view.settled().await else {
            panic!("expected ready screen");
        };
        assert_eq!(page.post.title, "post 2");
        assert_eq!(page.comment_count, 0);
        assert_eq!(source.total_calls(), 4);
    }
}
