//! Reqwest-backed data source
//!
//! Owns transport details only. Status interpretation and JSON decoding are
//! left to the fetch controller.

use super::{DataSource, Locator, RequestOptions, SourceResponse, TransportError};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;

/// HTTP client for the posts API
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Create a source from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn get(
        &self,
        locator: &Locator,
        options: &RequestOptions,
    ) -> Result<SourceResponse, TransportError> {
        let mut request = self
            .client
            .get(locator.url().clone())
            .header(reqwest::header::ACCEPT, "application/json");
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;

        tracing::trace!(%locator, status, bytes = body.len(), "response received");

        Ok(SourceResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError(format!("Request timed out: {error}"))
    } else if error.is_connect() {
        TransportError(format!("Failed to connect: {error}"))
    } else {
        TransportError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
        Router,
    };
    use std::time::Duration;

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/posts",
                get(|| async { r#"[{"id":1,"userId":1,"title":"a","body":"b"}]"# }),
            )
            .route(
                "/posts/:id",
                get(|Path(id): Path<u64>| async move {
                    if id == 404 {
                        (StatusCode::NOT_FOUND, "{}".to_string())
                    } else {
                        (
                            StatusCode::OK,
                            format!(r#"{{"id":{id},"userId":2,"title":"t","body":"b"}}"#),
                        )
                    }
                }),
            )
            .route(
                "/echo-header",
                get(|headers: HeaderMap| async move {
                    headers
                        .get("x-trace")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string()
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn source() -> HttpSource {
        HttpSource::new(&ApiConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_success_returns_body() {
        let base = spawn_server().await;
        let locator = Locator::parse(&format!("{base}/posts")).unwrap();

        let response = source().get(&locator, &RequestOptions::default()).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.is_success());
        let value: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(value[0]["id"], 1);
    }

    #[tokio::test]
    async fn test_get_reports_error_status_without_failing() {
        let base = spawn_server().await;
        let locator = Locator::parse(&format!("{base}/posts/404")).unwrap();

        let response = source().get(&locator, &RequestOptions::default()).await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let base = spawn_server().await;
        let locator = Locator::parse(&format!("{base}/echo-header")).unwrap();
        let options = RequestOptions::default().header("x-trace", "abc");

        let response = source().get(&locator, &options).await.unwrap();
        assert_eq!(response.body, b"abc".to_vec());
    }

    #[tokio::test]
    async fn test_request_timeout_is_transport_error() {
        let base = spawn_server().await;
        let locator = Locator::parse(&format!("{base}/slow")).unwrap();
        let options = RequestOptions::default().timeout(Duration::from_millis(50));

        let err = source().get(&locator, &options).await.unwrap_err();
        assert!(err.to_string().starts_with("Request timed out"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let locator = Locator::parse(&format!("http://{addr}/posts")).unwrap();
        let result = source().get(&locator, &RequestOptions::default()).await;
        assert!(result.is_err());
    }
}
