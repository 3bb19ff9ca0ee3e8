//! Remote Data Source
//!
//! The read-only REST API that serves posts and comments. The rest of the
//! crate only talks to it through the [`DataSource`] trait, so views and the
//! fetch controller can run against scripted sources in tests.
//!
//! - **endpoints**: builds locators for `/posts`, `/posts/{id}` and
//!   `/posts/{id}/comments`
//! - **http**: reqwest-backed implementation

mod endpoints;
mod http;

pub use endpoints::Endpoints;
pub use http::HttpSource;

use async_trait::async_trait;
use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Resource identifier (URL) driving a fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(Url);

impl Locator {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn parse(input: &str) -> Result<Self, InvalidLocator> {
        Url::parse(input)
            .map(Self)
            .map_err(|e| InvalidLocator(format!("{input}: {e}")))
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// A string that could not be turned into a [`Locator`]
#[derive(Debug, Clone, Error)]
#[error("Invalid locator {0}")]
pub struct InvalidLocator(pub String);

/// Per-request configuration. Requests are always GET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers sent with the request
    pub headers: BTreeMap<String, String>,
    /// Overrides the source's default timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Raw response: status code plus undecoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl SourceResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (connection refused, timeout, ...)
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Read-only source of JSON documents
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Issue a GET for `locator`
    async fn get(
        &self,
        locator: &Locator,
        options: &RequestOptions,
    ) -> Result<SourceResponse, TransportError>;
}
