//! Endpoint family of the posts API

use super::Locator;
use crate::config::ConfigError;
use crate::model::PostId;
use reqwest::Url;

/// Builds locators relative to the configured API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |error: String| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            error,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("cannot be used as a base URL".to_string()));
        }

        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /posts`
    pub fn posts(&self) -> Locator {
        self.at(&["posts"])
    }

    /// `GET /posts/{id}`
    pub fn post(&self, id: PostId) -> Locator {
        self.at(&["posts", &id.to_string()])
    }

    /// `GET /posts/{id}/comments`
    pub fn comments(&self, id: PostId) -> Locator {
        self.at(&["posts", &id.to_string(), "comments"])
    }

    fn at(&self, segments: &[&str]) -> Locator {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        Locator::new(url)
    }
}
