//! Blog Data Model
//!
//! Immutable snapshots of the records served by the remote API. Nothing here
//! is persisted locally.

use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Identifier of a post on the remote API
pub type PostId = u64;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// Result of fetching a single record.
///
/// An empty body (`null` or `{}`) becomes [`Lookup::Missing`]. Anything
/// else must decode as `T`; malformed JSON and records of the wrong shape
/// are parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Missing,
}

impl<T> Lookup<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => None,
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lookup<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let empty = match &value {
            serde_json::Value::Null => true,
            serde_json::Value::Object(fields) => fields.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(Lookup::Missing);
        }
        serde_json::from_value(value)
            .map(Lookup::Found)
            .map_err(serde::de::Error::custom)
    }
}
