//! Fetch error types

use crate::source::TransportError;
use thiserror::Error;

/// Terminal failure of one fetch initiation.
///
/// Display strings are what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered outside the 2xx range
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// No response was received
    #[error("{0}")]
    Transport(String),

    /// The body was not the expected JSON
    #[error("{0}")]
    Parse(String),
}

impl From<TransportError> for FetchError {
    fn from(err: TransportError) -> Self {
        FetchError::Transport(err.0)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
