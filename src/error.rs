//! Application error types

use crate::config::ConfigError;
use crate::router::RouteError;
use crate::session::LoginError;
use thiserror::Error;

/// Errors surfaced by the application context and the front end
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Login form rejected; the message is shown verbatim
    #[error("{0}")]
    Login(#[from] LoginError),

    #[error("{0}")]
    Route(#[from] RouteError),
}

pub type AppResult<T> = Result<T, AppError>;
