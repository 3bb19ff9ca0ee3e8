//! Fetch state snapshots

use super::FetchError;

/// Observable state of a fetch.
///
/// `loading` and `error` are never set together. A terminal snapshot has
/// `loading == false` and exactly one of `data` / `error`; the idle snapshot
/// (nothing initiated) has neither.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

/// Coarse phase of a [`FetchState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failure,
}

impl<T> FetchState<T> {
    pub fn idle() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    pub fn failure(error: FetchError) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(error),
        }
    }

    pub fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }

    pub fn phase(&self) -> FetchPhase {
        match (self.loading, &self.error, &self.data) {
            (true, _, _) => FetchPhase::Loading,
            (false, Some(_), _) => FetchPhase::Failure,
            (false, None, Some(_)) => FetchPhase::Success,
            (false, None, None) => FetchPhase::Idle,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase(), FetchPhase::Success | FetchPhase::Failure)
    }

    /// The error message shown to the user, if any
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::idle()
    }
}
