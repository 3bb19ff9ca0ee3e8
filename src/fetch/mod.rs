//! Fetch-State Lifecycle
//!
//! Turns a locator into an observable loading / error / data state.
//!
//! - **state**: `FetchState` snapshots and their phases
//! - **controller**: issues requests and settles state, discarding stale
//!   responses by sequence number
//! - **error**: the user-facing error taxonomy
//!
//! # Lifecycle
//!
//! ```text
//!   idle ──observe(L)──▶ loading ──response──▶ success | failure
//!                          ▲                         │
//!                          └──── retry / new L ──────┘
//! ```

mod controller;
mod error;
mod state;

pub use controller::{fetch_json, FetchController};
pub use error::FetchError;
pub use state::{FetchPhase, FetchState};
