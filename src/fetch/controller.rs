//! Fetch-State Controller
//!
//! Drives one [`FetchState`] through its lifecycle. Every initiation (a new
//! locator or a retry) takes the next sequence number; a response may only
//! settle the state if its sequence number is still the latest one issued.
//! Superseded requests are not cancelled, only ignored when they answer.
//! Spawned tasks hold a weak reference to the state, so a response arriving
//! after the controller is dropped has nothing to write to.

use super::{FetchError, FetchState};
use crate::source::{DataSource, Locator, RequestOptions};
use serde::de::DeserializeOwned;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owns the fetch state for one view slot
pub struct FetchController<T> {
    source: Arc<dyn DataSource>,
    options: RequestOptions,
    shared: Arc<Shared<T>>,
}

struct Shared<T> {
    state: watch::Sender<FetchState<T>>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    locator: Option<Locator>,
    sequence: u64,
    task: Option<JoinHandle<()>>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle(&self, sequence: u64, outcome: Result<T, FetchError>) {
        let inner = self.lock();
        if inner.sequence != sequence {
            tracing::debug!(
                sequence,
                latest = inner.sequence,
                "discarding stale response"
            );
            return;
        }

        if let Err(e) = &outcome {
            tracing::debug!(sequence, error = %e, "fetch failed");
        } else {
            tracing::debug!(sequence, "fetch succeeded");
        }
        self.state.send_replace(FetchState::from_result(outcome));
    }
}

impl<T> FetchController<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_options(source, RequestOptions::default())
    }

    pub fn with_options(source: Arc<dyn DataSource>, options: RequestOptions) -> Self {
        let (state, _) = watch::channel(FetchState::idle());
        Self {
            source,
            options,
            shared: Arc::new(Shared {
                state,
                inner: Mutex::new(Inner::default()),
            }),
        }
    }

    /// Observe `locator`, starting a fetch when it differs from the last one.
    ///
    /// Observing the same locator again leaves the state alone.
    pub fn observe(&self, locator: Option<Locator>) -> FetchState<T>
    where
        T: Clone,
    {
        let unchanged = self.shared.lock().locator == locator;
        if !unchanged {
            self.on_locator_change(locator);
        }
        self.snapshot()
    }

    /// Switch to `locator` unconditionally: discard any prior result and,
    /// unless the locator is absent, issue a new request.
    pub fn on_locator_change(&self, locator: Option<Locator>) {
        let mut inner = self.shared.lock();
        inner.locator = locator;
        self.initiate(&mut inner);
    }

    /// Re-issue the request for the current locator. No-op without one.
    pub fn retry(&self) {
        let mut inner = self.shared.lock();
        if inner.locator.is_some() {
            self.initiate(&mut inner);
        }
    }

    pub fn locator(&self) -> Option<Locator> {
        self.shared.lock().locator.clone()
    }

    pub fn snapshot(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Wait until the current initiation (if any) reaches a terminal state
    pub async fn settled(&self) -> FetchState<T>
    where
        T: Clone,
    {
        let mut rx = self.subscribe();
        // The sender lives as long as `self`, so the channel cannot close here.
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    fn initiate(&self, inner: &mut Inner) {
        inner.sequence += 1;
        let sequence = inner.sequence;
        // Earlier requests keep running; their sequence number is now stale.
        inner.task = None;

        let Some(locator) = inner.locator.clone() else {
            self.shared.state.send_replace(FetchState::idle());
            return;
        };

        tracing::debug!(%locator, sequence, "issuing request");
        self.shared.state.send_replace(FetchState::loading());

        let shared = Arc::downgrade(&self.shared);
        let source = Arc::clone(&self.source);
        let options = self.options.clone();
        inner.task = Some(tokio::spawn(async move {
            let outcome = fetch_json::<T>(source.as_ref(), &locator, &options).await;
            deliver(&shared, sequence, outcome);
        }));
    }
}

fn deliver<T>(shared: &Weak<Shared<T>>, sequence: u64, outcome: Result<T, FetchError>) {
    match shared.upgrade() {
        Some(shared) => shared.settle(sequence, outcome),
        None => tracing::debug!(sequence, "controller dropped, response ignored"),
    }
}

/// GET `locator` and decode the body as `T`
pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    locator: &Locator,
    options: &RequestOptions,
) -> Result<T, FetchError> {
    let response = source.get(locator, options).await?;
    if !response.is_success() {
        return Err(FetchError::Http {
            status: response.status,
        });
    }
    Ok(serde_json::from_slice(&response.body)?)
}

impl<T> Drop for FetchController<T> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.sequence += 1;
        if let Some(task) = inner.task.take() {
            task.abort();
        }
    }
}
