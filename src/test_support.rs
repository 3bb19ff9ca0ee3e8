//! Scripted data source for unit tests

use crate::source::{DataSource, Locator, RequestOptions, SourceResponse, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// One scripted answer
#[derive(Clone)]
pub struct Reply {
    outcome: Result<SourceResponse, TransportError>,
    gate: Option<Arc<Notify>>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            outcome: Ok(SourceResponse::new(status, body)),
            gate: None,
        }
    }

    pub fn transport(message: &str) -> Self {
        Self {
            outcome: Err(TransportError(message.to_string())),
            gate: None,
        }
    }

    /// Hold the reply until the returned handle is notified
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }
}

/// Answers each locator from a queue; the last reply is repeated.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, locator: &Locator, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(locator.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self, locator: &Locator) -> usize {
        let key = locator.to_string();
        self.calls.lock().unwrap().iter().filter(|c| **c == key).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self, key: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().unwrap();
        let queue = replies.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    async fn get(
        &self,
        locator: &Locator,
        _options: &RequestOptions,
    ) -> Result<SourceResponse, TransportError> {
        let key = locator.to_string();
        self.calls.lock().unwrap().push(key.clone());

        let Some(reply) = self.next_reply(&key) else {
            return Ok(SourceResponse::new(404, "{}"));
        };
        if let Some(gate) = &reply.gate {
            gate.notified().await;
        }
        reply.outcome
    }
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber writing plain text into this capture, for use with
    /// `tracing::subscriber::with_default`
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let sink = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
