//! In-memory backend with an in-flight high-watermark, used by driver tests
//! to observe the concurrency cap without a real server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use llmload_common::{LoadError, Result};

use crate::{ChatBackend, Completion};

pub struct MockBackend {
    reply: String,
    tokens_per_reply: u64,
    delay: Option<Duration>,
    /// Every k-th call fails with a simulated 500; 0 disables failures.
    fail_every: usize,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            reply: "mock answer".to_string(),
            tokens_per_reply: 3,
            delay: None,
            fail_every: 0,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, reply: &str, tokens: u64) -> Self {
        self.reply = reply.to_string();
        self.tokens_per_reply = tokens;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing_every(mut self, k: usize) -> Self {
        self.fail_every = k;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously in-flight calls seen so far.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ChatBackend for MockBackend {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<Completion> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let out = if self.fail_every != 0 && call % self.fail_every == 0 {
            Err(LoadError::UnexpectedStatus {
                status: 500,
                body: "injected failure".to_string(),
            })
        } else {
            Ok(Completion {
                answer: self.reply.clone(),
                completion_tokens: self.tokens_per_reply,
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}
