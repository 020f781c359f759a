//! Chat-completion clients: the wire types, the HTTP implementation, and an
//! instrumented in-memory mock for driver tests.

use llmload_common::Result;

pub mod http;
pub mod protocol;

#[cfg(feature = "mock")]
pub mod mock;

pub use http::HttpChatClient;

/// Answer text plus the completion-token count the server reported for it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub answer: String,
    pub completion_tokens: u64,
}

/// One chat-completion round trip against some endpoint.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion>;
}
