use llmload_common::{LoadError, Result};

use crate::protocol::{ChatRequest, ChatResponse};
use crate::{ChatBackend, Completion};

/// Chat-completion client over a shared reqwest connection pool. One instance
/// serves every request of a run so connections get reused.
pub struct HttpChatClient {
    client: reqwest::Client,
    url: String,
    temperature: f32,
}

impl HttpChatClient {
    pub fn new(url: &str, temperature: f32) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LoadError::Http(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            temperature,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpChatClient {
    async fn complete(&self, model: &str, prompt: &str) -> Result<Completion> {
        let body = ChatRequest::user(model, prompt, self.temperature);
        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LoadError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LoadError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LoadError::MalformedResponse(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LoadError::MalformedResponse("response contained no choices".into()))?;

        Ok(Completion {
            answer: choice.message.content,
            completion_tokens: parsed.usage.completion_tokens,
        })
    }
}
