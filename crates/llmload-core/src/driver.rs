use std::sync::Arc;
use std::time::{Duration, Instant};

use llmload_client::ChatBackend;
use tokio::sync::Semaphore;

use crate::prompts;

pub const ERROR_ANSWER: &str = "ERROR";

/// What one request produced. Failed requests carry zero tokens, zero elapsed
/// time, and [`ERROR_ANSWER`] instead of aborting the batch.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub completion_tokens: u64,
    pub elapsed: Duration,
    pub prompt: String,
    pub answer: String,
}

impl RequestOutcome {
    fn error(prompt: String) -> Self {
        Self {
            completion_tokens: 0,
            elapsed: Duration::ZERO,
            prompt,
            answer: ERROR_ANSWER.to_string(),
        }
    }
}

/// Issue `total` chat-completion requests against `backend`, never holding
/// more than `concurrency` in flight, and return one outcome per request in
/// spawn order.
pub async fn run_batch<B: ChatBackend + 'static>(
    backend: Arc<B>,
    model: &str,
    concurrency: usize,
    total: usize,
) -> Vec<RequestOutcome> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = Vec::with_capacity(total);
    for id in 0..total {
        let backend = backend.clone();
        let model = model.to_string();
        let semaphore = semaphore.clone();
        tasks.push(tokio::spawn(async move {
            bounded_fetch(semaphore, backend.as_ref(), &model, id).await
        }));
    }

    let mut outcomes = Vec::with_capacity(total);
    for task in tasks {
        match task.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                tracing::warn!(target: "driver", "request task failed to join: {e}");
                outcomes.push(RequestOutcome::error(String::new()));
            }
        }
    }
    outcomes
}

async fn bounded_fetch<B: ChatBackend + ?Sized>(
    semaphore: Arc<Semaphore>,
    backend: &B,
    model: &str,
    id: usize,
) -> RequestOutcome {
    // acquire_owned only errors if the semaphore is closed, which never
    // happens here; a None permit must not sneak past the cap.
    let Ok(_permit) = semaphore.acquire_owned().await else {
        return RequestOutcome::error(prompts::random_prompt().to_string());
    };
    fetch_one(backend, model, id).await
}

async fn fetch_one<B: ChatBackend + ?Sized>(backend: &B, model: &str, id: usize) -> RequestOutcome {
    let prompt = prompts::random_prompt().to_string();
    let start = Instant::now();
    match backend.complete(model, &prompt).await {
        Ok(completion) => {
            let elapsed = start.elapsed();
            tracing::debug!(
                target: "driver",
                id,
                tokens = completion.completion_tokens,
                elapsed_ms = elapsed.as_millis() as u64,
                "request complete"
            );
            RequestOutcome {
                completion_tokens: completion.completion_tokens,
                elapsed,
                prompt,
                answer: completion.answer,
            }
        }
        Err(e) => {
            tracing::warn!(target: "driver", id, "request failed: {e}");
            RequestOutcome::error(prompt)
        }
    }
}
