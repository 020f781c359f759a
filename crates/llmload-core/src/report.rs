use std::fmt::Write as _;
use std::time::Duration;

use crate::driver::RequestOutcome;

/// Aggregate view of one run: token totals, timing, and the full transcript.
/// Wall-clock time covers the whole batch, not the sum of per-request times.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub total_requests: usize,
    pub max_concurrency: usize,
    pub total_completion_tokens: u64,
    pub total_time: Duration,
    pub response_times: Vec<Duration>,
    pub transcripts: Vec<(String, String)>,
}

impl RunReport {
    pub fn from_outcomes(
        outcomes: Vec<RequestOutcome>,
        max_concurrency: usize,
        total_time: Duration,
    ) -> Self {
        let total_requests = outcomes.len();
        let total_completion_tokens = outcomes.iter().map(|o| o.completion_tokens).sum();
        let response_times = outcomes.iter().map(|o| o.elapsed).collect();
        let transcripts = outcomes.into_iter().map(|o| (o.prompt, o.answer)).collect();
        Self {
            total_requests,
            max_concurrency,
            total_completion_tokens,
            total_time,
            response_times,
            transcripts,
        }
    }

    /// Mean of the recorded per-request times, 0 when there are none.
    pub fn average_time_secs(&self) -> f64 {
        if self.response_times.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.response_times.iter().map(Duration::as_secs_f64).sum();
        sum / self.response_times.len() as f64
    }

    /// Total completion tokens over total wall-clock seconds, 0 when the run
    /// took no measurable time.
    pub fn tokens_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs > 0.0 {
            self.total_completion_tokens as f64 / secs
        } else {
            0.0
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Performance Results:");
        let _ = writeln!(out, "  Total requests           : {}", self.total_requests);
        let _ = writeln!(out, "  Max concurrent requests  : {}", self.max_concurrency);
        let _ = writeln!(
            out,
            "  Total time               : {:.2} seconds",
            self.total_time.as_secs_f64()
        );
        let _ = writeln!(
            out,
            "  Average time per request : {:.2} seconds",
            self.average_time_secs()
        );
        let _ = writeln!(
            out,
            "  Tokens per second        : {:.2}",
            self.tokens_per_second()
        );

        let _ = writeln!(out, "\nDetail prompt and Answer:");
        for (i, (prompt, answer)) in self.transcripts.iter().enumerate() {
            let _ = writeln!(out, "\n--- Request #{} ---", i + 1);
            let _ = writeln!(out, "Prompt : {prompt}");
            let _ = writeln!(out, "Answer : {answer}");
        }
        out
    }
}
