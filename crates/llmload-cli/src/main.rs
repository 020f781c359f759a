use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use llmload_client::HttpChatClient;
use llmload_common::config::LoadConfig;
use llmload_core::{run_batch, RunReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "llmload",
    version,
    about = "Concurrent load generator for chat-completion APIs"
)]
struct Cli {
    /// Maximum number of concurrent requests
    concurrency: usize,
    /// Total number of requests to issue
    requests: usize,
    /// Model identifier sent with every request
    model: String,
    /// Endpoint URL; overrides config and LLMLOAD_URL
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Bad arguments exit 1, not clap's default 2. Help and version keep
    // clap's own exit codes.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        use clap::error::ErrorKind;
        if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
            err.exit();
        }
        let _ = err.print();
        std::process::exit(1);
    });

    let mut config = LoadConfig::load();
    if let Some(url) = cli.url {
        config.url = url;
    }

    let client = HttpChatClient::new(&config.url, config.temperature)?;

    tracing::info!(
        url = %config.url,
        model = %cli.model,
        concurrency = cli.concurrency,
        requests = cli.requests,
        "starting load run"
    );

    let start = Instant::now();
    let outcomes = run_batch(Arc::new(client), &cli.model, cli.concurrency, cli.requests).await;
    let report = RunReport::from_outcomes(outcomes, cli.concurrency, start.elapsed());

    println!("\n{}", report.render());
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
