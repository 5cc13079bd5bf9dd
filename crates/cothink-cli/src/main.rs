mod app;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;
use cothink_core::{Locale, LlmClient, OpenAIClient, SessionConfig};

/// Co-author a model's chain of thought: stream, pause, edit, resume.
#[derive(Parser)]
#[command(name = "cothink", version)]
struct Cli {
    /// API key for the OpenAI-compatible backend
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the backend, e.g. https://api.deepseek.com/v1
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// Model identifier to request
    #[arg(long, env = "API_MODEL")]
    api_model: String,

    /// Visible reasoning updates per second
    #[arg(long, default_value_t = 10)]
    throughput: u32,

    /// Auto-pause after this many new paragraphs (0 disables)
    #[arg(long = "pause-after", default_value_t = 0)]
    pause_after: u32,

    /// Display language (en or zh)
    #[arg(long, default_value = "en")]
    lang: String,

    /// Transport read timeout in seconds
    #[arg(long, default_value_t = 20)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let Some(locale) = Locale::parse(&cli.lang) else {
        bail!("unsupported language: {} (expected en or zh)", cli.lang);
    };

    let mut config = SessionConfig::default();
    config.set_throughput(cli.throughput);
    config.set_pause_after_paragraphs(cli.pause_after);
    config.set_locale(locale);

    let client = OpenAIClient::new(cli.api_key)
        .with_base_url(cli.api_url)
        .with_model(cli.api_model)
        .with_timeout(Duration::from_secs(cli.timeout_secs));

    println!(
        "cothink — running `{}` @ {} (performance subject to the API provider)",
        client.model(),
        client.base_url()
    );

    app::run(Arc::new(client), config.into_shared()).await
}
