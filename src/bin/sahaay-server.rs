//! Server binary for sahaay.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ServiceConfig`, sets up logging and serves the router.

use anyhow::{Context, Result};
use clap::Parser;
use sahaay::config::GEMINI_API_KEY_ENV;
use sahaay::{create_router, Analyzer, ServiceConfig};
use std::io;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"ENDPOINTS:
  POST /analyze       {"text": "...", "url": "", "language": "English"}
  POST /suggest-fix   {"text": "..."}
  POST /parse-pdf     multipart/form-data with a "file" part

EXAMPLES:
  # Serve on the default 0.0.0.0:8000 with Gemini
  export GEMINI_API_KEY=...
  sahaay-server

  # Different port and model
  sahaay-server --port 8080 --model gemini-2.5-pro

  # Any other edgequake-llm provider
  sahaay-server --provider openai --model gpt-4.1-nano

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY   Google Gemini API key (checked at startup, required at request time)
  RUST_LOG         Log filter, e.g. "sahaay=debug,tower_http=info"
"#;

/// Plain-language legal explanations and scam warnings over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "sahaay-server",
    version,
    about = "Plain-language legal explanations and scam warnings over HTTP",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Interface to bind.
    #[arg(long, env = "SAHAAY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// TCP port.
    #[arg(short, long, env = "SAHAAY_PORT", default_value_t = 8000)]
    port: u16,

    /// LLM provider: gemini, openai, anthropic, ollama, ...
    #[arg(long, env = "SAHAAY_PROVIDER", default_value = "gemini")]
    provider: String,

    /// Model ID passed to the provider.
    #[arg(long, env = "SAHAAY_MODEL", default_value = "gemini-2.5-flash")]
    model: String,

    /// Sampling temperature (0.0–2.0). Provider default when unset.
    #[arg(long, env = "SAHAAY_TEMPERATURE")]
    temperature: Option<f32>,

    /// Max output tokens per model call. Provider default when unset.
    #[arg(long, env = "SAHAAY_MAX_TOKENS")]
    max_tokens: Option<usize>,

    /// Largest accepted PDF upload, in megabytes.
    #[arg(long, env = "SAHAAY_MAX_UPLOAD_MB", default_value_t = 20)]
    max_upload_mb: usize,

    /// Enable DEBUG-level tracing logs (includes raw model answers).
    #[arg(short, long, env = "SAHAAY_VERBOSE")]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> Result<ServiceConfig> {
        let mut builder = ServiceConfig::builder()
            .host(&self.host)
            .port(self.port)
            .provider_name(&self.provider)
            .model(&self.model)
            .max_upload_bytes(self.max_upload_mb.saturating_mul(1024 * 1024));
        if let Some(t) = self.temperature {
            builder = builder.temperature(t);
        }
        if let Some(n) = self.max_tokens {
            builder = builder.max_tokens(n);
        }
        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let config = cli.to_config()?;
    if config.provider_name == "gemini" && !ServiceConfig::gemini_key_present() {
        warn!(
            "{} not found in environment; model calls will fail until it is set.",
            GEMINI_API_KEY_ENV
        );
    }

    // ── Serve ────────────────────────────────────────────────────────────
    let address = config.bind_address();
    let analyzer = Arc::new(Analyzer::new(config));
    let app = create_router(analyzer);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
