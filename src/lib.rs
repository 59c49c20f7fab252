//! # sahaay
//!
//! HTTP backend that turns legal small print into plain language and flags
//! scam messages, by routing user text through a generative language model.
//!
//! ## What it does
//!
//! The service performs no judgement of its own. It embeds the user's text in
//! a fixed prompt, asks the model to classify it as a legal document or a
//! scam, and checks that the JSON that comes back matches exactly one of two
//! response shapes before handing it to the client.
//!
//! ```text
//! POST /analyze
//!  │
//!  ├─ 1. Prompt     embed text + output language in the dual-mode template
//!  ├─ 2. Model      one call to gemini-2.5-flash (or any edgequake-llm provider)
//!  ├─ 3. Normalise  strip ```json fences, parse as a JSON object
//!  └─ 4. Validate   branch on analysis_mode, check fields / enums / score range
//! ```
//!
//! `POST /suggest-fix` asks the model for a fairer rewrite of a clause and
//! returns its text verbatim; `POST /parse-pdf` extracts the text of an
//! uploaded PDF without calling the model.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sahaay::{create_router, Analyzer, ServiceConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider key read from GEMINI_API_KEY
//!     let config = ServiceConfig::default();
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     let app = create_router(Arc::new(Analyzer::new(config)));
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sahaay-server` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod analyze;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use analyze::Analyzer;
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::SahaayError;
pub use pipeline::llm::{LanguageModel, ProviderModel, UnconfiguredModel};
pub use schema::{
    Analysis, AnalysisRequest, AttentionLevel, DocumentExplanation, FixSuggestion, KeyClause,
    PdfText, RiskLevel, ScamWarning,
};
pub use server::create_router;
