//! Service entry points behind the HTTP endpoints.
//!
//! [`Analyzer`] owns the resolved model and the configuration and exposes one
//! method per model-backed endpoint. It is built once at startup and shared
//! through an `Arc`; nothing in it is mutated afterwards, so concurrent
//! requests need no coordination.

use crate::config::ServiceConfig;
use crate::error::SahaayError;
use crate::pipeline::llm::{self, LanguageModel};
use crate::pipeline::{pdf, postprocess};
use crate::prompts;
use crate::schema::{Analysis, AnalysisRequest, FixSuggestion, PdfText};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Prompt → model → normalise → validate, for each operation.
pub struct Analyzer {
    model: Arc<dyn LanguageModel>,
    config: ServiceConfig,
}

impl Analyzer {
    /// Build an analyzer, resolving the model from `config`.
    ///
    /// Never fails on a missing API key; see [`llm::resolve_model`].
    pub fn new(config: ServiceConfig) -> Self {
        let model = llm::resolve_model(&config);
        info!("Language model: {}", model.describe());
        Self { model, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Explain a legal document or assess a scam, as the model classifies it.
    ///
    /// # Errors
    /// - model faults ([`SahaayError::ProviderNotConfigured`], [`SahaayError::LlmApiError`])
    /// - [`SahaayError::MalformedResponse`] when the answer is not a JSON object
    /// - [`SahaayError::SchemaViolation`] when it matches neither shape
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis, SahaayError> {
        let start = Instant::now();
        let language = request.effective_language();
        info!(
            "Analyze: {} chars, language={}",
            request.text.chars().count(),
            language
        );

        // ── Step 1: Build prompt ─────────────────────────────────────────
        let prompt = prompts::analysis_prompt(&request.text, language);

        // ── Step 2: Call model ───────────────────────────────────────────
        let raw = self.model.generate(&prompt).await?;
        debug!("Raw model response: {}", raw);

        // ── Step 3: Normalise and validate ───────────────────────────────
        let value = postprocess::parse_model_json(&raw)?;
        let analysis = Analysis::from_value(value)?;

        info!(
            "Analyze complete: mode={}, {}ms",
            analysis.mode(),
            start.elapsed().as_millis()
        );
        Ok(analysis)
    }

    /// Ask the model for a fairer rewrite of `request.text`.
    ///
    /// The answer is free-form text and is returned as-is.
    pub async fn suggest_fix(
        &self,
        request: &AnalysisRequest,
    ) -> Result<FixSuggestion, SahaayError> {
        info!("Suggest fix: {} chars", request.text.chars().count());
        let prompt = prompts::suggest_fix_prompt(&request.text);
        let suggestion = self.model.generate(&prompt).await?;
        Ok(FixSuggestion { suggestion })
    }

    /// Extract the text of an uploaded PDF. Does not touch the model.
    pub async fn parse_pdf(&self, bytes: Vec<u8>) -> Result<PdfText, SahaayError> {
        let text = pdf::extract_text(bytes).await?;
        Ok(PdfText { text })
    }
}
