//! Model invocation: send one prompt, get one block of text back.
//!
//! [`LanguageModel`] is the seam between request handling and the provider.
//! Production code uses [`ProviderModel`], a thin wrapper over an
//! `edgequake_llm` provider; tests substitute a scripted implementation.
//!
//! There is exactly one round trip per call. No retry, no timeout and no
//! streaming: a slow upstream holds its request for as long as it takes, and
//! any failure surfaces as [`SahaayError::LlmApiError`].

use crate::config::ServiceConfig;
use crate::error::SahaayError;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// A text-in, text-out generative model.
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` as a single user turn and return the raw answer text.
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, SahaayError>>;

    /// Human-readable identifier for logs, e.g. `gemini/gemini-2.5-flash`.
    fn describe(&self) -> String;
}

/// [`LanguageModel`] backed by an `edgequake_llm` provider.
pub struct ProviderModel {
    provider: Arc<dyn LLMProvider>,
    label: String,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
}

impl ProviderModel {
    pub fn new(provider: Arc<dyn LLMProvider>, label: impl Into<String>) -> Self {
        Self {
            provider,
            label: label.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Apply the sampling overrides from `config`.
    pub fn with_options(mut self, config: &ServiceConfig) -> Self {
        self.temperature = config.temperature;
        self.max_tokens = config.max_tokens;
        self
    }

    fn options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            ..Default::default()
        }
    }
}

impl LanguageModel for ProviderModel {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, SahaayError>> {
        Box::pin(async move {
            let start = Instant::now();
            let messages = vec![ChatMessage::user(prompt)];
            let options = self.options();

            let response = self
                .provider
                .chat(&messages, Some(&options))
                .await
                .map_err(|e| SahaayError::LlmApiError {
                    message: format!("{}", e),
                })?;

            debug!(
                "{}: {} input tokens, {} output tokens, {:?}",
                self.label,
                response.prompt_tokens,
                response.completion_tokens,
                start.elapsed()
            );
            Ok(response.content)
        })
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Stand-in used when the provider could not be built at startup.
///
/// The service still starts; every call fails with the original reason.
pub struct UnconfiguredModel {
    provider: String,
    hint: String,
}

impl UnconfiguredModel {
    pub fn new(provider: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            hint: hint.into(),
        }
    }
}

impl LanguageModel for UnconfiguredModel {
    fn generate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, SahaayError>> {
        Box::pin(async move {
            Err(SahaayError::ProviderNotConfigured {
                provider: self.provider.clone(),
                hint: self.hint.clone(),
            })
        })
    }

    fn describe(&self) -> String {
        format!("{} (unconfigured)", self.provider)
    }
}

/// Resolve the model, from most-specific to least-specific.
///
/// 1. **Pre-built model** (`config.language_model`) — used as-is.
/// 2. **Named provider + model id** — built through
///    [`ProviderFactory::create_llm_provider`], which reads the provider's
///    API key (`GEMINI_API_KEY` for Gemini) from the environment.
///
/// If step 2 fails, a warning is logged and an [`UnconfiguredModel`] is
/// returned so startup can continue.
pub fn resolve_model(config: &ServiceConfig) -> Arc<dyn LanguageModel> {
    if let Some(ref model) = config.language_model {
        return Arc::clone(model);
    }

    let label = format!("{}/{}", config.provider_name, config.model);
    match ProviderFactory::create_llm_provider(&config.provider_name, &config.model) {
        Ok(provider) => Arc::new(ProviderModel::new(provider, label).with_options(config)),
        Err(e) => {
            warn!(
                "Could not initialise LLM provider {}: {}. Model calls will fail until this is fixed.",
                label, e
            );
            Arc::new(UnconfiguredModel::new(
                config.provider_name.clone(),
                format!("{e}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_model_fails_every_call() {
        let model = UnconfiguredModel::new("gemini", "GEMINI_API_KEY is not set");
        for _ in 0..2 {
            let err = model.generate("hello").await.unwrap_err();
            assert!(matches!(err, SahaayError::ProviderNotConfigured { .. }));
            assert!(err.to_string().contains("GEMINI_API_KEY"));
        }
        assert_eq!(model.describe(), "gemini (unconfigured)");
    }

    #[test]
    fn prebuilt_model_takes_priority() {
        let prebuilt: Arc<dyn LanguageModel> = Arc::new(UnconfiguredModel::new("stub", "test"));
        let config = ServiceConfig::builder()
            .language_model(Arc::clone(&prebuilt))
            .build()
            .unwrap();
        let resolved = resolve_model(&config);
        assert!(Arc::ptr_eq(&resolved, &prebuilt));
    }
}
