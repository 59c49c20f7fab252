//! Service configuration.
//!
//! Everything the service needs at runtime is gathered into one immutable
//! [`ServiceConfig`], built once at startup via [`ServiceConfigBuilder`] and
//! shared read-only by every request handler. There is no global state: the
//! binary maps its CLI flags onto the builder, and tests build a config with
//! a scripted model in a couple of lines.

use crate::error::SahaayError;
use crate::pipeline::llm::LanguageModel;
use std::fmt;
use std::sync::Arc;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the sahaay service.
///
/// # Example
/// ```rust
/// use sahaay::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .port(8080)
///     .model("gemini-2.5-pro")
///     .build()
///     .unwrap();
/// assert_eq!(config.bind_address(), "0.0.0.0:8080");
/// ```
#[derive(Clone)]
pub struct ServiceConfig {
    /// Interface to bind. Default: `0.0.0.0`.
    pub host: String,

    /// TCP port. Default: 8000.
    pub port: u16,

    /// `edgequake_llm` provider name. Default: `gemini`.
    pub provider_name: String,

    /// Model identifier passed to the provider. Default: `gemini-2.5-flash`.
    pub model: String,

    /// Pre-constructed model. Takes precedence over `provider_name`/`model`.
    pub language_model: Option<Arc<dyn LanguageModel>>,

    /// Sampling temperature. None leaves the provider default in place.
    pub temperature: Option<f32>,

    /// Cap on generated tokens. None leaves the provider default in place.
    pub max_tokens: Option<usize>,

    /// Largest accepted request body for `POST /parse-pdf`. Default: 20 MiB.
    ///
    /// axum's built-in limit is 2 MB, too small for scanned contracts.
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            provider_name: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            language_model: None,
            temperature: None,
            max_tokens: None,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("provider_name", &self.provider_name)
            .field("model", &self.model)
            .field(
                "language_model",
                &self.language_model.as_ref().map(|m| m.describe()),
            )
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when the Gemini key is present and non-empty in the environment.
    ///
    /// Only meaningful for the `gemini` provider; the service never refuses to
    /// start on this, it only warns.
    pub fn gemini_key_present() -> bool {
        std::env::var(GEMINI_API_KEY_ENV)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = name.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn language_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.config.language_model = Some(model);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn max_upload_bytes(mut self, n: usize) -> Self {
        self.config.max_upload_bytes = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, SahaayError> {
        let c = &self.config;
        if c.language_model.is_none() {
            if c.provider_name.trim().is_empty() {
                return Err(SahaayError::InvalidConfig(
                    "provider name must not be empty".into(),
                ));
            }
            if c.model.trim().is_empty() {
                return Err(SahaayError::InvalidConfig(
                    "model must not be empty".into(),
                ));
            }
        }
        if c.max_upload_bytes == 0 {
            return Err(SahaayError::InvalidConfig(
                "max upload size must be > 0".into(),
            ));
        }
        if c.max_tokens == Some(0) {
            return Err(SahaayError::InvalidConfig("max tokens must be > 0".into()));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ServiceConfig::default();
        assert_eq!(c.bind_address(), "0.0.0.0:8000");
        assert_eq!(c.provider_name, "gemini");
        assert_eq!(c.model, "gemini-2.5-flash");
        assert!(c.temperature.is_none());
        assert_eq!(c.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn builder_overrides() {
        let c = ServiceConfig::builder()
            .host("127.0.0.1")
            .port(9000)
            .provider_name("openai")
            .model("gpt-4.1-nano")
            .max_tokens(512)
            .build()
            .unwrap();
        assert_eq!(c.bind_address(), "127.0.0.1:9000");
        assert_eq!(c.provider_name, "openai");
        assert_eq!(c.max_tokens, Some(512));
    }

    #[test]
    fn temperature_is_clamped() {
        let c = ServiceConfig::builder().temperature(7.5).build().unwrap();
        assert_eq!(c.temperature, Some(2.0));
        let c = ServiceConfig::builder().temperature(-1.0).build().unwrap();
        assert_eq!(c.temperature, Some(0.0));
    }

    #[test]
    fn empty_model_rejected() {
        let err = ServiceConfig::builder().model("  ").build().unwrap_err();
        assert!(matches!(err, SahaayError::InvalidConfig(_)));
    }

    #[test]
    fn zero_upload_limit_rejected() {
        assert!(ServiceConfig::builder().max_upload_bytes(0).build().is_err());
    }

    #[test]
    fn zero_max_tokens_rejected() {
        assert!(ServiceConfig::builder().max_tokens(0).build().is_err());
    }

    #[test]
    fn debug_hides_model_object() {
        let s = format!("{:?}", ServiceConfig::default());
        assert!(s.contains("gemini-2.5-flash"));
        assert!(s.contains("language_model: None"));
    }
}
