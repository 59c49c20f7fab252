//! Error types for the sahaay service.
//!
//! Every failure a request can hit is a variant of [`SahaayError`]. The
//! variants fall into four families:
//!
//! * **Model faults** — the provider could not be built (missing API key) or
//!   the call itself failed (network, quota, rejected prompt).
//! * **Output faults** — the model answered, but the text is not JSON or the
//!   JSON does not match either response shape.
//! * **Document faults** — an uploaded file is not a readable PDF.
//! * **Configuration / internal faults**.
//!
//! None of them are retried. The HTTP layer ([`crate::server`]) collapses all
//! of them into one generic `{"detail": ...}` response carrying the
//! `Display` text, so the messages below are what clients actually see.

use thiserror::Error;

/// All errors returned by the sahaay library.
#[derive(Debug, Error)]
pub enum SahaayError {
    // ── Model errors ──────────────────────────────────────────────────────
    /// The configured provider could not be initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured: {hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The model API call failed.
    #[error("LLM API error: {message}")]
    LlmApiError { message: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Model output was not a JSON object after fence stripping.
    #[error("Model returned malformed JSON: {detail}")]
    MalformedResponse { detail: String },

    /// Model output parsed as JSON but does not fit the declared response shape.
    #[error("Model response does not match the {mode} schema: {detail}")]
    SchemaViolation { mode: String, detail: String },

    // ── Document errors ───────────────────────────────────────────────────
    /// The uploaded bytes do not start with the `%PDF` magic.
    #[error("Uploaded file is not a valid PDF (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    /// The PDF header/xref/page tree could not be parsed.
    #[error("PDF is corrupt or unreadable: {detail}")]
    CorruptPdf { detail: String },

    /// A multipart upload did not carry the expected file part.
    #[error("Missing upload field '{field}'")]
    MissingUpload { field: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SahaayError {
    /// Shorthand for a schema violation in the given mode.
    pub(crate) fn schema(mode: &str, detail: impl Into<String>) -> Self {
        SahaayError::SchemaViolation {
            mode: mode.to_string(),
            detail: detail.into(),
        }
    }

    /// True for faults caused by the client's request rather than by the
    /// model or the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, SahaayError::MissingUpload { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_not_configured_display() {
        let e = SahaayError::ProviderNotConfigured {
            provider: "gemini".into(),
            hint: "GEMINI_API_KEY is not set".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("gemini"), "got: {msg}");
        assert!(msg.contains("GEMINI_API_KEY"), "got: {msg}");
    }

    #[test]
    fn schema_violation_names_mode() {
        let e = SahaayError::schema("SCAM_WARNING", "risk_score 140 is outside 0..=100");
        let msg = e.to_string();
        assert!(msg.contains("SCAM_WARNING"));
        assert!(msg.contains("140"));
    }

    #[test]
    fn not_a_pdf_shows_magic() {
        let e = SahaayError::NotAPdf {
            magic: b"PK\x03\x04".to_vec(),
        };
        assert!(e.to_string().contains("not a valid PDF"));
    }

    #[test]
    fn only_missing_upload_is_client_error() {
        assert!(SahaayError::MissingUpload { field: "file".into() }.is_client_error());
        assert!(!SahaayError::Internal("boom".into()).is_client_error());
        assert!(!SahaayError::MalformedResponse { detail: "eof".into() }.is_client_error());
    }
}
