//! Response normalisation: turn raw model text into a JSON value.
//!
//! Models asked for "only JSON" still wrap their answer in a Markdown code
//! fence often enough that parsing the raw text would fail on a large share
//! of otherwise good answers. The rules here are deliberately narrow: only a
//! fence at the very start and one at the very end (after trimming) are
//! removed. Nothing else in the text is touched, and there is no attempt to
//! repair broken JSON.
//!
//! ## Rule Order
//!
//! 1. Trim surrounding whitespace
//! 2. Strip a leading fence with a language tag (```` ```json ````), or else a
//!    bare leading fence
//! 3. Strip a trailing fence
//! 4. Parse; the root must be a JSON object
//!
//! A missing closing fence is tolerated: rule 3 simply does not fire.

use crate::error::SahaayError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

const FENCE: &str = "```";

/// Opening fence followed by a language tag such as `json`, `JSON` or `json5`.
static RE_TAGGED_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[A-Za-z0-9_+\-]+").unwrap());

/// Strip the outer code fence from a model answer, if any.
///
/// Idempotent: stripping an already stripped answer returns it unchanged.
pub fn strip_fences(raw: &str) -> &str {
    let mut s = raw.trim();

    // ── Rules 1–2: leading fence ─────────────────────────────────────────
    if let Some(m) = RE_TAGGED_OPENER.find(s) {
        s = &s[m.end()..];
    } else if let Some(rest) = s.strip_prefix(FENCE) {
        s = rest;
    }

    // ── Rule 3: trailing fence ───────────────────────────────────────────
    if let Some(rest) = s.strip_suffix(FENCE) {
        s = rest;
    }

    s.trim()
}

/// Strip fences and parse the remainder as a JSON object.
pub fn parse_model_json(raw: &str) -> Result<Value, SahaayError> {
    let body = strip_fences(raw);
    let value: Value = serde_json::from_str(body).map_err(|e| SahaayError::MalformedResponse {
        detail: e.to_string(),
    })?;
    if !value.is_object() {
        return Err(SahaayError::MalformedResponse {
            detail: "top-level value is not a JSON object".into(),
        });
    }
    Ok(value)
}

// ── Tests ────────────────────────────────────────────────────────────────────
