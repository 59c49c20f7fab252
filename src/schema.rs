//! Request and response shapes exchanged with clients.
//!
//! The model is asked to classify the user's text itself and answer with one
//! of two JSON objects. Which one it chose is carried by the `analysis_mode`
//! field. [`Analysis::from_value`] branches on that marker straight after
//! parsing and validates the object strictly against the matching shape:
//! a document explanation that also carries `risk_score`, or a scam warning
//! with `key_clauses`, is rejected rather than passed through.
//!
//! Field names are the wire vocabulary clients already depend on and never
//! change with the requested output language.

use crate::error::SahaayError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Mode marker value for document explanations.
pub const DOCUMENT_MODE: &str = "DOCUMENT_EXPLANATION";

/// Mode marker value for scam warnings.
pub const SCAM_MODE: &str = "SCAM_WARNING";

/// Name of the mode marker field.
pub const MODE_FIELD: &str = "analysis_mode";

/// Output language used when the request does not name one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Fields that only a [`DocumentExplanation`] may carry.
const DOCUMENT_ONLY_FIELDS: &[&str] = &[
    "document_type",
    "summary",
    "key_clauses",
    "user_rights",
    "potential_concerns",
    "next_recommended_steps",
];

/// Fields that only a [`ScamWarning`] may carry.
const SCAM_ONLY_FIELDS: &[&str] = &[
    "risk_level",
    "risk_score",
    "alert_title",
    "immediate_assessment",
    "red_flags",
    "immediate_actions",
    "explanation_for_voice",
];

// ── Requests ─────────────────────────────────────────────────────────────

/// Body of `POST /analyze` and `POST /suggest-fix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Text to analyse, embedded verbatim in the prompt.
    pub text: String,

    /// Page the text came from. Accepted for client compatibility.
    #[serde(default)]
    pub url: String,

    /// Language the human-readable values should be written in.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: String::new(),
            language: default_language(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Requested language, falling back to English when blank.
    pub fn effective_language(&self) -> &str {
        let lang = self.language.trim();
        if lang.is_empty() {
            DEFAULT_LANGUAGE
        } else {
            lang
        }
    }
}

// ── Document mode ────────────────────────────────────────────────────────

/// How closely the user should read a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttentionLevel {
    Low,
    Medium,
    High,
}

/// One clause singled out in a document explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyClause {
    pub clause_topic: String,
    pub explanation: String,
    pub user_attention: AttentionLevel,
}

/// Plain-language explanation of a legal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExplanation {
    pub document_type: String,
    pub summary: String,
    pub key_clauses: Vec<KeyClause>,
    pub user_rights: Vec<String>,
    pub potential_concerns: Vec<String>,
    pub next_recommended_steps: Vec<String>,
}

// ── Scam mode ────────────────────────────────────────────────────────────

/// Severity of a scam warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Safety warning for a suspicious message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamWarning {
    pub risk_level: RiskLevel,
    /// 0–100. Integral floats such as `85.0` are accepted.
    #[serde(deserialize_with = "deserialize_risk_score")]
    pub risk_score: u8,
    pub alert_title: String,
    pub immediate_assessment: String,
    pub red_flags: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub explanation_for_voice: String,
}

/// Highest accepted `risk_score`.
const MAX_RISK_SCORE: u8 = 100;

fn deserialize_risk_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let n = Number::deserialize(deserializer)?;
    let max = f64::from(MAX_RISK_SCORE);
    let score = match (n.as_u64(), n.as_f64()) {
        (Some(u), _) if u <= u64::from(MAX_RISK_SCORE) => Some(u as u8),
        (None, Some(f)) if f.fract() == 0.0 && (0.0..=max).contains(&f) => Some(f as u8),
        _ => None,
    };
    score.ok_or_else(|| {
        D::Error::custom(format!(
            "risk_score {n} is not an integer in 0..={MAX_RISK_SCORE}"
        ))
    })
}

// ── Union ────────────────────────────────────────────────────────────────

/// Response of `POST /analyze`: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "analysis_mode")]
pub enum Analysis {
    #[serde(rename = "DOCUMENT_EXPLANATION")]
    Document(DocumentExplanation),
    #[serde(rename = "SCAM_WARNING")]
    Scam(ScamWarning),
}

impl Analysis {
    /// Mode marker for this value.
    pub fn mode(&self) -> &'static str {
        match self {
            Analysis::Document(_) => DOCUMENT_MODE,
            Analysis::Scam(_) => SCAM_MODE,
        }
    }

    /// Validate an untyped model answer against the shape its marker declares.
    pub fn from_value(value: Value) -> Result<Self, SahaayError> {
        let Value::Object(map) = &value else {
            return Err(SahaayError::MalformedResponse {
                detail: format!("expected a JSON object, got {}", json_kind(&value)),
            });
        };

        let mode = match map.get(MODE_FIELD) {
            Some(Value::String(m)) => m.as_str(),
            Some(other) => {
                return Err(SahaayError::schema(
                    "unknown",
                    format!("'{MODE_FIELD}' must be a string, got {}", json_kind(other)),
                ))
            }
            None => {
                return Err(SahaayError::schema(
                    "unknown",
                    format!("missing '{MODE_FIELD}'"),
                ))
            }
        };

        let (own, foreign) = match mode {
            DOCUMENT_MODE => (DOCUMENT_MODE, SCAM_ONLY_FIELDS),
            SCAM_MODE => (SCAM_MODE, DOCUMENT_ONLY_FIELDS),
            other => {
                return Err(SahaayError::schema(
                    "unknown",
                    format!(
                        "'{MODE_FIELD}' is '{other}', expected '{DOCUMENT_MODE}' or '{SCAM_MODE}'"
                    ),
                ))
            }
        };

        let stray: Vec<&str> = foreign
            .iter()
            .copied()
            .filter(|f| map.contains_key(*f))
            .collect();
        if !stray.is_empty() {
            return Err(SahaayError::schema(
                own,
                format!("carries fields of the other mode: {}", stray.join(", ")),
            ));
        }

        if own == DOCUMENT_MODE {
            let doc: DocumentExplanation = serde_json::from_value(value)
                .map_err(|e| SahaayError::schema(DOCUMENT_MODE, e.to_string()))?;
            Ok(Analysis::Document(doc))
        } else {
            let scam: ScamWarning = serde_json::from_value(value)
                .map_err(|e| SahaayError::schema(SCAM_MODE, e.to_string()))?;
            Ok(Analysis::Scam(scam))
        }
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Small responses ──────────────────────────────────────────────────────

/// Response of `POST /suggest-fix`: the model's free-form rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub suggestion: String,
}

/// Response of `POST /parse-pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfText {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document_json() -> Value {
        json!({
            "analysis_mode": "DOCUMENT_EXPLANATION",
            "document_type": "Subscription Terms",
            "summary": "This document is about a monthly gym membership.",
            "key_clauses": [
                {
                    "clause_topic": "Money / Cost",
                    "explanation": "Cancelling costs you $50.",
                    "user_attention": "HIGH"
                }
            ],
            "user_rights": ["You can cancel anytime"],
            "potential_concerns": ["Cancellation fee"],
            "next_recommended_steps": ["Ask whether the fee can be waived"]
        })
    }

    fn scam_json() -> Value {
        json!({
            "analysis_mode": "SCAM_WARNING",
            "risk_level": "CRITICAL",
            "risk_score": 95,
            "alert_title": "Phishing Suspected",
            "immediate_assessment": "Someone is trying to steal your login.",
            "red_flags": ["Urgent deadline", "Unknown link"],
            "immediate_actions": ["Do not click", "Delete the message"],
            "explanation_for_voice": "Warning. This message is a scam."
        })
    }

    #[test]
    fn request_defaults() {
        let req: AnalysisRequest = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!(req.url, "");
        assert_eq!(req.language, "English");
    }

    #[test]
    fn request_requires_text() {
        assert!(serde_json::from_str::<AnalysisRequest>(r#"{"language":"Hindi"}"#).is_err());
    }

    #[test]
    fn blank_language_falls_back_to_english() {
        let req = AnalysisRequest::new("x").with_language("   ");
        assert_eq!(req.effective_language(), "English");
        let req = AnalysisRequest::new("x").with_language(" Hindi ");
        assert_eq!(req.effective_language(), "Hindi");
    }

    #[test]
    fn valid_document_parses() {
        let a = Analysis::from_value(document_json()).unwrap();
        assert_eq!(a.mode(), DOCUMENT_MODE);
        let Analysis::Document(doc) = a else {
            panic!("expected document");
        };
        assert_eq!(doc.key_clauses[0].user_attention, AttentionLevel::High);
        assert_eq!(doc.next_recommended_steps.len(), 1);
    }

    #[test]
    fn valid_scam_parses() {
        let a = Analysis::from_value(scam_json()).unwrap();
        let Analysis::Scam(scam) = a else {
            panic!("expected scam");
        };
        assert_eq!(scam.risk_level, RiskLevel::Critical);
        assert_eq!(scam.risk_score, 95);
    }

    #[test]
    fn risk_score_bounds_are_inclusive() {
        for score in [0, 100] {
            let mut v = scam_json();
            v["risk_score"] = json!(score);
            assert!(Analysis::from_value(v).is_ok(), "score {score} should pass");
        }
    }

    #[test]
    fn integral_float_risk_score_accepted() {
        for (raw, expected) in [(json!(85.0), 85u8), (json!(100.0), 100), (json!(0.0), 0)] {
            let mut v = scam_json();
            v["risk_score"] = raw.clone();
            let Analysis::Scam(scam) = Analysis::from_value(v).unwrap() else {
                panic!("expected scam");
            };
            assert_eq!(scam.risk_score, expected, "from {raw}");
        }
    }

    #[test]
    fn risk_score_out_of_range_rejected() {
        for bad in [
            json!(101),
            json!(255),
            json!(1000),
            json!(-1),
            json!(-1.0),
            json!(42.5),
            json!(100.5),
            json!(101.0),
            json!("85"),
        ] {
            let mut v = scam_json();
            v["risk_score"] = bad.clone();
            let err = Analysis::from_value(v).unwrap_err();
            assert!(
                matches!(err, SahaayError::SchemaViolation { .. }),
                "{bad} should be a schema violation, got {err}"
            );
        }
    }

    #[test]
    fn risk_level_outside_enum_rejected() {
        for bad in ["SEVERE", "high", "", "ALTO"] {
            let mut v = scam_json();
            v["risk_level"] = json!(bad);
            assert!(Analysis::from_value(v).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn user_attention_outside_enum_rejected() {
        for bad in ["CRITICAL", "Medium", "URGENT"] {
            let mut v = document_json();
            v["key_clauses"][0]["user_attention"] = json!(bad);
            assert!(Analysis::from_value(v).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn mixed_mode_fields_rejected() {
        let mut v = document_json();
        v["risk_score"] = json!(10);
        let err = Analysis::from_value(v).unwrap_err().to_string();
        assert!(err.contains("risk_score"), "got: {err}");

        let mut v = scam_json();
        v["key_clauses"] = json!([]);
        let err = Analysis::from_value(v).unwrap_err().to_string();
        assert!(err.contains("key_clauses"), "got: {err}");
    }

    #[test]
    fn missing_required_field_rejected() {
        let mut v = scam_json();
        v.as_object_mut().unwrap().remove("red_flags");
        assert!(Analysis::from_value(v).is_err());
    }

    #[test]
    fn unknown_or_missing_mode_rejected() {
        let mut v = document_json();
        v["analysis_mode"] = json!("LEGAL_DOCUMENT");
        assert!(Analysis::from_value(v).is_err());

        let mut v = document_json();
        v.as_object_mut().unwrap().remove("analysis_mode");
        assert!(Analysis::from_value(v).is_err());
    }

    #[test]
    fn non_object_is_malformed() {
        let err = Analysis::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SahaayError::MalformedResponse { .. }));
    }

    #[test]
    fn serialises_with_mode_marker() {
        let a = Analysis::from_value(scam_json()).unwrap();
        let out = serde_json::to_value(&a).unwrap();
        assert_eq!(out["analysis_mode"], "SCAM_WARNING");
        assert_eq!(out["risk_level"], "CRITICAL");
        assert_eq!(out, scam_json());
    }
}
