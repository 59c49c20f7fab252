//! Prompt templates sent to the language model.
//!
//! All prompt text lives here so the wording can change without touching
//! request handling, and so tests can inspect prompts without a live model.
//!
//! The analysis prompt is assembled from fixed sections. The two JSON
//! templates spell out the exact field names and enumerations that
//! [`crate::schema::Analysis::from_value`] later enforces, so the two must be
//! edited together.

use crate::schema::{DOCUMENT_MODE, SCAM_MODE};

/// Role framing at the top of the analysis prompt.
pub const ROLE: &str = "Role: You are Sahaay, a protective and friendly digital companion. \
Use short, everyday words and avoid legal jargon. Explain things the way a wise \
friend would over a cup of tea.";

/// Classification directive: the model picks the category itself.
pub const CLASSIFY: &str = r#"Task: Read the content below and decide whether it is mainly a LEGAL DOCUMENT that needs explaining or a SCAM / ALERT that needs a safety warning.

Goal: Make safety simple. Be brief, scannable and instantly understandable.

INSTRUCTIONS:
1. CLASSIFY the content into exactly ONE category:
   - LEGAL_DOCUMENT: contracts, terms of service, privacy policies, leases, agreements.
   - SCAM_ALERT: suspicious messages, emails, links, prize claims or urgent demands.
2. Answer with the ONE JSON format below that matches your category."#;

/// JSON template for `LEGAL_DOCUMENT` content.
pub const DOCUMENT_TEMPLATE: &str = r#"{
  "analysis_mode": "DOCUMENT_EXPLANATION",
  "document_type": "e.g. Privacy Policy",
  "summary": "One or two simple sentences, starting with 'This document is about...'",
  "key_clauses": [
    {
      "clause_topic": "Money / Cost",
      "explanation": "Simple explanation, e.g. 'You will be charged $10 every month.'",
      "user_attention": "HIGH"
    }
  ],
  "user_rights": ["You can cancel anytime", "You own your data"],
  "potential_concerns": ["Hidden fees", "Hard to cancel"],
  "next_recommended_steps": ["Check the cancellation policy", "Save a copy"]
}"#;

/// JSON template for `SCAM_ALERT` content.
pub const SCAM_TEMPLATE: &str = r#"{
  "analysis_mode": "SCAM_WARNING",
  "risk_level": "HIGH",
  "risk_score": 85,
  "alert_title": "Phishing Suspected",
  "immediate_assessment": "This looks like a scam. They are trying to steal your password.",
  "red_flags": ["Fake urgent deadline", "Strange link", "Asks for money"],
  "immediate_actions": ["Delete the message", "Block the sender", "Do not click any link"],
  "explanation_for_voice": "Warning. This looks like a scam trying to steal your personal details. Do not click any links and delete the message now."
}"#;

/// Build the dual-mode analysis prompt.
///
/// `text` is embedded verbatim (no length or content checks); an empty
/// string still yields a complete prompt.
pub fn analysis_prompt(text: &str, language: &str) -> String {
    format!(
        r#"{ROLE}

{CLASSIFY}

Content to analyse:
"""
{text}
"""

---

FORMAT 1 - for LEGAL_DOCUMENT. Focus on "What does this actually mean for me?"
"user_attention" must be one of: LOW, MEDIUM, HIGH.

{DOCUMENT_TEMPLATE}

FORMAT 2 - for SCAM_ALERT. Focus on "Is this safe?" Use short, direct warnings.
"risk_level" must be one of: LOW, MEDIUM, HIGH, CRITICAL.
"risk_score" must be a whole number from 0 to 100.

{SCAM_TEMPLATE}

---

Your final output must be ONE valid JSON object following exactly one of the two formats above, and nothing else.

LANGUAGE:
The user wants the analysis in {language}.
Write every explanation, summary, title and list item in {language}.
Keep all JSON keys in English exactly as shown. Also keep "analysis_mode" ("{DOCUMENT_MODE}" or "{SCAM_MODE}"), "user_attention" and "risk_level" values in English capitals. Translate only the other VALUES into {language}.
"#
    )
}

/// Build the prompt asking for a fairer rewrite of one clause.
pub fn suggest_fix_prompt(clause: &str) -> String {
    format!(
        r#"Rewrite this unfair clause so it is balanced and fair to the user.

UNFAIR CLAUSE: {clause}

Provide:
1. A fairer version
2. Why the original was a problem
3. The key changes you made

Keep it under 100 words."#
    )
}
