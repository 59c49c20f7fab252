//! Stages behind the endpoints.
//!
//! Each submodule implements exactly one step, so each is testable on its own
//! and the provider or PDF backend can change without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! prompt ──▶ llm ──▶ postprocess ──▶ schema validation
//!           (model)  (fences, JSON)   (crate::schema)
//!
//! upload ──▶ pdf
//!           (text per page)
//! ```
//!
//! 1. [`llm`]         — the only stage with network I/O; one round trip per call
//! 2. [`postprocess`] — strip code fences from the answer and parse it as JSON
//! 3. [`pdf`]         — page-ordered text extraction; runs in `spawn_blocking`

pub mod llm;
pub mod pdf;
pub mod postprocess;
