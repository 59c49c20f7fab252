//! Fixtures shared by the integration tests.
//!
//! `pdf` is also compiled into the crate's unit tests via `#[path]`, so it
//! must only depend on `lopdf`.

pub mod pdf;
