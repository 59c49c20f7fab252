//! HTTP layer: three stateless endpoints over a shared [`Analyzer`].
//!
//! | Method | Path           | Body                    | Response                         |
//! |--------|----------------|-------------------------|----------------------------------|
//! | POST   | `/analyze`     | JSON `AnalysisRequest`  | `DocumentExplanation` or `ScamWarning` |
//! | POST   | `/suggest-fix` | JSON `AnalysisRequest`  | `{ "suggestion": ... }`          |
//! | POST   | `/parse-pdf`   | multipart, part `file`  | `{ "text": ... }`                |
//!
//! Cross-origin calls are allowed from anywhere. Every fault becomes
//! `{ "detail": "<message>" }`, the shape the web and extension clients read.

use crate::analyze::Analyzer;
use crate::error::SahaayError;
use crate::schema::{Analysis, AnalysisRequest, FixSuggestion, PdfText};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Multipart part carrying the uploaded PDF.
pub const UPLOAD_FIELD: &str = "file";

/// Application state shared across handlers.
pub type AppState = Arc<Analyzer>;

// ── Errors ───────────────────────────────────────────────────────────────

/// Handler error: any [`SahaayError`] rendered as `{detail}`.
pub struct AppError(SahaayError);

impl From<SahaayError> for AppError {
    fn from(e: SahaayError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        warn!("Request failed ({}): {}", status.as_u16(), self.0);
        (
            status,
            Json(serde_json::json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

// ── Router ───────────────────────────────────────────────────────────────

/// Create the application router.
pub fn create_router(analyzer: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = analyzer.config().max_upload_bytes;

    Router::new()
        .route("/analyze", post(analyze))
        .route("/suggest-fix", post(suggest_fix))
        .route(
            "/parse-pdf",
            post(parse_pdf).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(analyzer)
}

// ── Handlers ─────────────────────────────────────────────────────────────

async fn analyze(
    State(analyzer): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<Analysis>, AppError> {
    Ok(Json(analyzer.analyze(&request).await?))
}

async fn suggest_fix(
    State(analyzer): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<FixSuggestion>, AppError> {
    Ok(Json(analyzer.suggest_fix(&request).await?))
}

async fn parse_pdf(
    State(analyzer): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PdfText>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field.bytes().await.map_err(upload_error)?;
            return Ok(Json(analyzer.parse_pdf(bytes.to_vec()).await?));
        }
    }
    Err(SahaayError::MissingUpload {
        field: UPLOAD_FIELD.to_string(),
    }
    .into())
}

fn upload_error(e: axum::extract::multipart::MultipartError) -> AppError {
    SahaayError::Internal(format!("failed to read upload: {}", e.body_text())).into()
}
