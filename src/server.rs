//! HTTP API for Form 16 uploads
//!
//! - POST /upload - multipart field `file` holding the PDF
//! - GET /health - liveness and uptime
//!
//! Errors are always `{"error": "..."}`.

use crate::error::{Form16Error, Result};
use crate::form16::{self, ExtractionResult};
use crate::pdf_extractor::extract_text_from_pdf;
use crate::settings::Settings;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// AppState
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    start_time: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self { start_time: Instant::now() }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Error type
// ============================================================================

pub struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({"error": self.1}))).into_response()
    }
}

impl From<Form16Error> for AppError {
    fn from(e: Form16Error) -> Self {
        AppError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, msg.into())
}

// ============================================================================
// Response types
// ============================================================================

#[derive(Serialize)]
struct DataResponse {
    data: ExtractionResult,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: u64,
}

// ============================================================================
// Handlers
// ============================================================================

/// Pull the `file` field out of the form; other fields are skipped
async fn read_file_field(mut multipart: Multipart) -> std::result::Result<Option<Bytes>, AppError> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| AppError(e.status(), e.body_text()))?;
        let Some(field) = field else { return Ok(None) };

        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError(e.status(), e.body_text()))?;
            return Ok(Some(bytes));
        }
    }
}

fn process_pdf(bytes: &[u8]) -> Result<ExtractionResult> {
    let text = extract_text_from_pdf(bytes)?;
    form16::extract(&text)
}

// POST /upload
async fn upload_handler(
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<DataResponse>, AppError> {
    // A body that is not multipart carries no file either
    let Ok(multipart) = multipart else {
        return Err(bad_request("No file provided"));
    };
    let Some(bytes) = read_file_field(multipart).await? else {
        return Err(bad_request("No file provided"));
    };

    let size = bytes.len();
    let result = tokio::task::spawn_blocking(move || process_pdf(&bytes))
        .await
        .map_err(|e| AppError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match result {
        Ok(data) => {
            tracing::info!(bytes = size, fields = data.populated_fields(), "form 16 extracted");
            Ok(Json(DataResponse { data }))
        }
        Err(e) => {
            tracing::warn!(bytes = size, error = %e, "form 16 extraction failed");
            Err(e.into())
        }
    }
}

// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn not_found_handler() -> AppError {
    AppError(StatusCode::NOT_FOUND, "Not found".to_string())
}

// ============================================================================
// Router
// ============================================================================

pub fn build_router(state: AppState, settings: &Settings) -> Router {
    let router = Router::new()
        .route("/upload", post(upload_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        // Overflow surfaces as a multipart error, so the 413 keeps the JSON body
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if settings.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind and serve until Ctrl-C
pub async fn serve(settings: Settings) -> std::io::Result<()> {
    let app = build_router(AppState::new(), &settings);
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;

    tracing::info!(addr = %settings.bind_addr, max_upload_bytes = settings.max_upload_bytes, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
}
