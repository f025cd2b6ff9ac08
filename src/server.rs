//! HTTP server for rendering layers that want paragraphs over the wire.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/lengths` | Selector → paragraph count mapping |
//! | `POST` | `/paragraphs` | `{ "text", "length"?, "count"? }` → paragraphs |
//! | `POST` | `/render` | `{ "summary"?, "raw_text"?, "length"?, "count"? }` → both as paragraphs |
//! | `POST` | `/extract?length=&count=` | Raw document body (by `Content-Type`) → paragraphs |
//!
//! `count` takes precedence over `length`; when neither is given the
//! configured `paragraphs.default_length` is used.
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "invalid argument: paragraph count must be >= 1, got 0" } }
//! ```
//!
//! Error codes: `bad_request` (400), `unsupported_media_type` (415),
//! `extract_failed` (422), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser front-ends
//! served from another origin can call the API directly.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use paraform_core::{LengthMap, ParagraphCount, SummaryLength};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::extract::{extract_text, ContentType, ExtractError};
use crate::render::{DocumentView, ParagraphsOutput, SummaryResponse};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    lengths: LengthMap,
    default_length: SummaryLength,
}

impl AppState {
    /// Resolve the paragraph count for a request.
    fn count(&self, length: Option<&str>, count: Option<usize>) -> Result<ParagraphCount, AppError> {
        if let Some(n) = count {
            return ParagraphCount::new(n).map_err(|e| bad_request(e.to_string()));
        }
        let length = match length {
            Some(raw) => raw
                .parse::<SummaryLength>()
                .map_err(|e| bad_request(e.to_string()))?,
            None => self.default_length,
        };
        Ok(self.lengths.count_for(length))
    }
}

/// Build the router with all routes and layers. Used by [`run_server`]
/// and by tests.
pub fn router(config: &Config) -> Result<Router> {
    let state = AppState {
        lengths: config.length_map()?,
        default_length: config.paragraphs.default_length,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = usize::try_from(config.extract.max_bytes).unwrap_or(usize::MAX);

    Ok(Router::new()
        .route("/health", get(handle_health))
        .route("/lengths", get(handle_lengths))
        .route("/paragraphs", post(handle_paragraphs))
        .route("/render", post(handle_render))
        .route("/extract", post(handle_extract))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server on `[server].bind` and run until the process exits.
pub async fn run_server(config: &Config) -> Result<()> {
    let app = router(config)?;
    let bind_addr = &config.server.bind;

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "paragraph server listening");
    println!("Paragraph server listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    let message = message.into();
    warn!(%message, "rejected request");
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request",
        message,
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal",
        message: message.into(),
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        let (status, code) = match err {
            ExtractError::UnsupportedContentType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
            }
            _ => (StatusCode::UNPROCESSABLE_ENTITY, "extract_failed"),
        };
        AppError {
            status,
            code,
            message: err.to_string(),
        }
    }
}

// ============ GET /health, GET /lengths ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn handle_lengths(State(state): State<AppState>) -> Json<LengthMap> {
    Json(state.lengths)
}

// ============ POST /paragraphs ============

#[derive(Deserialize)]
struct ParagraphsRequest {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    length: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

async fn handle_paragraphs(
    State(state): State<AppState>,
    Json(req): Json<ParagraphsRequest>,
) -> Result<Json<ParagraphsOutput>, AppError> {
    let count = state.count(req.length.as_deref(), req.count)?;
    let out = ParagraphsOutput::from_text(req.text.as_deref().unwrap_or_default(), count);
    info!(
        strategy = %out.strategy,
        count = count.get(),
        produced = out.paragraphs.len(),
        "paragraphs"
    );
    Ok(Json(out))
}

// ============ POST /render ============

#[derive(Deserialize)]
struct RenderRequest {
    #[serde(flatten)]
    response: SummaryResponse,
    #[serde(default)]
    length: Option<String>,
    #[serde(default)]
    count: Option<usize>,
}

async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<DocumentView>, AppError> {
    let count = state.count(req.length.as_deref(), req.count)?;
    Ok(Json(DocumentView::from_response(&req.response, count)))
}

// ============ POST /extract ============

#[derive(Deserialize)]
struct CountParams {
    length: Option<String>,
    count: Option<usize>,
}

async fn handle_extract(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ParagraphsOutput>, AppError> {
    let count = state.count(params.length.as_deref(), params.count)?;
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let content_type = ContentType::from_mime(mime)?;

    let text = tokio::task::spawn_blocking(move || extract_text(&body, content_type))
        .await
        .map_err(|e| internal(format!("extraction task failed: {}", e)))??;

    let out = ParagraphsOutput::from_text(&text, count);
    info!(
        ?content_type,
        chars = text.len(),
        produced = out.paragraphs.len(),
        "extracted"
    );
    Ok(Json(out))
}
