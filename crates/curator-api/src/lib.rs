//! # curator-api
//!
//! HTTP API server for the curator knowledge base.
//!
//! The router, state, and handlers live in the library so integration tests
//! can drive the service in-process; `main.rs` wires configuration and
//! serves it.

pub mod error;
pub mod handlers;
pub mod state;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use governor::RateLimiter;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;

pub use error::ApiError;
pub use state::AppState;

/// Global rate limiter type (direct quota, no keyed bucketing for an
/// internal server).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse allowed origins from the `ALLOWED_ORIGINS` environment variable
/// (comma-separated), enforcing a strict origin whitelist.
///
/// Defaults to the local frontend dev servers when unset.
pub fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://localhost:3000".to_string());

    if origins_str.trim().is_empty() {
        return vec![
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://localhost:3000"),
        ];
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// RATE LIMITING MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // If rate limiting is disabled, pass through
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

// =============================================================================
// OPENAPI DOCUMENT
// =============================================================================

/// OpenAPI documentation served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Curator Knowledge Management API",
        version = "0.1.0",
        description = "Internal knowledge base: documents, golden answers, stats, and chat"
    ),
    components(schemas(
        curator_core::Department,
        curator_core::DocumentStatus,
        curator_core::Classification,
        curator_core::TrustLabel,
        curator_core::Document,
        curator_core::DocumentVersion,
        curator_core::GoldenAnswer,
        curator_core::CreateDocumentRequest,
        curator_core::CreateVersionRequest,
        curator_core::CreateGoldenAnswerRequest,
        curator_core::ListDocumentsResponse,
        curator_core::ChatRequest,
        curator_core::ChatResponse,
        curator_core::Citation,
        curator_core::DashboardStats,
    )),
    tags(
        (name = "Documents", description = "Document CRUD and version history"),
        (name = "Golden Answers", description = "Vetted Q&A pairs"),
        (name = "Statistics", description = "Dashboard aggregates"),
        (name = "Chat", description = "AI question answering"),
        (name = "System", description = "Health checks and service info")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with the full middleware stack.
pub fn app(state: AppState) -> Router {
    use handlers::{chat, documents, golden_answers, stats, system};

    Router::new()
        // System
        .route("/", get(system::root))
        .route("/health", get(system::health_check))
        .route("/openapi.json", get(openapi_json))
        // Documents CRUD + version history
        .route(
            "/api/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/api/documents/:id",
            get(documents::get_document)
                .patch(documents::update_document)
                .delete(documents::delete_document),
        )
        .route(
            "/api/documents/:id/versions",
            get(documents::list_document_versions).post(documents::create_document_version),
        )
        // Golden answers
        .route(
            "/api/golden-answers",
            get(golden_answers::list_golden_answers).post(golden_answers::create_golden_answer),
        )
        .route(
            "/api/golden-answers/:id",
            get(golden_answers::get_golden_answer),
        )
        .route(
            "/api/golden-answers/:id/helpful",
            post(golden_answers::mark_helpful),
        )
        // Statistics
        .route("/api/stats/dashboard", get(stats::dashboard_stats))
        .route("/api/stats/departments", get(stats::department_stats))
        // Chat
        .route("/api/chat/query", post(chat::chat_query))
        .route("/api/chat/history/:conversation_id", get(chat::chat_history))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600))
        })
        // Document uploads stay small; 16 MB covers every request body here
        .layer(RequestBodyLimitLayer::new(16 * 1024 * 1024))
        .with_state(state)
}
