//! Chat HTTP handlers: the external-AI-answer boundary.
//!
//! `chat_query` delegates to the configured [`AnswerBackend`]; today that is
//! the mock notebook connector, so answers are canned. The request/response
//! contract is the one the real integration will keep.

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;
use uuid::Uuid;

use curator_core::{AnswerBackend, ChatRequest, ChatResponse};

use crate::{ApiError, AppState};

/// Answer a knowledge-base question.
///
/// # Returns
/// - 200 OK with `{answer, citations, conversation_id, suggested_queries}`
/// - 400 Bad Request for an empty query
pub async fn chat_query(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let conversation_id = req
        .conversation_id
        .clone()
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    debug!(
        subsystem = "api",
        component = "chat",
        op = "query",
        conversation_id = %conversation_id,
        backend = state.answers.backend_name(),
        "Dispatching chat query"
    );

    let reply = state
        .answers
        .ask(&req.query, req.source_ids.as_deref())
        .await?;

    Ok(Json(ChatResponse {
        answer: reply.answer,
        citations: reply.citations,
        conversation_id,
        suggested_queries: reply.suggested_queries,
    }))
}

/// Fetch chat history for a conversation.
///
/// Conversation history is not persisted yet; this always returns an empty
/// message list so clients can rely on the endpoint existing.
pub async fn chat_history(Path(conversation_id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "conversation_id": conversation_id,
        "messages": [],
        "message": "Chat history is not implemented yet",
    }))
}
