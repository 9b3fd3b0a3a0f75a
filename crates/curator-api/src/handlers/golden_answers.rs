//! Golden answer HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use curator_core::{
    CreateGoldenAnswerRequest, GoldenAnswer, GoldenAnswerRepository, ListGoldenAnswersRequest,
};

use crate::{ApiError, AppState};

fn default_limit() -> i64 {
    20
}

/// Query parameters for listing golden answers.
#[derive(Debug, Deserialize)]
pub struct ListGoldenAnswersQuery {
    /// Department code, e.g. "MARCOM".
    department: Option<String>,
    /// Trust label, e.g. "policy".
    trust_label: Option<String>,
    #[serde(default = "default_limit")]
    limit: i64,
}

impl ListGoldenAnswersQuery {
    fn into_request(self) -> Result<ListGoldenAnswersRequest, ApiError> {
        let department = self
            .department
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?;
        let trust_label = self
            .trust_label
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?;

        Ok(ListGoldenAnswersRequest {
            department,
            trust_label,
            limit: self.limit,
        })
    }
}

/// List golden answers, most used first.
///
/// # Returns
/// - 200 OK with the answers
/// - 400 Bad Request for an out-of-range limit or unknown filter values
pub async fn list_golden_answers(
    State(state): State<AppState>,
    Query(query): Query<ListGoldenAnswersQuery>,
) -> Result<Json<Vec<GoldenAnswer>>, ApiError> {
    let req = query.into_request()?;
    let answers = state.db.golden_answers.list(req).await?;
    Ok(Json(answers))
}

/// Get a single golden answer.
///
/// # Returns
/// - 200 OK with the answer
/// - 404 Not Found if the id has no matching row
pub async fn get_golden_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoldenAnswer>, ApiError> {
    let answer = state.db.golden_answers.fetch(id).await?;
    Ok(Json(answer))
}

/// Create a golden answer.
///
/// # Returns
/// - 201 Created with the stored answer (trust label defaulting to
///   "assumption", counters zeroed)
/// - 400 Bad Request if the question or answer is too short
pub async fn create_golden_answer(
    State(state): State<AppState>,
    Json(req): Json<CreateGoldenAnswerRequest>,
) -> Result<(StatusCode, Json<GoldenAnswer>), ApiError> {
    let answer = state.db.golden_answers.insert(req).await?;
    Ok((StatusCode::CREATED, Json(answer)))
}

/// Mark a golden answer as helpful.
///
/// Increments the helpful counter atomically and returns the new value.
///
/// # Returns
/// - 200 OK with `{message, helpful_count}`
/// - 404 Not Found if the id has no matching row
pub async fn mark_helpful(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let helpful_count = state.db.golden_answers.mark_helpful(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Marked as helpful",
        "helpful_count": helpful_count,
    })))
}
