//! API error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Error type returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Database(curator_core::Error),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<curator_core::Error> for ApiError {
    fn from(err: curator_core::Error) -> Self {
        match &err {
            curator_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            curator_core::Error::DocumentNotFound(id) => {
                ApiError::NotFound(format!("Document {} not found", id))
            }
            curator_core::Error::AnswerNotFound(id) => {
                ApiError::NotFound(format!("Golden answer {} not found", id))
            }
            curator_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            curator_core::Error::Database(sqlx_err) => {
                let msg = sqlx_err.to_string();
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    return ApiError::Conflict(msg);
                }
                if msg.contains("foreign key") || msg.contains("check constraint") {
                    return ApiError::BadRequest(msg);
                }
                ApiError::Database(err)
            }
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
