//! Document HTTP handlers.
//!
//! CRUD over documents plus the version history sub-resource. Filter and
//! pagination parameters arrive as plain strings and are validated here
//! before any query runs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use curator_core::{
    CreateDocumentRequest, CreateVersionRequest, Document, DocumentRepository, DocumentVersion,
    FileStore, ListDocumentsRequest, ListDocumentsResponse, UpdateDocumentRequest,
    VersionRepository,
};

use crate::{ApiError, AppState};

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

/// Query parameters for listing documents.
#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    /// Department code, e.g. "B2B".
    department: Option<String>,
    /// Document status, e.g. "published".
    status: Option<String>,
    /// Case-insensitive substring match on title.
    search: Option<String>,
}

impl ListDocumentsQuery {
    fn into_request(self) -> Result<ListDocumentsRequest, ApiError> {
        let department = self
            .department
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?;
        let status = self
            .status
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(ApiError::from)?;

        Ok(ListDocumentsRequest {
            page: self.page,
            page_size: self.page_size,
            department,
            status,
            search: self.search,
        })
    }
}

/// List documents with pagination and filtering.
///
/// # Returns
/// - 200 OK with `{items, total, page, page_size}`
/// - 400 Bad Request for out-of-range pagination or unknown filter values
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<Json<ListDocumentsResponse>, ApiError> {
    let req = query.into_request()?;
    let response = state.db.documents.list(req).await?;
    Ok(Json(response))
}

/// Get a single document.
///
/// # Returns
/// - 200 OK with the document
/// - 404 Not Found if the id has no matching row
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, ApiError> {
    let document = state.db.documents.fetch(id).await?;
    Ok(Json(document))
}

/// Create a document.
///
/// # Returns
/// - 201 Created with the stored document (server-assigned id, status
///   defaulting to draft, classification to internal)
/// - 400 Bad Request if validation fails
pub async fn create_document(
    State(state): State<AppState>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = state.db.documents.insert(req).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// Partially update a document.
///
/// Only supplied fields change; explicit `null` clears the nullable
/// `description`/`review_date` fields.
///
/// # Returns
/// - 200 OK with the updated document
/// - 400 Bad Request if validation fails
/// - 404 Not Found if the id has no matching row
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let document = state.db.documents.update(id, req).await?;
    Ok(Json(document))
}

/// Delete a document and its versions.
///
/// # Returns
/// - 204 No Content on success
/// - 404 Not Found if the id has no matching row
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let document = state.db.documents.fetch(id).await?;
    state.db.documents.delete(id).await?;

    // Best-effort cleanup of the stored binary; the row is already gone.
    if let Some(file_id) = &document.drive_file_id {
        if let Err(err) = state.drive.delete(file_id).await {
            warn!(
                subsystem = "api",
                component = "documents",
                document_id = %id,
                file_id = %file_id,
                error = %err,
                "Failed to delete stored file for removed document"
            );
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List a document's version history, newest first.
///
/// # Returns
/// - 200 OK with the versions (empty array when none exist)
pub async fn list_document_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DocumentVersion>>, ApiError> {
    let versions = state.db.versions.list_for_document(id).await?;
    Ok(Json(versions))
}

/// Record a new version of a document.
///
/// # Returns
/// - 201 Created with the new version (server-assigned version number)
/// - 404 Not Found if the document doesn't exist
pub async fn create_document_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateVersionRequest>,
) -> Result<(StatusCode, Json<DocumentVersion>), ApiError> {
    let version = state.db.versions.create(id, req).await?;
    Ok((StatusCode::CREATED, Json(version)))
}
