//! Core traits for curator abstractions.
//!
//! These traits define the interfaces that concrete implementations must
//! satisfy, enabling pluggable backends and testability. Repository traits
//! are implemented by `curator-db`; connector traits by `curator-connect`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::*;

/// Inclusive page-size bounds for list endpoints.
pub const MIN_PAGE_SIZE: i64 = 1;
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// DOCUMENT REPOSITORY
// =============================================================================

/// Request for listing documents.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ListDocumentsRequest {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size, 1–100.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub department: Option<Department>,
    pub status: Option<DocumentStatus>,
    /// Case-insensitive substring match on title.
    pub search: Option<String>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for ListDocumentsRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            department: None,
            status: None,
            search: None,
        }
    }
}

impl ListDocumentsRequest {
    /// Reject out-of-range pagination before any query is issued.
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::InvalidInput("page must be >= 1".to_string()));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(Error::InvalidInput(format!(
                "page_size must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Response for listing documents.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListDocumentsResponse {
    pub items: Vec<Document>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// Request for creating a new document.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateDocumentRequest {
    pub title: String,
    pub description: Option<String>,
    pub department: Department,
    #[serde(default)]
    pub classification: Classification,
    pub owner_email: String,
    pub file_type: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub review_date: Option<DateTime<Utc>>,
}

impl CreateDocumentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput("title must not be empty".to_string()));
        }
        if self.title.chars().count() > 500 {
            return Err(Error::InvalidInput(
                "title must be at most 500 characters".to_string(),
            ));
        }
        if self.owner_email.trim().is_empty() {
            return Err(Error::InvalidInput(
                "owner_email must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request for partially updating a document.
///
/// `None` means the caller omitted the field (leave untouched). For the
/// nullable columns, `Some(None)` means the caller sent an explicit `null`
/// (clear the field); see [`double_option`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub department: Option<Department>,
    pub classification: Option<Classification>,
    pub status: Option<DocumentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub review_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateDocumentRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("title must not be empty".to_string()));
            }
            if title.chars().count() > 500 {
                return Err(Error::InvalidInput(
                    "title must be at most 500 characters".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.department.is_none()
            && self.classification.is_none()
            && self.status.is_none()
            && self.review_date.is_none()
    }
}

/// Repository for document CRUD operations.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document with server-assigned id and defaults.
    async fn insert(&self, req: CreateDocumentRequest) -> Result<Document>;

    /// Fetch a document by id.
    async fn fetch(&self, id: Uuid) -> Result<Document>;

    /// List documents with filtering and pagination, most recently
    /// updated first.
    async fn list(&self, req: ListDocumentsRequest) -> Result<ListDocumentsResponse>;

    /// Apply a partial update; only supplied fields change.
    async fn update(&self, id: Uuid, req: UpdateDocumentRequest) -> Result<Document>;

    /// Delete a document. Versions are removed by cascade.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

// =============================================================================
// DOCUMENT VERSION REPOSITORY
// =============================================================================

/// Request for recording a new document version.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateVersionRequest {
    pub changelog: Option<String>,
    pub archive_path: Option<String>,
    pub published_path: Option<String>,
}

/// Repository for document version history.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Record a new version; the version number is assigned monotonically
    /// per document.
    async fn create(&self, document_id: Uuid, req: CreateVersionRequest)
        -> Result<DocumentVersion>;

    /// List versions for a document, newest version number first.
    async fn list_for_document(&self, document_id: Uuid) -> Result<Vec<DocumentVersion>>;
}

// =============================================================================
// GOLDEN ANSWER REPOSITORY
// =============================================================================

/// Request for listing golden answers.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ListGoldenAnswersRequest {
    pub department: Option<Department>,
    pub trust_label: Option<TrustLabel>,
    /// Maximum results, 1–100.
    #[serde(default = "default_page_size")]
    pub limit: i64,
}

impl Default for ListGoldenAnswersRequest {
    fn default() -> Self {
        Self {
            department: None,
            trust_label: None,
            limit: default_page_size(),
        }
    }
}

impl ListGoldenAnswersRequest {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.limit) {
            return Err(Error::InvalidInput(format!(
                "limit must be between {} and {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

/// Request for creating a golden answer.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct CreateGoldenAnswerRequest {
    pub question: String,
    pub answer: String,
    pub department: Department,
    #[serde(default)]
    pub source_document_ids: Vec<String>,
    pub citations: Option<String>,
}

impl CreateGoldenAnswerRequest {
    pub fn validate(&self) -> Result<()> {
        if self.question.chars().count() < 5 {
            return Err(Error::InvalidInput(
                "question must be at least 5 characters".to_string(),
            ));
        }
        if self.answer.chars().count() < 10 {
            return Err(Error::InvalidInput(
                "answer must be at least 10 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository for golden answer operations.
#[async_trait]
pub trait GoldenAnswerRepository: Send + Sync {
    /// Insert a new golden answer with defaults (trust label "assumption",
    /// zeroed counters).
    async fn insert(&self, req: CreateGoldenAnswerRequest) -> Result<GoldenAnswer>;

    /// Fetch a golden answer by id.
    async fn fetch(&self, id: Uuid) -> Result<GoldenAnswer>;

    /// List golden answers, most used first.
    async fn list(&self, req: ListGoldenAnswersRequest) -> Result<Vec<GoldenAnswer>>;

    /// Atomically increment the helpful counter, returning the new value.
    async fn mark_helpful(&self, id: Uuid) -> Result<i32>;
}

// =============================================================================
// STATS REPOSITORY
// =============================================================================

/// Repository for aggregate statistics.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Dashboard summary counts.
    async fn dashboard(&self) -> Result<DashboardStats>;

    /// Document count per department.
    async fn by_department(&self) -> Result<std::collections::HashMap<String, i64>>;
}

// =============================================================================
// CONNECTOR TRAITS
// =============================================================================

/// Backend that answers knowledge-base questions.
///
/// The production implementation will talk to the external notebook AI
/// service; [`curator-connect`] ships a mock that returns canned replies
/// with the same shape.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Answer a query, optionally restricted to the given source documents.
    async fn ask(&self, query: &str, source_ids: Option<&[String]>) -> Result<AnswerReply>;

    /// Name of the backend, for logging.
    fn backend_name(&self) -> &str;
}

/// Reference to a file held by the storage connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub file_id: String,
    pub path: String,
}

/// Backend that stores and retrieves document binaries.
///
/// Allows abstracting over Drive-style remote storage; the mock keeps
/// blobs in memory.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store a file, returning its reference id and path.
    async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredFile>;

    /// Read a stored file back.
    async fn retrieve(&self, file_id: &str) -> Result<Vec<u8>>;

    /// Delete a stored file.
    async fn delete(&self, file_id: &str) -> Result<()>;

    /// Check whether a file exists.
    async fn exists(&self, file_id: &str) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_documents_request_bounds() {
        let mut req = ListDocumentsRequest::default();
        assert!(req.validate().is_ok());

        req.page = 0;
        assert!(req.validate().is_err());

        req.page = 1;
        req.page_size = 0;
        assert!(req.validate().is_err());

        req.page_size = 101;
        assert!(req.validate().is_err());

        req.page_size = 100;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_list_documents_request_offset() {
        let req = ListDocumentsRequest {
            page: 3,
            page_size: 20,
            ..Default::default()
        };
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_golden_answer_length_requirements() {
        let mut req = CreateGoldenAnswerRequest {
            question: "Why?".to_string(),
            answer: "Because it is documented.".to_string(),
            department: Department::B2b,
            source_document_ids: vec![],
            citations: None,
        };
        assert!(req.validate().is_err(), "question below 5 chars");

        req.question = "Why is the sky blue?".to_string();
        req.answer = "short".to_string();
        assert!(req.validate().is_err(), "answer below 10 chars");

        req.answer = "Rayleigh scattering.".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_request_empty_detection() {
        let req = UpdateDocumentRequest::default();
        assert!(req.is_empty());

        let req = UpdateDocumentRequest {
            title: Some("New".to_string()),
            ..Default::default()
        };
        assert!(!req.is_empty());
    }

    #[test]
    fn test_update_request_null_clears_description() {
        let req: UpdateDocumentRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(req.description, Some(None));
        assert!(!req.is_empty());

        let req: UpdateDocumentRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.description, None);
        assert!(req.is_empty());
    }

    #[test]
    fn test_update_request_rejects_blank_title() {
        let req = UpdateDocumentRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
