//! Core data models for curator.
//!
//! These types are shared across all curator crates and represent the
//! core domain entities: documents, document versions, and golden answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::Error;

// =============================================================================
// CLOSED ENUMERATIONS
// =============================================================================

/// Organizational department a document or golden answer belongs to.
///
/// Wire format uses the uppercase department codes (`"D2COM"`, `"B2B"`, ...),
/// matching what clients and the database store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Department {
    #[serde(rename = "D2COM")]
    D2Com,
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "S2B2C")]
    S2B2c,
    #[serde(rename = "MARCOM")]
    Marcom,
}

impl Department {
    /// All departments, in display order.
    pub const ALL: [Department; 4] = [
        Department::D2Com,
        Department::B2b,
        Department::S2B2c,
        Department::Marcom,
    ];

    /// Canonical wire/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::D2Com => "D2COM",
            Department::B2b => "B2B",
            Department::S2B2c => "S2B2C",
            Department::Marcom => "MARCOM",
        }
    }
}

impl std::str::FromStr for Department {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D2COM" => Ok(Department::D2Com),
            "B2B" => Ok(Department::B2b),
            "S2B2C" => Ok(Department::S2B2c),
            "MARCOM" => Ok(Department::Marcom),
            other => Err(Error::InvalidInput(format!("unknown department: {other}"))),
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a document.
///
/// Progression: draft → pending_approval → approved → published → archived.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Draft,
    PendingApproval,
    Approved,
    Published,
    Archived,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::PendingApproval => "pending_approval",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Published => "published",
            DocumentStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "pending_approval" => Ok(DocumentStatus::PendingApproval),
            "approved" => Ok(DocumentStatus::Approved),
            "published" => Ok(DocumentStatus::Published),
            "archived" => Ok(DocumentStatus::Archived),
            other => Err(Error::InvalidInput(format!(
                "unknown document status: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document sensitivity tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Public,
    #[default]
    Internal,
    Confidential,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Public => "public",
            Classification::Internal => "internal",
            Classification::Confidential => "confidential",
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Classification::Public),
            "internal" => Ok(Classification::Internal),
            "confidential" => Ok(Classification::Confidential),
            other => Err(Error::InvalidInput(format!(
                "unknown classification: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Epistemic status of a golden answer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TrustLabel {
    /// Not yet verified by anyone.
    #[default]
    Assumption,
    /// Verified by a subject-matter expert.
    Verified,
    /// Official policy.
    Policy,
    /// No longer accurate; kept for history.
    Deprecated,
}

impl TrustLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLabel::Assumption => "assumption",
            TrustLabel::Verified => "verified",
            TrustLabel::Policy => "policy",
            TrustLabel::Deprecated => "deprecated",
        }
    }
}

impl std::str::FromStr for TrustLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assumption" => Ok(TrustLabel::Assumption),
            "verified" => Ok(TrustLabel::Verified),
            "policy" => Ok(TrustLabel::Policy),
            "deprecated" => Ok(TrustLabel::Deprecated),
            other => Err(Error::InvalidInput(format!("unknown trust label: {other}"))),
        }
    }
}

impl std::fmt::Display for TrustLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// A document in the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub department: Department,
    pub status: DocumentStatus,
    pub classification: Classification,
    pub owner_email: String,
    /// Reference into the file-storage connector, if the binary was stored.
    pub drive_file_id: Option<String>,
    pub drive_folder_path: Option<String>,
    /// Reference into the external AI-answer service's source registry.
    pub notebook_source_id: Option<String>,
    pub file_type: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub review_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A historical version of a document.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentVersion {
    pub id: Uuid,
    pub document_id: Uuid,
    pub version_number: i32,
    pub changelog: Option<String>,
    pub archive_path: Option<String>,
    pub published_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// GOLDEN ANSWER TYPES
// =============================================================================

/// A vetted question/answer pair.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GoldenAnswer {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub department: Department,
    pub trust_label: TrustLabel,
    pub source_document_ids: Vec<String>,
    pub citations: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
    pub usage_count: i32,
    pub helpful_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// CHAT TYPES
// =============================================================================

/// Inbound chat query.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ChatRequest {
    pub query: String,
    /// Restrict answering to these source documents.
    pub source_ids: Option<Vec<String>>,
    pub conversation_id: Option<String>,
}

/// Citation from a source document.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Citation {
    pub source_id: String,
    pub source_title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
}

/// Chat answer with citations and follow-up suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChatResponse {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub conversation_id: String,
    pub suggested_queries: Vec<String>,
}

/// What an answer backend produced for a single query.
///
/// The HTTP layer wraps this into a [`ChatResponse`] by attaching the
/// conversation id.
#[derive(Debug, Clone)]
pub struct AnswerReply {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub suggested_queries: Vec<String>,
}

// =============================================================================
// STATS TYPES
// =============================================================================

/// Dashboard statistics.
///
/// The `*_change` strings are fixed placeholders until usage tracking lands;
/// `ai_queries_count` is always zero for the same reason.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub total_documents: i64,
    pub active_documents: i64,
    pub metadata_alerts: i64,
    pub ai_queries_count: i64,
    pub total_documents_change: String,
    pub active_documents_change: String,
    pub ai_queries_change: String,
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// Deserialize a field so that explicit `null` is distinguishable from the
/// field being absent.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` fields: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_department_wire_format() {
        assert_eq!(
            serde_json::to_string(&Department::D2Com).unwrap(),
            "\"D2COM\""
        );
        assert_eq!(serde_json::to_string(&Department::B2b).unwrap(), "\"B2B\"");
        assert_eq!(
            serde_json::from_str::<Department>("\"S2B2C\"").unwrap(),
            Department::S2B2c
        );
        assert_eq!(
            serde_json::from_str::<Department>("\"MARCOM\"").unwrap(),
            Department::Marcom
        );
    }

    #[test]
    fn test_department_rejects_unknown_value() {
        assert!(serde_json::from_str::<Department>("\"SALES\"").is_err());
        assert!("SALES".parse::<Department>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&DocumentStatus::PendingApproval).unwrap(),
            "\"pending_approval\""
        );
        assert_eq!(
            serde_json::from_str::<DocumentStatus>("\"archived\"").unwrap(),
            DocumentStatus::Archived
        );
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(DocumentStatus::default(), DocumentStatus::Draft);
        assert_eq!(Classification::default(), Classification::Internal);
        assert_eq!(TrustLabel::default(), TrustLabel::Assumption);
    }

    #[test]
    fn test_as_str_round_trips() {
        for dept in Department::ALL {
            assert_eq!(dept.as_str().parse::<Department>().unwrap(), dept);
        }
        for s in ["draft", "pending_approval", "approved", "published", "archived"] {
            assert_eq!(s.parse::<DocumentStatus>().unwrap().as_str(), s);
        }
        for s in ["assumption", "verified", "policy", "deprecated"] {
            assert_eq!(s.parse::<TrustLabel>().unwrap().as_str(), s);
        }
    }

    #[derive(Debug, Deserialize)]
    struct PatchProbe {
        #[serde(default, deserialize_with = "double_option")]
        description: Option<Option<String>>,
    }

    #[test]
    fn test_double_option_absent_vs_null() {
        let absent: PatchProbe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.description, None);

        let null: PatchProbe = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(null.description, Some(None));

        let set: PatchProbe = serde_json::from_str(r#"{"description": "hi"}"#).unwrap();
        assert_eq!(set.description, Some(Some("hi".to_string())));
    }
}
