//! Contract tests for response body shapes.
//!
//! These document the exact wire format list endpoints and entities use so
//! frontend clients can rely on it.

use chrono::{TimeZone, Utc};
use serde_json::Value;
use uuid::Uuid;

use curator_core::{
    Classification, DashboardStats, Department, Document, DocumentStatus, GoldenAnswer,
    ListDocumentsResponse, TrustLabel,
};

fn sample_document() -> Document {
    Document {
        id: Uuid::nil(),
        title: "Q3 pricing playbook".to_string(),
        description: None,
        department: Department::B2b,
        status: DocumentStatus::Draft,
        classification: Classification::Internal,
        owner_email: "owner@example.com".to_string(),
        drive_file_id: None,
        drive_folder_path: None,
        notebook_source_id: None,
        file_type: Some("pdf".to_string()),
        file_size_bytes: Some(1024),
        review_date: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 16, 9, 0, 0).unwrap(),
    }
}

#[test]
fn test_document_wire_format() {
    let json = serde_json::to_value(sample_document()).unwrap();

    assert_eq!(json["department"], "B2B");
    assert_eq!(json["status"], "draft");
    assert_eq!(json["classification"], "internal");
    assert_eq!(json["description"], Value::Null);
    assert!(json.get("id").is_some());
    assert!(json.get("created_at").is_some());
    assert!(json.get("updated_at").is_some());
}

#[test]
fn test_list_response_structure() {
    // List endpoints return {items, total, page, page_size} with no
    // envelope and no cursor fields.
    let response = ListDocumentsResponse {
        items: vec![sample_document()],
        total: 25,
        page: 1,
        page_size: 20,
    };
    let json = serde_json::to_value(response).unwrap();

    assert!(json["items"].is_array());
    assert_eq!(json["total"], 25);
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_size"], 20);
    assert_eq!(json.as_object().unwrap().len(), 4);
}

#[test]
fn test_golden_answer_wire_format() {
    let answer = GoldenAnswer {
        id: Uuid::nil(),
        question: "What is the discount ceiling?".to_string(),
        answer: "15% without director approval.".to_string(),
        department: Department::S2B2c,
        trust_label: TrustLabel::Policy,
        source_document_ids: vec!["doc-1".to_string()],
        citations: None,
        verified_by: Some("lead@example.com".to_string()),
        verified_at: None,
        next_review_date: None,
        usage_count: 7,
        helpful_count: 3,
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
    };
    let json = serde_json::to_value(answer).unwrap();

    assert_eq!(json["department"], "S2B2C");
    assert_eq!(json["trust_label"], "policy");
    assert_eq!(json["usage_count"], 7);
    assert_eq!(json["helpful_count"], 3);
    assert_eq!(json["source_document_ids"], serde_json::json!(["doc-1"]));
}

#[test]
fn test_dashboard_stats_wire_format() {
    let stats = DashboardStats {
        total_documents: 0,
        active_documents: 0,
        metadata_alerts: 0,
        ai_queries_count: 0,
        total_documents_change: "+5%".to_string(),
        active_documents_change: "+12%".to_string(),
        ai_queries_change: "+18%".to_string(),
    };
    let json = serde_json::to_value(stats).unwrap();

    assert_eq!(json["total_documents"], 0);
    assert_eq!(json["active_documents"], 0);
    assert_eq!(json["metadata_alerts"], 0);
    assert_eq!(json["ai_queries_count"], 0);
    assert_eq!(json["total_documents_change"], "+5%");
}
