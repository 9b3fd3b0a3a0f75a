//! Integration tests for request validation.
//!
//! Every case here must be rejected by the contract layer before any
//! database query is issued; the test pool is never connected.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Document list pagination bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_documents_rejects_page_zero() {
    let app = build_test_app();
    let response = get(app, "/api/documents?page=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn list_documents_rejects_page_size_zero() {
    let app = build_test_app();
    let response = get(app, "/api/documents?page_size=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_documents_rejects_page_size_over_100() {
    let app = build_test_app();
    let response = get(app, "/api/documents?page_size=101").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_documents_rejects_unknown_department() {
    let app = build_test_app();
    let response = get(app, "/api/documents?department=SALES").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("department"));
}

#[tokio::test]
async fn list_documents_rejects_unknown_status() {
    let app = build_test_app();
    let response = get(app, "/api/documents?status=frozen").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Document create/update field validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_document_rejects_empty_title() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/documents",
        json!({
            "title": "   ",
            "department": "B2B",
            "owner_email": "owner@example.com"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn update_document_rejects_blank_title() {
    let app = build_test_app();
    let response = patch_json(
        app,
        "/api/documents/7f5f1f5a-0000-0000-0000-000000000001",
        json!({ "title": "" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Golden answer bounds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_golden_answers_rejects_limit_zero() {
    let app = build_test_app();
    let response = get(app, "/api/golden-answers?limit=0").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_golden_answers_rejects_limit_over_100() {
    let app = build_test_app();
    let response = get(app, "/api/golden-answers?limit=101").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_golden_answers_rejects_unknown_trust_label() {
    let app = build_test_app();
    let response = get(app, "/api/golden-answers?trust_label=golden").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("trust label"));
}

#[tokio::test]
async fn create_golden_answer_rejects_short_question() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/golden-answers",
        json!({
            "question": "Why?",
            "answer": "A sufficiently long answer.",
            "department": "MARCOM"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("question"));
}

#[tokio::test]
async fn create_golden_answer_rejects_short_answer() {
    let app = build_test_app();
    let response = post_json(
        app,
        "/api/golden-answers",
        json!({
            "question": "What is the escalation path?",
            "answer": "short",
            "department": "MARCOM"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("answer"));
}
