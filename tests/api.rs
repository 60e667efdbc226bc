use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use srs_scheduler::app::build_router;
use srs_scheduler::data::repositories::MemoryReviewStore;
use srs_scheduler::features::srs::{ReviewService, SchedulingPolicy};

fn test_app() -> Router {
    let service = ReviewService::new(Arc::new(MemoryReviewStore::new()), SchedulingPolicy::default());
    build_router(service)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_submit_review_returns_record_and_summary() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "gato", "contentType": "vocabulary", "quality": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["learnerId"], "ana");
    assert_eq!(body["record"]["contentType"], "vocabulary");
    assert_eq!(body["record"]["intervalDays"], 1);
    assert_eq!(body["record"]["correctStreak"], 1);
    assert!(body["record"]["dueAt"].is_string());
    assert_eq!(body["summary"]["totalReviews"], 1);
    assert_eq!(body["summary"]["points"], 10);
    assert_eq!(body["summary"]["level"], 1);
    assert_eq!(body["summary"]["streakDays"], 1);
    assert_eq!(body["summary"]["accuracy"], 1.0);
}

#[tokio::test]
async fn test_boolean_outcome_is_accepted() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "c1", "contentType": "flashcard", "correct": false })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["incorrectCount"], 1);
    assert_eq!(body["summary"]["points"], 4);
}

#[tokio::test]
async fn test_out_of_range_quality_is_rejected_without_side_effects() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "gato", "contentType": "vocabulary", "quality": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (_, summary) = send(&app, Method::GET, "/api/learners/ana/summary", None).await;
    assert_eq!(summary["totalReviews"], 0);
    let (_, records) = send(&app, Method::GET, "/api/learners/ana/records", None).await;
    assert_eq!(records, json!([]));
}

#[tokio::test]
async fn test_ambiguous_outcome_is_rejected() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "gato", "contentType": "vocabulary", "quality": 4, "correct": true })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "", "contentType": "vocabulary", "quality": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_due_items_skip_recently_reviewed() {
    let app = test_app();
    send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "a", "contentType": "phrase", "quality": 5 })),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/due",
        Some(json!({
            "candidates": [
                { "id": "a", "type": "phrase" },
                { "id": "b", "type": "phrase" },
                { "id": "c", "type": "vocabulary" }
            ],
            "limit": 10
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{ "id": "b", "type": "phrase" }, { "id": "c", "type": "vocabulary" }])
    );
}

#[tokio::test]
async fn test_unknown_content_type_in_body_is_a_validation_error() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "w1", "contentType": "kanji", "quality": 4 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("Unknown content type: kanji"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/learners/ana/due",
        Some(json!({ "candidates": [{ "id": "w1", "type": "kanji" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("Unknown content type: kanji"));

    let (_, records) = send(&app, Method::GET, "/api/learners/ana/records", None).await;
    assert_eq!(records, json!([]));
}

#[tokio::test]
async fn test_malformed_json_body_gets_json_error() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/learners/ana/reviews")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"contentId\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_due_limit_is_validated() {
    let app = test_app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/learners/ana/due",
        Some(json!({ "candidates": [], "limit": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_reset_item() {
    let app = test_app();
    send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "w9", "contentType": "vocabulary", "quality": 2 })),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/learners/ana/items/vocabulary/w9/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intervalDays"], 1);
    assert_eq!(body["easeFactor"], 2.5);
    assert_eq!(body["incorrectCount"], 0);
    assert!(body["lastSeenAt"].is_null());

    let (_, summary) = send(&app, Method::GET, "/api/learners/ana/summary", None).await;
    assert_eq!(summary["totalReviews"], 1);
}

#[tokio::test]
async fn test_reset_unknown_content_type() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/api/learners/ana/items/kanji/w9/reset", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("kanji"));
}

#[tokio::test]
async fn test_reset_rejects_overlong_content_id() {
    let app = test_app();
    let uri = format!("/api/learners/ana/items/phrase/{}/reset", "x".repeat(257));

    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);

    let (_, records) = send(&app, Method::GET, "/api/learners/ana/records", None).await;
    assert_eq!(records, json!([]));
}

#[tokio::test]
async fn test_clear_history() {
    let app = test_app();
    send(
        &app,
        Method::POST,
        "/api/learners/ana/reviews",
        Some(json!({ "contentId": "w1", "contentType": "vocabulary", "quality": 5 })),
    )
    .await;

    let (status, body) = send(&app, Method::DELETE, "/api/learners/ana/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalReviews"], 0);
    assert_eq!(body["level"], 1);
    assert!(body["lastStudyDate"].is_null());

    let (_, records) = send(&app, Method::GET, "/api/learners/ana/records", None).await;
    assert_eq!(records.as_array().unwrap().len(), 1);
}
