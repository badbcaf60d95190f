//! HTTP API behaviour: routes, status codes and response shapes.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use common::TestApp;
use serde_json::json;
use skinchart::{ChartStore, MockAdviceClient, UserId};
use tower::ServiceExt;

#[tokio::test]
async fn health_reports_version() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], skinchart::VERSION);
}

#[tokio::test]
async fn session_without_body_issues_new_user() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::POST, "/api/session", None).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["userId"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(body["medicalChart"]["skinType"], serde_json::Value::Null);
    assert_eq!(body["medicalChart"]["skinConcerns"], json!([]));
    assert!(body["medicalChart"]["lastUpdated"].is_string());
    assert!(app.store.contains(&UserId::from(id)).unwrap());
}

#[tokio::test]
async fn session_resumes_known_user() {
    let app = TestApp::new();
    let id = app.new_user().await;
    app.post(
        "/api/update-chart",
        json!({ "userId": id, "userInput": "super dry and flaky cheeks" }),
    )
    .await;

    let (status, body) = app.post("/api/session", json!({ "userId": id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], id.as_str());
    assert_eq!(body["medicalChart"]["skinType"], "dry");
    assert_eq!(body["medicalChart"]["skinConcerns"], json!(["dryness"]));
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn session_with_unknown_id_gets_fresh_id() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/session", json!({ "userId": "stale-id" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["userId"], "stale-id");
}

#[tokio::test]
async fn update_chart_returns_merged_chart() {
    let app = TestApp::new();
    let id = app.new_user().await;

    let (status, body) = app
        .post(
            "/api/update-chart",
            json!({
                "userId": id,
                "userInput": "I get zits and I'm allergic to fragrance and cannot use retinol"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let chart = &body["medicalChart"];
    assert_eq!(chart["skinConcerns"], json!(["acne"]));
    assert_eq!(chart["allergies"], json!(["fragrance", "retinol"]));
    assert_eq!(chart["currentProducts"], json!([]));
}

#[tokio::test]
async fn update_chart_missing_fields_is_bad_request() {
    let app = TestApp::new();
    let id = app.new_user().await;

    let (status, body) = app.post("/api/update-chart", json!({ "userId": id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID and input are required");

    let (status, _) = app
        .post("/api/update-chart", json!({ "userInput": "oily" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_chart_unknown_user_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/update-chart",
            json!({ "userId": "ghost", "userInput": "oily skin" }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/update-chart")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.router().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn advice_returns_reply_and_sends_chart() {
    let app = TestApp::new();
    let id = app.new_user().await;
    app.post(
        "/api/update-chart",
        json!({ "userId": id, "userInput": "Oily skin with dark spots" }),
    )
    .await;

    let (status, body) = app
        .post(
            "/api/advice",
            json!({ "userId": id, "question": "What serum should I use?" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advice"], "Cleanse gently and wear SPF 30.");

    let prompts = app.advice.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].user.contains("- Skin Type: oily"));
    assert!(prompts[0].user.contains("- Primary Concerns: hyperpigmentation"));
    assert!(prompts[0].user.contains("What serum should I use?"));
}

#[tokio::test]
async fn advice_failure_is_generic_server_error() {
    let app = TestApp::with_advice(MockAdviceClient::failing("upstream 502"));
    let id = app.new_user().await;

    let (status, body) = app
        .post("/api/advice", json!({ "userId": id, "question": "Help?" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to get skincare advice. Please try again.");
}

#[tokio::test]
async fn advice_requires_question_and_known_user() {
    let app = TestApp::new();

    let (status, body) = app.post("/api/advice", json!({ "userId": "someone" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User ID and question are required");

    let (status, _) = app
        .post("/api/advice", json!({ "userId": "ghost", "question": "hi" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.advice.prompts().is_empty());
}

#[tokio::test]
async fn get_chart_by_id() {
    let app = TestApp::new();
    let id = app.new_user().await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/chart/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["medicalChart"]["allergies"].is_array());

    let (status, body) = app.send(Method::GET, "/api/chart/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn put_chart_overwrites_present_fields() {
    let app = TestApp::new();
    let id = app.new_user().await;
    app.post(
        "/api/update-chart",
        json!({ "userId": id, "userInput": "oily with acne, allergic to nickel" }),
    )
    .await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/chart/{}", id),
            Some(json!({
                "skinType": null,
                "currentProducts": ["Gel cleanser", " gel cleanser ", "", "SPF 50"],
                "lastUpdated": "1999-01-01T00:00:00Z",
                "favouriteColour": "green"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let chart = &body["medicalChart"];
    assert_eq!(chart["skinType"], serde_json::Value::Null);
    assert_eq!(chart["currentProducts"], json!(["Gel cleanser", "gel cleanser", "SPF 50"]));
    assert_eq!(chart["skinConcerns"], json!(["acne"]));
    assert_eq!(chart["allergies"], json!(["nickel"]));
    assert_ne!(chart["lastUpdated"], "1999-01-01T00:00:00Z");
}

#[tokio::test]
async fn put_chart_rejects_unknown_labels() {
    let app = TestApp::new();
    let id = app.new_user().await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/chart/{}", id),
            Some(json!({ "skinType": "scaly" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn static_files_served_from_public_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>skinchart</h1>").unwrap();

    let app = TestApp::new();
    let router = skinchart::server::router(app.service.clone(), Some(dir.path()));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>skinchart</h1>");
}
