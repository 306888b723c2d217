use axum::http::StatusCode;
use serde_json::json;

use super::common::TestApp;

const DESCRIPTION: &str = "Patient experience at the district health clinic";

pub(super) async fn test_survey_generation(app: &TestApp) {
    let request = json!({ "description": DESCRIPTION, "question_count": 3, "survey_type": "health" });

    let (status, _) = app.post("/ai/surveys/generate", request.clone(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (access, _) = app.sign_in("analyst@example.com").await;

    let (status, body) = app
        .post("/ai/surveys/generate", request, Some(&access))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "success");

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["id"], "1");
    assert_eq!(questions[0]["type"], "multiple-choice");
    assert_eq!(questions[0]["options"].as_array().unwrap().len(), 3);
    assert!(questions[1].get("options").is_none());
    assert_eq!(questions[2]["required"], false);

    let metadata = &body["metadata"];
    assert_eq!(metadata["survey_type"], "health");
    assert_eq!(metadata["ai_generated"], true);
    assert_eq!(metadata["model"], "fake-model");
    assert_eq!(metadata["generated_by"], "analyst@example.com");

    let (status, body) = app
        .post("/ai/surveys/generate", json!({ "description": "too short" }), Some(&access))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["description"].is_array());

    let (status, _) = app
        .post(
            "/ai/surveys/generate",
            json!({ "description": DESCRIPTION, "question_count": 40 }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/ai/surveys/generate",
            json!({ "description": DESCRIPTION, "survey_type": "astrology" }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

pub(super) async fn test_chat_feed(app: &TestApp) {
    let (access, _) = app.sign_in("feeder@example.com").await;

    let (status, body) = app
        .post("/ai/chat/feed", json!({ "content": "three short words" }), Some(&access))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Data fed successfully");
    assert_eq!(body["data"]["email"], "feeder@example.com");
    assert_eq!(body["data"]["chunks"], 3);

    let (status, _) = app
        .post("/ai/chat/feed", json!({ "content": "" }), Some(&access))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post("/ai/chat/feed", json!({ "content": "x".repeat(10_001) }), Some(&access))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
