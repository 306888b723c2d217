use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

use utils::testing::send_request;

use super::common::TestApp;

async fn upload(app: &TestApp, token: &str, file_name: &str) -> (StatusCode, Value) {
    let boundary = "surveyengine-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"profile_image\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         not-really-an-image\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("PUT")
        .uri("/users/me/image")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send_request(app.router.clone(), request).await
}

pub(super) async fn test_profile_roundtrip(app: &TestApp) {
    let (access, _) = app.sign_in("profile@example.com").await;

    let (status, _) = app.get("/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/users/me", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "profile@example.com");
    assert_eq!(body["username"], "profile");
    assert_eq!(body["role"], "user");
    assert!(body["date_joined"].is_string());
    assert_eq!(body["social_links"], json!({}));

    let (status, body) = app
        .patch(
            "/users/me",
            json!({ "bio": "Civic data nerd", "name": "Pro File", "github": "https://github.com/profile" }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["bio"], "Civic data nerd");
    assert_eq!(body["name"], "Pro File");
    assert_eq!(body["social_links"]["github"], "https://github.com/profile");

    // blank links keep the stored value, new keys are added
    let (status, body) = app
        .patch(
            "/users/me",
            json!({ "github": "", "website": "https://profile.dev" }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["social_links"]["github"], "https://github.com/profile");
    assert_eq!(body["social_links"]["website"], "https://profile.dev");
    assert_eq!(body["bio"], "Civic data nerd");

    // role is not part of the profile update
    let (status, body) = app
        .patch("/users/me", json!({ "role": "admin" }), Some(&access))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "user");
}

pub(super) async fn test_username_rules(app: &TestApp) {
    let (first, _) = app.sign_in("first@example.com").await;
    let (second, _) = app.sign_in("second@example.com").await;

    let (status, body) = app
        .post("/users/username-check", json!({ "username": "first" }), Some(&second))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], false);

    let (status, body) = app
        .post("/users/username-check", json!({ "username": "unclaimed" }), Some(&second))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available"], true);

    let (status, _) = app
        .post("/users/username-check", json!({ "username": "unclaimed" }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .patch("/users/me", json!({ "username": "first" }), Some(&second))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // keeping your own username is not a clash
    let (status, _) = app
        .patch("/users/me", json!({ "username": "first" }), Some(&first))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .patch("/users/me", json!({ "username": "unclaimed" }), Some(&second))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "unclaimed");
}

pub(super) async fn test_profile_image(app: &TestApp) {
    let (access, _) = app.sign_in("picture@example.com").await;

    let (status, body) = upload(app, &access, "avatar.gif").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Only .png, .jpg and .jpeg files are allowed.");

    let (status, body) = upload(app, &access, "avatar.PNG").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["url"], "https://images.test/avatar.PNG");

    let (_, profile) = app.get("/users/me", Some(&access)).await;
    assert_eq!(profile["profile"], "https://images.test/avatar.PNG");

    let request = Request::builder()
        .method("PUT")
        .uri("/users/me/image")
        .header(header::AUTHORIZATION, format!("Bearer {access}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, body) = send_request(app.router.clone(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "{body}");
}
