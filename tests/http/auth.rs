use axum::http::StatusCode;
use serde_json::json;

use super::common::{ORG_SECRET, PASSWORD, TestApp};

fn other_code(code: &str) -> &'static str {
    if code == "000000" { "111111" } else { "000000" }
}

pub(super) async fn test_register_with_otp(app: &TestApp) {
    let (status, body) = app
        .post("/auth/otp/register", json!({ "email": "Jane@Example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "OTP sent successfully");

    let code = app.last_otp("jane@example.com");

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": "jane@example.com", "password": PASSWORD, "otp": other_code(&code) }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired OTP.");

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": "jane@example.com", "password": PASSWORD, "otp": code }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["username"], "jane");
    assert_eq!(body["role"], "user");

    let (status, _) = app
        .post("/auth/otp/register", json!({ "email": "jane@example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // a second "jane" gets a suffixed username
    let body = app.register("jane@elsewhere.org").await;
    assert_eq!(body["username"], "jane1");
}

pub(super) async fn test_register_rejects_bad_input(app: &TestApp) {
    let (status, body) = app
        .post("/auth/otp/register", json!({ "email": "not-an-email" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": "short@example.com", "password": "short", "otp": "123456" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["password"].is_array());

    let (status, body) = app
        .post("/auth/register", json!({ "email": "short@example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, _) = app
        .post("/auth/otp/login", json!({ "email": "ghost@example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

pub(super) async fn test_admin_registration(app: &TestApp) {
    let email = "boss@example.com";
    app.post("/auth/otp/register", json!({ "email": email }), None)
        .await;
    let code = app.last_otp(email);

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": email, "password": PASSWORD, "otp": code, "role": "admin" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Organization Secret is required for admin accounts.");

    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": email, "password": PASSWORD, "otp": code, "role": "admin", "orgSecret": "guess" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid Organization Secret.");

    // the secret checks run before the code is consumed
    let (status, body) = app
        .post(
            "/auth/register",
            json!({ "email": email, "password": PASSWORD, "otp": code, "role": "admin", "org_secret": ORG_SECRET, "username": "theboss" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["role"], "admin");
    assert_eq!(body["username"], "theboss");
}

pub(super) async fn test_login_flow(app: &TestApp) {
    let email = "login@example.com";
    app.register(email).await;

    let (status, _) = app
        .post("/auth/otp/login", json!({ "email": email }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let code = app.last_otp(email);

    let (status, body) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": "wrong-password", "otp": code }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Password is incorrect");

    // a wrong password leaves the code usable
    let (status, body) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": PASSWORD, "otp": code }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());

    let (status, body) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": PASSWORD, "otp": code }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid or expired OTP.");

    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": "nobody@example.com", "password": PASSWORD, "otp": code }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

pub(super) async fn test_tokens(app: &TestApp) {
    let (access, refresh) = app.sign_in("tokens@example.com").await;

    let (status, body) = app.get("/auth/me", Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "tokens@example.com");
    assert_eq!(body["role"], "user");

    let (status, _) = app.get("/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/auth/me", Some(&refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/auth/refresh", json!({ "refresh_token": refresh }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["access_token"].as_str().unwrap();

    let (status, _) = app.get("/auth/me", Some(fresh)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post("/auth/refresh", json!({ "refresh_token": access }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

pub(super) async fn test_google_login(app: &TestApp) {
    let (status, body) = app
        .post("/auth/google", json!({ "id_token": "valid:gmail.user@example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_new_user"], true);
    assert_eq!(body["email"], "gmail.user@example.com");
    assert!(body["username"].is_null());

    let (status, body) = app
        .post("/auth/google", json!({ "id_token": "valid:gmail.user@example.com" }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_new_user"], false);

    let access = body["access_token"].as_str().unwrap();
    let (status, body) = app.get("/auth/me", Some(access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "gmail.user@example.com");

    let (status, _) = app
        .post("/auth/google", json!({ "id_token": "forged" }), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

pub(super) async fn test_forgot_password(app: &TestApp) {
    let email = "forgetful@example.com";
    app.register(email).await;

    let (status, _) = app
        .post("/auth/otp/forget", json!({ "email": email }), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let code = app.last_otp(email);

    let (status, body) = app
        .post(
            "/auth/forgot-password",
            json!({ "email": email, "otp": code, "new_password": "brand-new-secret" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    app.post("/auth/otp/login", json!({ "email": email }), None)
        .await;
    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": PASSWORD, "otp": app.last_otp(email) }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": "brand-new-secret", "otp": app.last_otp(email) }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/auth/forgot-password",
            json!({ "email": email, "otp": code, "new_password": "another-secret" }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

pub(super) async fn test_update_password(app: &TestApp) {
    let email = "updater@example.com";
    let (access, _) = app.sign_in(email).await;

    let (status, _) = app.post("/auth/otp/update", json!({}), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post("/auth/otp/update", json!({}), Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    let code = app.last_otp(email);

    let (status, _) = app
        .post(
            "/auth/update-password",
            json!({ "old_password": "not-my-password", "new_password": "updated-secret", "otp": code }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post(
            "/auth/update-password",
            json!({ "old_password": PASSWORD, "new_password": "updated-secret", "otp": code }),
            Some(&access),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    app.post("/auth/otp/login", json!({ "email": email }), None)
        .await;
    let (status, _) = app
        .post(
            "/auth/login",
            json!({ "email": email, "password": "updated-secret", "otp": app.last_otp(email) }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
