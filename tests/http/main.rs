mod ai;
mod auth;
mod profile;

use ai::*;
use auth::*;
use common::TestApp;
use profile::*;
use root::*;

#[tokio::test]
async fn root_main() {
    let app = TestApp::new().await;
    test_root(&app).await;
    test_openapi_document(&app).await;
}

#[tokio::test]
async fn registration_main() {
    let app = TestApp::new().await;
    test_register_with_otp(&app).await;
    test_register_rejects_bad_input(&app).await;
    test_admin_registration(&app).await;
}

#[tokio::test]
async fn login_main() {
    let app = TestApp::new().await;
    test_login_flow(&app).await;
    test_tokens(&app).await;
    test_google_login(&app).await;
}

#[tokio::test]
async fn password_main() {
    let app = TestApp::new().await;
    test_forgot_password(&app).await;
    test_update_password(&app).await;
}

#[tokio::test]
async fn profile_main() {
    let app = TestApp::new().await;
    test_profile_roundtrip(&app).await;
    test_username_rules(&app).await;
    test_profile_image(&app).await;
}

#[tokio::test]
async fn ai_main() {
    let app = TestApp::new().await;
    test_survey_generation(&app).await;
    test_chat_feed(&app).await;
}
