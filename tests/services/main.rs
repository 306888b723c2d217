use sea_orm::DatabaseConnection;

use utils::testing::setup_test_db;

mod auth;
mod users;

use auth::*;
use users::*;

async fn db() -> DatabaseConnection {
    setup_test_db("sqlite::memory:")
        .await
        .expect("Set up db failed!")
}

#[tokio::test]
async fn users_main() {
    let db = db().await;
    test_create_and_find(&db).await;
    test_available_username(&db).await;
    test_update_profile(&db).await;
}

#[tokio::test]
async fn auth_main() {
    let db = db().await;
    test_register_consumes_code(&db).await;
    test_login_checks_password_before_code(&db).await;
    test_google_login_is_idempotent(&db).await;
}
