use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use app::config::{Config, ConfigInner};
use app::error::AppError;
use app::otp::{MemoryOtpStore, OtpPurpose, OtpService, OtpStore, otp_key};
use app::services::auth;
use app::utils::email::MemoryMailer;
use app::utils::google::GoogleVerifier;
use models::domains::sea_orm_active_enums::UserRole;
use models::params::user::{CreateUserParams, GoogleAuthParams, LoginUserParams};

const PASSWORD: &str = "s3cure-enough";

struct FixedGoogle(&'static str);

#[async_trait]
impl GoogleVerifier for FixedGoogle {
    async fn verify(&self, _id_token: &str) -> Result<String, AppError> {
        Ok(self.0.to_owned())
    }
}

fn config() -> Config {
    let mut inner = ConfigInner::new("sqlite::memory:", "service-secret");
    inner.bcrypt_cost = 4;
    Config::from(inner)
}

fn otp() -> (OtpService, MemoryOtpStore) {
    let store = MemoryOtpStore::new();
    let service = OtpService::new(Arc::new(store.clone()), Arc::new(MemoryMailer::new()));
    (service, store)
}

async fn registered(db: &DatabaseConnection, otp: &OtpService, email: &str) {
    let code = auth::request_registration_otp(db, otp, email).await.unwrap();
    auth::register(
        db,
        &config(),
        otp,
        CreateUserParams {
            email: email.to_owned(),
            password: PASSWORD.to_owned(),
            otp: code,
            username: None,
            role: UserRole::User,
            org_secret: None,
        },
    )
    .await
    .unwrap();
}

pub(super) async fn test_register_consumes_code(db: &DatabaseConnection) {
    let (otp, store) = otp();
    let email = "new@example.com";

    let code = auth::request_registration_otp(db, &otp, email).await.unwrap();
    let key = otp_key(OtpPurpose::Register, email);
    assert!(store.get(&key).await.unwrap().is_some());

    let params = || CreateUserParams {
        email: email.to_owned(),
        password: PASSWORD.to_owned(),
        otp: code.clone(),
        username: None,
        role: UserRole::User,
        org_secret: None,
    };

    let user = auth::register(db, &config(), &otp, params()).await.unwrap();
    assert_eq!(user.username.as_deref(), Some("new"));
    assert!(user.passhash.is_some_and(|h| h != PASSWORD));
    assert_eq!(store.get(&key).await.unwrap(), None);

    let again = auth::register(db, &config(), &otp, params()).await;
    assert!(matches!(again, Err(AppError::DuplicateUser(_))));

    // admin sign-up with no organization secret configured
    let admin = auth::register(
        db,
        &config(),
        &otp,
        CreateUserParams {
            email: "admin@example.com".to_owned(),
            role: UserRole::Admin,
            org_secret: Some("anything".to_owned()),
            ..params()
        },
    )
    .await;
    assert!(matches!(admin, Err(AppError::Configuration(_))));
}

pub(super) async fn test_login_checks_password_before_code(db: &DatabaseConnection) {
    let (otp, store) = otp();
    let email = "login@example.com";
    registered(db, &otp, email).await;

    let code = auth::request_login_otp(db, &otp, email).await.unwrap();
    let key = otp_key(OtpPurpose::Login, email);

    let wrong = auth::login(
        db,
        &config(),
        &otp,
        LoginUserParams {
            email: email.to_owned(),
            password: "wrong".to_owned(),
            otp: code.clone(),
        },
    )
    .await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials(_))));
    assert!(store.get(&key).await.unwrap().is_some());

    let pair = auth::login(
        db,
        &config(),
        &otp,
        LoginUserParams {
            email: " LOGIN@example.com ".to_owned(),
            password: PASSWORD.to_owned(),
            otp: code,
        },
    )
    .await
    .unwrap();
    assert!(!pair.access_token.is_empty());
    assert_eq!(store.get(&key).await.unwrap(), None);

    let missing = auth::request_login_otp(db, &otp, "ghost@example.com").await;
    assert!(matches!(missing, Err(AppError::UserNotFound)));
}

pub(super) async fn test_google_login_is_idempotent(db: &DatabaseConnection) {
    let google = FixedGoogle("Social@Example.com");
    let params = || GoogleAuthParams {
        id_token: "token".to_owned(),
    };

    let first = auth::google_login(db, &config(), &google, params())
        .await
        .unwrap();
    assert!(first.is_new_user);
    assert_eq!(first.email, "social@example.com");
    assert_eq!(first.username, None);

    let second = auth::google_login(db, &config(), &google, params())
        .await
        .unwrap();
    assert!(!second.is_new_user);

    // a Google-only account has no password to log in with
    let (otp, _) = otp();
    let login = auth::login(
        db,
        &config(),
        &otp,
        LoginUserParams {
            email: "social@example.com".to_owned(),
            password: "anything".to_owned(),
            otp: "123456".to_owned(),
        },
    )
    .await;
    assert!(matches!(login, Err(AppError::InvalidCredentials(_))));
}
