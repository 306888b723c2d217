use sea_orm::DbConn;

use models::domains::{sea_orm_active_enums::UserRole, users};
use models::params::user::{
    CreateUserParams, ForgotPasswordBody, GoogleAuthParams, LoginUserParams,
    UpdatePasswordParams,
};
use models::schemas::user::GoogleLoginSchema;

use crate::config::Config;
use crate::error::AppError;
use crate::otp::{OtpPurpose, OtpService};
use crate::persistence::users::{self as user_store, NewUser};
use crate::utils::google::GoogleVerifier;
use crate::utils::jwt::{self, TokenPair};

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn existing_user(db: &DbConn, email: &str) -> Result<users::Model, AppError> {
    user_store::find_by_email(db, email)
        .await?
        .ok_or(AppError::UserNotFound)
}

pub(crate) async fn signed_in_user(db: &DbConn, user_id: &str) -> Result<users::Model, AppError> {
    user_store::get_user(db, user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

fn password_matches(user: &users::Model, password: &str) -> Result<bool, AppError> {
    match user.passhash.as_deref() {
        Some(hash) => Ok(bcrypt::verify(password, hash)?),
        None => Ok(false),
    }
}

/// Sends a registration code to an address that has no account yet.
pub async fn request_registration_otp(
    db: &DbConn,
    otp: &OtpService,
    email: &str,
) -> Result<String, AppError> {
    let email = normalize_email(email);
    if user_store::email_exists(db, &email).await? {
        return Err(AppError::DuplicateUser(
            "User with this email already exists.".to_string(),
        ));
    }
    Ok(otp.issue(&email, OtpPurpose::Register).await?)
}

pub async fn request_login_otp(
    db: &DbConn,
    otp: &OtpService,
    email: &str,
) -> Result<String, AppError> {
    let user = existing_user(db, &normalize_email(email)).await?;
    Ok(otp.issue(&user.email, OtpPurpose::Login).await?)
}

pub async fn request_password_reset_otp(
    db: &DbConn,
    otp: &OtpService,
    email: &str,
) -> Result<String, AppError> {
    let user = existing_user(db, &normalize_email(email)).await?;
    Ok(otp.issue(&user.email, OtpPurpose::Forget).await?)
}

/// Sends a password-update code to the signed-in user's own address.
pub async fn request_password_update_otp(
    db: &DbConn,
    otp: &OtpService,
    user_id: &str,
) -> Result<String, AppError> {
    let user = signed_in_user(db, user_id).await?;
    Ok(otp.issue(&user.email, OtpPurpose::Update).await?)
}

pub async fn register(
    db: &DbConn,
    config: &Config,
    otp: &OtpService,
    params: CreateUserParams,
) -> Result<users::Model, AppError> {
    let email = normalize_email(&params.email);

    if user_store::email_exists(db, &email).await? {
        return Err(AppError::DuplicateUser(
            "User with this email already exists.".to_string(),
        ));
    }

    if params.role == UserRole::Admin {
        let expected = config.org_secret.as_deref().ok_or_else(|| {
            AppError::Configuration("Admin registration is not configured".to_string())
        })?;
        match params.org_secret.as_deref() {
            None | Some("") => {
                return Err(AppError::Validation(
                    "Organization Secret is required for admin accounts.".to_string(),
                ));
            }
            Some(secret) if secret != expected => {
                return Err(AppError::Validation("Invalid Organization Secret.".to_string()));
            }
            Some(_) => {}
        }
    }

    if let Some(username) = params.username.as_deref() {
        if user_store::username_exists(db, username).await? {
            return Err(AppError::DuplicateUser("Username already exists.".to_string()));
        }
    }

    otp.verify(&email, OtpPurpose::Register, &params.otp).await?;

    let username = match params.username {
        Some(username) => username,
        None => user_store::available_username(db, &email).await?,
    };
    let passhash = bcrypt::hash(&params.password, config.bcrypt_cost)?;

    let user = user_store::create_user(
        db,
        NewUser {
            email,
            username: Some(username),
            passhash: Some(passhash),
            role: params.role,
        },
    )
    .await?;

    tracing::info!("registered user {} as {:?}", user.id, user.role);
    Ok(user)
}

/// Password first, then the login code; the code is only consumed once
/// the password is known to be right.
pub async fn login(
    db: &DbConn,
    config: &Config,
    otp: &OtpService,
    params: LoginUserParams,
) -> Result<TokenPair, AppError> {
    let user = existing_user(db, &normalize_email(&params.email)).await?;

    if !password_matches(&user, &params.password)? {
        return Err(AppError::InvalidCredentials("Password is incorrect".to_string()));
    }

    otp.verify(&user.email, OtpPurpose::Login, &params.otp).await?;

    tracing::debug!("user {} logged in", user.id);
    jwt::generate_token_pair(config, &user)
}

pub async fn google_login(
    db: &DbConn,
    config: &Config,
    google: &dyn GoogleVerifier,
    params: GoogleAuthParams,
) -> Result<GoogleLoginSchema, AppError> {
    let email = normalize_email(&google.verify(&params.id_token).await?);

    let (user, is_new_user) = match user_store::find_by_email(db, &email).await? {
        Some(user) => (user, false),
        None => {
            let user = user_store::create_user(
                db,
                NewUser {
                    email,
                    username: None,
                    passhash: None,
                    role: UserRole::User,
                },
            )
            .await?;
            tracing::info!("created user {} from Google sign-in", user.id);
            (user, true)
        }
    };

    let tokens = jwt::generate_token_pair(config, &user)?;
    Ok(GoogleLoginSchema {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        username: user.username,
        email: user.email,
        is_new_user,
    })
}

pub async fn reset_password(
    db: &DbConn,
    config: &Config,
    otp: &OtpService,
    params: ForgotPasswordBody,
) -> Result<(), AppError> {
    let user = existing_user(db, &normalize_email(&params.email)).await?;

    otp.verify(&user.email, OtpPurpose::Forget, &params.otp).await?;

    let passhash = bcrypt::hash(&params.new_password, config.bcrypt_cost)?;
    user_store::set_password(db, user, passhash).await?;
    Ok(())
}

pub async fn update_password(
    db: &DbConn,
    config: &Config,
    otp: &OtpService,
    user_id: &str,
    params: UpdatePasswordParams,
) -> Result<(), AppError> {
    let user = signed_in_user(db, user_id).await?;

    if !password_matches(&user, &params.old_password)? {
        return Err(AppError::InvalidCredentials("Old password is incorrect".to_string()));
    }

    otp.verify(&user.email, OtpPurpose::Update, &params.otp).await?;

    let passhash = bcrypt::hash(&params.new_password, config.bcrypt_cost)?;
    user_store::set_password(db, user, passhash).await?;
    Ok(())
}

pub fn refresh(config: &Config, refresh_token: &str) -> Result<String, AppError> {
    jwt::refresh_access_token(config, refresh_token)
}
