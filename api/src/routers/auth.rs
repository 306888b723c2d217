use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use app::services::auth;
use app::state::AppState;
use models::params::otp::OtpRequestParams;
use models::params::user::{
    CreateUserParams, ForgotPasswordBody, GoogleAuthParams, LoginUserParams, RefreshTokenParams,
    UpdatePasswordParams,
};
use models::schemas::message::MessageSchema;
use models::schemas::user::{
    AccessTokenSchema, AuthUserSchema, GoogleLoginSchema, TokensSchema, UserSchema,
};

use crate::error::ApiError;
use crate::extractor::{CurrentUser, Json, Valid};
use crate::models::response::ApiErrorResponse;

const OTP_SENT: &str = "OTP sent successfully";

#[utoipa::path(
    post,
    path = "/auth/otp/register",
    tag = "auth",
    request_body = OtpRequestParams,
    responses(
        (status = 200, description = "Registration code sent", body = MessageSchema),
        (status = 409, description = "Email already registered", body = ApiErrorResponse),
        (status = 502, description = "Email could not be delivered", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn otp_register_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<OtpRequestParams>>,
) -> Result<impl IntoResponse, ApiError> {
    auth::request_registration_otp(&state.conn, &state.otp, &params.email).await?;
    Ok(Json(MessageSchema::new(OTP_SENT)))
}

#[utoipa::path(
    post,
    path = "/auth/otp/login",
    tag = "auth",
    request_body = OtpRequestParams,
    responses(
        (status = 200, description = "Login code sent", body = MessageSchema),
        (status = 404, description = "No such user", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn otp_login_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<OtpRequestParams>>,
) -> Result<impl IntoResponse, ApiError> {
    auth::request_login_otp(&state.conn, &state.otp, &params.email).await?;
    Ok(Json(MessageSchema::new(OTP_SENT)))
}

#[utoipa::path(
    post,
    path = "/auth/otp/forget",
    tag = "auth",
    request_body = OtpRequestParams,
    responses(
        (status = 200, description = "Password reset code sent", body = MessageSchema),
        (status = 404, description = "No such user", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn otp_forget_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<OtpRequestParams>>,
) -> Result<impl IntoResponse, ApiError> {
    auth::request_password_reset_otp(&state.conn, &state.otp, &params.email).await?;
    Ok(Json(MessageSchema::new(OTP_SENT)))
}

#[utoipa::path(
    post,
    path = "/auth/otp/update",
    tag = "auth",
    responses(
        (status = 200, description = "Password update code sent", body = MessageSchema),
        (status = 401, description = "Not signed in", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn otp_update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    auth::request_password_update_otp(&state.conn, &state.otp, &user.id).await?;
    Ok(Json(MessageSchema::new(OTP_SENT)))
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = CreateUserParams,
    responses(
        (status = 201, description = "User registered", body = UserSchema),
        (status = 400, description = "Invalid input or OTP", body = ApiErrorResponse),
        (status = 409, description = "User already exists", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn register_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<CreateUserParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = auth::register(&state.conn, &state.config, &state.otp, params).await?;
    Ok((StatusCode::CREATED, Json(UserSchema::from(user))))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginUserParams,
    responses(
        (status = 200, description = "Signed in", body = TokensSchema),
        (status = 400, description = "Invalid or expired OTP", body = ApiErrorResponse),
        (status = 401, description = "Wrong password", body = ApiErrorResponse),
        (status = 404, description = "No such user", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn login_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<LoginUserParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = auth::login(&state.conn, &state.config, &state.otp, params).await?;
    Ok(Json(TokensSchema {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}

#[utoipa::path(
    post,
    path = "/auth/google",
    tag = "auth",
    request_body = GoogleAuthParams,
    responses(
        (status = 200, description = "Signed in with Google", body = GoogleLoginSchema),
        (status = 401, description = "Invalid ID token", body = ApiErrorResponse),
        (status = 503, description = "Google sign-in not configured", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn google_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<GoogleAuthParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let login =
        auth::google_login(&state.conn, &state.config, state.google.as_ref(), params).await?;
    Ok(Json(login))
}

#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordBody,
    responses(
        (status = 200, description = "Password reset", body = MessageSchema),
        (status = 400, description = "Invalid or expired OTP", body = ApiErrorResponse),
        (status = 404, description = "No such user", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn forgot_password_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<ForgotPasswordBody>>,
) -> Result<impl IntoResponse, ApiError> {
    auth::reset_password(&state.conn, &state.config, &state.otp, params).await?;
    Ok(Json(MessageSchema::new("Password reset successfully")))
}

#[utoipa::path(
    post,
    path = "/auth/update-password",
    tag = "auth",
    request_body = UpdatePasswordParams,
    responses(
        (status = 200, description = "Password updated", body = MessageSchema),
        (status = 400, description = "Invalid or expired OTP", body = ApiErrorResponse),
        (status = 401, description = "Not signed in or wrong old password", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn update_password_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(params)): Valid<Json<UpdatePasswordParams>>,
) -> Result<impl IntoResponse, ApiError> {
    auth::update_password(&state.conn, &state.config, &state.otp, &user.id, params).await?;
    Ok(Json(MessageSchema::new("Password updated successfully")))
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = "auth",
    request_body = RefreshTokenParams,
    responses(
        (status = 200, description = "New access token", body = AccessTokenSchema),
        (status = 401, description = "Invalid refresh token", body = ApiErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn refresh_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<RefreshTokenParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = auth::refresh(&state.config, &params.refresh_token)?;
    Ok(Json(AccessTokenSchema { access_token }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = AuthUserSchema),
        (status = 401, description = "Not signed in", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn me_get(CurrentUser(user): CurrentUser) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(user))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/otp/register", post(otp_register_post))
        .route("/otp/login", post(otp_login_post))
        .route("/otp/forget", post(otp_forget_post))
        .route("/otp/update", post(otp_update_post))
        .route("/register", post(register_post))
        .route("/login", post(login_post))
        .route("/google", post(google_post))
        .route("/forgot-password", post(forgot_password_post))
        .route("/update-password", post(update_password_post))
        .route("/refresh", post(refresh_post))
        .route("/me", get(me_get))
}
