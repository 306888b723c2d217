use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
    routing::{get, post, put},
};
use utoipa::ToSchema;

use app::error::AppError;
use app::services::profile;
use app::state::AppState;
use models::params::user::{UpdateProfileParams, UsernameCheckParams};
use models::schemas::user::{ProfileImageSchema, ProfileSchema, UsernameAvailabilitySchema};

use crate::error::ApiError;
use crate::extractor::{CurrentUser, Json, Valid};
use crate::models::response::ApiErrorResponse;

const IMAGE_FIELD: &str = "profile_image";
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Multipart body of the image upload.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ProfileImageForm {
    #[schema(value_type = String, format = Binary)]
    profile_image: Vec<u8>,
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Profile of the signed-in user", body = ProfileSchema),
        (status = 401, description = "Not signed in", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn profile_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(profile::get_profile(&state.conn, &user.id).await?))
}

#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "users",
    request_body = UpdateProfileParams,
    responses(
        (status = 200, description = "Updated profile", body = ProfileSchema),
        (status = 401, description = "Not signed in", body = ApiErrorResponse),
        (status = 409, description = "Username taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn profile_patch(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Valid(Json(params)): Valid<Json<UpdateProfileParams>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        profile::update_profile(&state.conn, &user.id, params).await?,
    ))
}

#[utoipa::path(
    put,
    path = "/users/me/image",
    tag = "users",
    request_body(content = ProfileImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = ProfileImageSchema),
        (status = 400, description = "Missing file or unsupported type", body = ApiErrorResponse),
        (status = 502, description = "Image host failed", body = ApiErrorResponse),
        (status = 503, description = "Image host not configured", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn profile_image_put(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;

        let url = profile::upload_profile_image(
            &state.conn,
            state.images.as_ref(),
            &user.id,
            &file_name,
            bytes.to_vec(),
        )
        .await?;

        return Ok(Json(ProfileImageSchema {
            msg: "Profile image updated".to_string(),
            url,
        }));
    }

    Err(AppError::Validation("No file uploaded.".to_string()).into())
}

#[utoipa::path(
    post,
    path = "/users/username-check",
    tag = "users",
    request_body = UsernameCheckParams,
    responses(
        (status = 200, description = "Availability of the username", body = UsernameAvailabilitySchema),
        (status = 401, description = "Not signed in", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[axum::debug_handler]
pub async fn username_check_post(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Valid(Json(params)): Valid<Json<UsernameCheckParams>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(
        profile::check_username(&state.conn, &params.username).await?,
    ))
}

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile_get).patch(profile_patch))
        .route(
            "/me/image",
            put(profile_image_put).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route("/username-check", post(username_check_post))
}
