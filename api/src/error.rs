use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use app::error::AppError;

use crate::models::response::{ApiErrorResponse, ValidationErrorResponse};

/// Every handler error ends up here; the wrapped error picks the status.
pub struct ApiError(pub anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiErrorResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

fn app_error_response(err: &AppError) -> Response {
    let status = match err {
        AppError::Validation(_) | AppError::InvalidOrExpiredOtp => StatusCode::BAD_REQUEST,
        AppError::DuplicateUser(_) => StatusCode::CONFLICT,
        AppError::UserNotFound => StatusCode::NOT_FOUND,
        AppError::InvalidCredentials(_) | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        AppError::UpstreamService(_) => StatusCode::BAD_GATEWAY,
        AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database(_) | AppError::Internal(_) => {
            tracing::error!("{:#}", err);
            return message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    if status.is_server_error() {
        tracing::error!("{}", err);
    }
    message(status, err.to_string())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(errors) = self.0.downcast_ref::<ValidationErrors>() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse::from(errors.clone())),
            )
                .into_response();
        }

        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return message(StatusCode::BAD_REQUEST, rejection.body_text());
        }

        if let Some(rejection) = self.0.downcast_ref::<MultipartRejection>() {
            return message(StatusCode::BAD_REQUEST, rejection.body_text());
        }

        if let Some(err) = self.0.downcast_ref::<MultipartError>() {
            return message(StatusCode::BAD_REQUEST, err.body_text());
        }

        if let Some(err) = self.0.downcast_ref::<AppError>() {
            return app_error_response(err);
        }

        tracing::error!("Unhandled error: {:#}", self.0);
        message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
