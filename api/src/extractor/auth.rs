use axum::{extract::FromRequestParts, http::request::Parts};

use app::error::AppError;
use models::schemas::user::{AuthSchema, AuthUserSchema};

use crate::error::ApiError;

/// The signed-in user, as placed in the request by the auth middleware.
pub struct CurrentUser(pub AuthUserSchema);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSchema>()
            .and_then(|auth| auth.user.clone())
            .map(CurrentUser)
            .ok_or_else(|| AppError::Unauthorized.into())
    }
}
