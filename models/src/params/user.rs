use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domains::sea_orm_active_enums::UserRole;

#[derive(Deserialize, Validate, ToSchema)]
pub struct CreateUserParams {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(equal = 6))]
    pub otp: String,
    #[validate(length(min = 2, max = 150))]
    pub username: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Required when registering an admin account
    #[serde(alias = "orgSecret")]
    pub org_secret: Option<String>,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginUserParams {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct GoogleAuthParams {
    #[validate(length(min = 1))]
    pub id_token: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordBody {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub otp: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordParams {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct RefreshTokenParams {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Deserialize, Validate, ToSchema)]
pub struct UsernameCheckParams {
    #[validate(length(min = 2, max = 150))]
    pub username: String,
}

/// Partial profile update. Social links arrive as top-level keys and are
/// merged into the stored set one by one; empty values are ignored.
#[derive(Deserialize, Validate, ToSchema, Default)]
pub struct UpdateProfileParams {
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(min = 2, max = 150))]
    pub username: Option<String>,
    #[validate(url)]
    pub profile: Option<String>,
    #[validate(length(max = 150))]
    pub name: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}
