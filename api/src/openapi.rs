use utoipa::OpenApi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sākṣin API",
        version = "0.1.0",
        description = "Survey platform backend: OTP-verified accounts, profiles and AI survey generation",
        license(name = "MIT"),
    ),
    paths(
        crate::routers::root::root_get,
        crate::routers::auth::otp_register_post,
        crate::routers::auth::otp_login_post,
        crate::routers::auth::otp_forget_post,
        crate::routers::auth::otp_update_post,
        crate::routers::auth::register_post,
        crate::routers::auth::login_post,
        crate::routers::auth::google_post,
        crate::routers::auth::forgot_password_post,
        crate::routers::auth::update_password_post,
        crate::routers::auth::refresh_post,
        crate::routers::auth::me_get,
        crate::routers::user::profile_get,
        crate::routers::user::profile_patch,
        crate::routers::user::profile_image_put,
        crate::routers::user::username_check_post,
        crate::routers::ai::survey_generate_post,
        crate::routers::ai::chat_feed_post,
    ),
    components(
        schemas(
            crate::models::response::ApiErrorResponse,
            models::schemas::message::MessageSchema,
            models::schemas::user::UserSchema,
            models::schemas::user::AuthUserSchema,
            models::schemas::user::TokensSchema,
            models::schemas::user::AccessTokenSchema,
            models::schemas::user::GoogleLoginSchema,
            models::schemas::user::ProfileSchema,
            models::schemas::user::SocialLinks,
            models::schemas::user::UsernameAvailabilitySchema,
            models::schemas::user::ProfileImageSchema,
            models::schemas::survey::SurveyGenerationSchema,
            models::schemas::survey::SurveyQuestion,
            models::schemas::survey::SurveyMetadata,
            models::schemas::survey::QuestionType,
            models::schemas::survey::ChatFeedSchema,
            models::params::otp::OtpRequestParams,
            models::params::user::CreateUserParams,
            models::params::user::LoginUserParams,
            models::params::user::GoogleAuthParams,
            models::params::user::ForgotPasswordBody,
            models::params::user::UpdatePasswordParams,
            models::params::user::RefreshTokenParams,
            models::params::user::UsernameCheckParams,
            models::params::user::UpdateProfileParams,
            models::params::ai::SurveyGenerationParams,
            models::params::ai::SurveyType,
            models::params::ai::ChatFeedParams,
            models::domains::sea_orm_active_enums::UserRole,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "root", description = "Service status"),
        (name = "auth", description = "OTP, registration, login and token endpoints"),
        (name = "users", description = "Profile endpoints"),
        (name = "ai", description = "Survey generation and chat ingestion"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/login or /auth/google"))
                        .build(),
                ),
            );
        }
    }
}
