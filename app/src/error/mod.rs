use sea_orm::DbErr;
use thiserror::Error;

/// Failures of the OTP workflow.
#[derive(Debug, Error)]
pub enum OtpError {
    /// Covers never-sent, expired and wrong codes alike.
    #[error("Invalid or expired OTP.")]
    InvalidOrExpired,

    #[error("Failed to deliver OTP email: {0}")]
    Delivery(#[source] anyhow::Error),

    #[error("OTP store unavailable: {0}")]
    Store(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid or expired OTP.")]
    InvalidOrExpiredOtp,

    #[error("{0}")]
    DuplicateUser(String),

    #[error("User with this email does not exist.")]
    UserNotFound,

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Upstream service error: {0}")]
    UpstreamService(String),

    #[error("Server configuration error: {0}")]
    Configuration(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<OtpError> for AppError {
    fn from(e: OtpError) -> Self {
        match e {
            OtpError::InvalidOrExpired => AppError::InvalidOrExpiredOtp,
            OtpError::Delivery(e) => {
                tracing::error!("OTP delivery failed: {:#}", e);
                AppError::UpstreamService("Failed to send OTP email".to_string())
            }
            OtpError::Store(e) => AppError::Internal(e),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e))
    }
}
