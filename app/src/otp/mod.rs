//! One-time codes: issued per `(purpose, email)`, delivered by email,
//! consumed at most once.

use rand::Rng;
use std::{fmt, sync::Arc, time::Duration};

use crate::config::DEFAULT_OTP_TTL;
use crate::error::OtpError;
use crate::utils::email::{Mailer, otp_email};

mod store;

pub use store::{MemoryOtpStore, OtpStore, RedisOtpStore};

pub const OTP_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    Login,
    Register,
    Forget,
    Update,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Login => "login",
            OtpPurpose::Register => "register",
            OtpPurpose::Forget => "forget",
            OtpPurpose::Update => "update",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn otp_key(purpose: OtpPurpose, email: &str) -> String {
    format!("otp:{}:{}", purpose, email.trim().to_lowercase())
}

/// Six decimal digits, leading zeros kept. `rand::rng()` is a CSPRNG.
pub fn generate_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{:0width$}", n, width = OTP_LENGTH)
}

/// Generates a code, stores it (replacing any unconsumed one for the same
/// purpose and email) and emails it. Returns the code.
pub async fn issue_otp(
    store: &dyn OtpStore,
    mailer: &dyn Mailer,
    email: &str,
    purpose: OtpPurpose,
    ttl: Duration,
) -> Result<String, OtpError> {
    let code = generate_code();

    store
        .set(&otp_key(purpose, email), &code, ttl)
        .await
        .map_err(OtpError::Store)?;

    mailer
        .send(otp_email(email, purpose, &code, ttl))
        .await
        .map_err(OtpError::Delivery)?;

    tracing::info!("issued {} OTP for {}", purpose, email);
    Ok(code)
}

/// Consumes the stored code when `submitted` matches it.
pub async fn verify_otp(
    store: &dyn OtpStore,
    email: &str,
    purpose: OtpPurpose,
    submitted: &str,
) -> Result<(), OtpError> {
    let submitted = submitted.trim();
    if submitted.len() != OTP_LENGTH || !submitted.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OtpError::InvalidOrExpired);
    }

    let consumed = store
        .take_if_matches(&otp_key(purpose, email), submitted)
        .await
        .map_err(OtpError::Store)?;

    if consumed {
        tracing::debug!("consumed {} OTP for {}", purpose, email);
        Ok(())
    } else {
        Err(OtpError::InvalidOrExpired)
    }
}

/// The store and mailer the request handlers share.
#[derive(Clone)]
pub struct OtpService {
    store: Arc<dyn OtpStore>,
    mailer: Arc<dyn Mailer>,
    ttl: Duration,
}

impl OtpService {
    pub fn new(store: Arc<dyn OtpStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            mailer,
            ttl: DEFAULT_OTP_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> Result<String, OtpError> {
        issue_otp(
            self.store.as_ref(),
            self.mailer.as_ref(),
            email,
            purpose,
            self.ttl,
        )
        .await
    }

    pub async fn verify(
        &self,
        email: &str,
        purpose: OtpPurpose,
        submitted: &str,
    ) -> Result<(), OtpError> {
        verify_otp(self.store.as_ref(), email, purpose, submitted).await
    }
}
