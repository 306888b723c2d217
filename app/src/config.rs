use anyhow::Context;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{ops::Deref, str::FromStr, sync::Arc, time::Duration};

pub const DEFAULT_OTP_TTL: Duration = Duration::from_secs(10 * 60);
const DEFAULT_CHAT_SERVICE_URL: &str = "http://localhost:8005";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

pub struct CloudinarySettings {
    pub cloud_name: String,
    pub upload_preset: String,
}

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub otp_ttl: Duration,
    pub bcrypt_cost: u32,
    /// OTPs live in process memory when unset
    pub redis_url: Option<String>,
    pub emailer: String,
    /// Outgoing mail stays in an in-memory outbox when unset
    pub smtp: Option<SmtpSettings>,
    pub google_client_id: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub chat_service_url: String,
    /// Needed to register admin accounts
    pub org_secret: Option<String>,
    pub cloudinary: Option<CloudinarySettings>,
}

impl ConfigInner {
    /// Settings with every optional integration switched off.
    pub fn new(db_url: &str, jwt_secret: &str) -> Self {
        Self {
            db_url: db_url.to_owned(),
            host: "127.0.0.1".to_owned(),
            port: 8000,
            allowed_origins: vec!["http://localhost:3000".to_owned()],
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_ttl: Duration::from_secs(60 * 60),
            refresh_token_ttl: Duration::from_secs(60 * 60 * 24 * 7),
            otp_ttl: DEFAULT_OTP_TTL,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            redis_url: None,
            emailer: "no-reply@saksin.ai".to_owned(),
            smtp: None,
            google_client_id: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_owned(),
            chat_service_url: DEFAULT_CHAT_SERVICE_URL.to_owned(),
            org_secret: None,
            cloudinary: None,
        }
    }
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        let mut v = ConfigInner::new(&required("DATABASE_URL")?, &required("JWT_SECRET")?);

        v.host = required("HOST")?;
        v.port = required("PORT")?
            .parse()
            .context("PORT is not a number")?;
        if let Some(origins) = optional("ALLOWED_ORIGIN") {
            v.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_owned)
                .collect();
        }
        v.access_token_ttl =
            Duration::from_secs(parsed_or("ACCESS_TOKEN_EXPIRE_MINUTES", 60u64)? * 60);
        v.refresh_token_ttl =
            Duration::from_secs(parsed_or("REFRESH_TOKEN_EXPIRE_DAYS", 7u64)? * 60 * 60 * 24);
        v.otp_ttl = Duration::from_secs(parsed_or("OTP_TTL_SECS", DEFAULT_OTP_TTL.as_secs())?);
        v.bcrypt_cost = parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        v.redis_url = optional("REDIS_URL");

        if let Some(host) = optional("SMTP_HOST") {
            v.smtp = Some(SmtpSettings {
                host,
                port: parsed_or("SMTP_PORT", 587u16)?,
                user: required("SMTP_USER")?,
                pass: required("SMTP_PASS")?,
            });
            v.emailer = required("EMAILER")?;
        }

        v.google_client_id = optional("GOOGLE_CLIENT_ID");
        v.gemini_api_key = optional("GOOGLE_API_KEY");
        if let Some(model) = optional("GEMINI_MODEL") {
            v.gemini_model = model;
        }
        if let Some(url) = optional("CHAT_SERVICE_URL") {
            v.chat_service_url = url.trim_end_matches('/').to_owned();
        }
        v.org_secret = optional("ORG_SECRET");
        v.cloudinary = match (
            optional("CLOUDINARY_CLOUD_NAME"),
            optional("CLOUDINARY_UPLOAD_PRESET"),
        ) {
            (Some(cloud_name), Some(upload_preset)) => Some(CloudinarySettings {
                cloud_name,
                upload_preset,
            }),
            _ => None,
        };

        Ok(Self(Arc::new(v)))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl From<ConfigInner> for Config {
    fn from(inner: ConfigInner) -> Self {
        Self(Arc::new(inner))
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} is not set in .env file"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(name) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{name} has an invalid value")),
        None => Ok(default),
    }
}
