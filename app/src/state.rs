use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::otp::{MemoryOtpStore, OtpService, OtpStore, RedisOtpStore};
use crate::utils::chat::{ChatClient, ChatService};
use crate::utils::email::{Mailer, MemoryMailer, SmtpMailer};
use crate::utils::gemini::{GeminiClient, TextGenerator};
use crate::utils::google::{GoogleOidcVerifier, GoogleVerifier};
use crate::utils::http_client;
use crate::utils::image::{CloudinaryImageHost, ImageHost, UnconfiguredImageHost};

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Config,
    pub otp: OtpService,
    pub google: Arc<dyn GoogleVerifier>,
    pub ai: Arc<dyn TextGenerator>,
    pub chat: Arc<dyn ChatService>,
    pub images: Arc<dyn ImageHost>,
}

impl AppState {
    /// Wires the production integrations described by `config`.
    pub async fn from_config(conn: DatabaseConnection, config: Config) -> anyhow::Result<Self> {
        let store: Arc<dyn OtpStore> = match config.redis_url.as_deref() {
            Some(url) => {
                tracing::info!("Using Redis OTP store");
                Arc::new(RedisOtpStore::connect(url).await?)
            }
            None => {
                tracing::info!("REDIS_URL not set, keeping OTPs in memory");
                Arc::new(MemoryOtpStore::new())
            }
        };

        let mailer: Arc<dyn Mailer> = match config.smtp.as_ref() {
            Some(smtp) => Arc::new(SmtpMailer::new(&config.emailer, smtp)?),
            None => {
                tracing::warn!("SMTP not configured, OTP emails stay in the memory outbox");
                Arc::new(MemoryMailer::new())
            }
        };

        let http = http_client()?;
        let images: Arc<dyn ImageHost> = match config.cloudinary.as_ref() {
            Some(settings) => Arc::new(CloudinaryImageHost::new(settings, http.clone())),
            None => Arc::new(UnconfiguredImageHost),
        };

        Ok(Self {
            otp: OtpService::new(store, mailer).with_ttl(config.otp_ttl),
            google: Arc::new(GoogleOidcVerifier::new(config.google_client_id.clone())?),
            ai: Arc::new(GeminiClient::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
                http.clone(),
            )),
            chat: Arc::new(ChatClient::new(config.chat_service_url.clone(), http)),
            images,
            conn,
            config,
        })
    }
}
