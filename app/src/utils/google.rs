use async_trait::async_trait;
use openidconnect::{
    ClientId, IssuerUrl, Nonce,
    core::{CoreClient, CoreIdToken, CoreProviderMetadata},
};

use super::UPSTREAM_TIMEOUT;
use crate::error::AppError;

const GOOGLE_ISSUER: &str = "https://accounts.google.com";

/// Checks a Google ID token and returns the email it vouches for.
#[async_trait]
pub trait GoogleVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<String, AppError>;
}

pub struct GoogleOidcVerifier {
    client_id: Option<String>,
    http: reqwest::Client,
}

impl GoogleOidcVerifier {
    pub fn new(client_id: Option<String>) -> anyhow::Result<Self> {
        // OIDC discovery must not follow redirects
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self { client_id, http })
    }
}

fn invalid_token() -> AppError {
    AppError::InvalidCredentials("Invalid Google ID token.".to_string())
}

#[async_trait]
impl GoogleVerifier for GoogleOidcVerifier {
    async fn verify(&self, id_token: &str) -> Result<String, AppError> {
        let client_id = self
            .client_id
            .clone()
            .ok_or_else(|| AppError::Configuration("Google login is not configured".into()))?;

        let issuer = IssuerUrl::new(GOOGLE_ISSUER.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid issuer url: {}", e))?;
        let metadata = CoreProviderMetadata::discover_async(issuer, &self.http)
            .await
            .map_err(|e| {
                tracing::error!("Google OIDC discovery failed: {}", e);
                AppError::UpstreamService("Google sign-in is unavailable".into())
            })?;
        let client = CoreClient::from_provider_metadata(metadata, ClientId::new(client_id), None);

        let token: CoreIdToken = id_token.parse().map_err(|_| invalid_token())?;
        let verifier = client.id_token_verifier();
        let claims = token
            .claims(&verifier, |_: Option<&Nonce>| -> Result<(), String> { Ok(()) })
            .map_err(|e| {
                tracing::debug!("Google ID token rejected: {}", e);
                invalid_token()
            })?;

        if claims.email_verified() == Some(false) {
            return Err(invalid_token());
        }
        claims
            .email()
            .map(|email| email.as_str().to_owned())
            .ok_or_else(invalid_token)
    }
}
