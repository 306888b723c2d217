use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// The external chat microservice.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Pushes raw text into the user's chat knowledge base and returns the
    /// service's JSON reply untouched.
    async fn feed(&self, email: &str, raw_text: &str) -> Result<Value, AppError>;
}

pub struct ChatClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct FeedRequest<'a> {
    email: &'a str,
    raw_text: &'a str,
}

impl ChatClient {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl ChatService for ChatClient {
    async fn feed(&self, email: &str, raw_text: &str) -> Result<Value, AppError> {
        let response = self
            .http
            .post(format!("{}/chat/feed/", self.base_url))
            .json(&FeedRequest { email, raw_text })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat service request failed: {}", e);
                AppError::UpstreamService("Chat service is unreachable".into())
            })?;

        if !response.status().is_success() {
            tracing::error!("Chat service responded with {}", response.status());
            return Err(AppError::UpstreamService(
                "Failed to update Chatify feed".into(),
            ));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Unreadable chat service response: {}", e);
            AppError::UpstreamService("Chat service returned an unreadable response".into())
        })
    }
}
