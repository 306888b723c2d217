use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::CloudinarySettings;
use crate::error::AppError;

/// Hosts uploaded images and hands back their public URL.
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AppError>;
}

pub struct CloudinaryImageHost {
    cloud_name: String,
    upload_preset: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryImageHost {
    pub fn new(settings: &CloudinarySettings, http: reqwest::Client) -> Self {
        Self {
            cloud_name: settings.cloud_name.clone(),
            upload_preset: settings.upload_preset.clone(),
            http,
        }
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, AppError> {
        let form = Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", Part::bytes(bytes).file_name(file_name.to_owned()));

        let response = self
            .http
            .post(format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            ))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image upload failed: {}", e);
                AppError::UpstreamService("Image host is unreachable".into())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Image host error {}: {}", status, body);
            return Err(AppError::UpstreamService("Image upload was rejected".into()));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamService(format!("Unreadable image host response: {e}")))?;
        Ok(uploaded.secure_url)
    }
}

/// Stand-in used when no image host is configured.
pub struct UnconfiguredImageHost;

#[async_trait]
impl ImageHost for UnconfiguredImageHost {
    async fn upload(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<String, AppError> {
        Err(AppError::Configuration("Image uploads are not configured".into()))
    }
}
