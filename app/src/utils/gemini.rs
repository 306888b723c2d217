use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Text completion backend used for survey generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    async fn generate(&self, system_message: &str, prompt: &str) -> Result<String, AppError>;
}

pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String, http: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            http,
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_message: &str, prompt: &str) -> Result<String, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            tracing::error!("GOOGLE_API_KEY not found in environment variables");
            AppError::Configuration("Missing Gemini API key".into())
        })?;

        let full_prompt = format!("{system_message}\n\n{prompt}");
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &full_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
            },
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                AppError::UpstreamService("AI service request failed".into())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error {}: {}", status, body);
            return Err(AppError::UpstreamService(format!(
                "AI service responded with {status}"
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            tracing::error!("Unreadable Gemini response: {}", e);
            AppError::UpstreamService("AI service returned an unreadable response".into())
        })?;

        body.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| AppError::UpstreamService("AI service returned no text".into()))
    }
}
