//! Google Generative Language API backend.
//!
//! Sends one `generateContent` request per prompt and returns the text of
//! the first candidate.

use super::backend::{GenerationRequest, InsightBackend};
use crate::config::ModelConfig;
use crate::error::InsightError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Backend for the hosted Gemini models.
pub struct GeminiBackend {
    http_client: reqwest::Client,
    api_url: String,
    model_name: String,
    api_key: Option<String>,
    api_key_env: String,
    timeout_seconds: u64,
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// `generateContent` response body.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn from_request(request: GenerationRequest) -> Self {
        let generation_config = if request.temperature.is_some()
            || request.top_p.is_some()
            || request.thinking_budget.is_some()
        {
            Some(GenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                thinking_config: request
                    .thinking_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            })
        } else {
            None
        };

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.prompt),
                }],
            }],
            generation_config,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiBackend {
    /// Create a backend from model settings and an optional API key.
    pub fn new(config: &ModelConfig, api_key: Option<String>) -> Result<Self> {
        info!("Initializing insight backend with model {}", config.name);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model_name: config.name.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: config.api_key_env.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    /// Create a backend reading the API key from the configured variable.
    pub fn from_env(config: &ModelConfig) -> Result<Self> {
        Self::new(config, std::env::var(&config.api_key_env).ok())
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model_name)
    }
}

#[async_trait]
impl InsightBackend for GeminiBackend {
    fn id(&self) -> &str {
        &self.model_name
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InsightError::MissingApiKey(self.api_key_env.clone()))?;

        let url = self.endpoint();
        let body = GenerateContentRequest::from_request(request);
        debug!("Sending generateContent request to {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InsightError::Timeout(self.timeout_seconds)
                } else if e.is_connect() {
                    InsightError::Connect(self.api_url.clone())
                } else {
                    InsightError::Request(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InsightError::Parse(e.to_string()))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(InsightError::Empty);
        }

        debug!("Received {} characters from {}", text.len(), self.model_name);
        Ok(text)
    }
}
