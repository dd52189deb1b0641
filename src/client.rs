//! Ollama API client

use crate::Backend;
use crate::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{Error, Result};
use crate::types::{ErrorBody, GenerateBody, GenerateRequest, GenerateResponse};
use async_trait::async_trait;
use base64::Engine;
use std::path::Path;

/// Ollama API client
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the default local server
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"),
        }
    }

    /// Create a client for `host`, normalized with [`config::parse_host`]
    pub fn with_host(host: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config::parse_host(host)?,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        if request.model.is_empty() {
            return Err(Error::Request("must provide a model".to_string()));
        }

        let mut images = Vec::with_capacity(request.images.len());
        for path in &request.images {
            images.push(encode_image(path).await?);
        }

        tracing::info!(
            "Sending generate request to {} (model: {}, images: {})",
            self.base_url,
            request.model,
            images.len()
        );

        let body = GenerateBody {
            model: &request.model,
            prompt: &request.prompt,
            images,
            system: request.system.as_deref(),
            stream: false,
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(status, response.text().await.ok());
            tracing::warn!("Backend returned {}: {}", status, message);
            return Err(Error::Response {
                status: status.as_u16(),
                message,
            });
        }

        let resp: GenerateResponse = response.json().await?;
        tracing::debug!(
            "Generated {} tokens in {}ms (load {}ms, prompt tokens {})",
            resp.eval_count,
            resp.total_duration / 1_000_000,
            resp.load_duration / 1_000_000,
            resp.prompt_eval_count
        );

        Ok(resp)
    }
}

/// The backend's `error` field, else the raw body, else the status reason
fn error_message(status: reqwest::StatusCode, body: Option<String>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text),
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

/// Read an image file and base64 encode the bytes as they are on disk
async fn encode_image(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}
