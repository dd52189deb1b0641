//! Request and response types for the generate endpoint

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single generate call: one prompt, optional images, optional system prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Image files, kept exactly as the caller gave them
    pub images: Vec<PathBuf>,
    pub system: Option<String>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            images: Vec::new(),
            system: None,
        }
    }

    /// Attach an image file
    pub fn image(mut self, path: impl AsRef<Path>) -> Self {
        self.images.push(path.as_ref().to_path_buf());
        self
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Body posted to `/api/generate`. Images are base64 of the raw file bytes.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    pub response: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: i32,
    #[serde(default)]
    pub eval_count: i32,
}

/// Error payload the backend sends with non-2xx statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
