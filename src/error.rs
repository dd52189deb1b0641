//! Error types for ollama-vision

use std::path::PathBuf;
use thiserror::Error;

/// Result type for backend calls
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between building a request and reading the reply
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Request(String),

    #[error("Failed to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Response { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
