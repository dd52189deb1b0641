//! Ask a vision model served by Ollama about an image.
//!
//! ```no_run
//! # async fn run() -> ollama_vision::Result<()> {
//! use ollama_vision::{OllamaClient, ask};
//!
//! let client = OllamaClient::new();
//! let answer = ask(&client, "llava", "What is in this picture?", "cat.jpg").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::OllamaClient;
pub use config::Config;
pub use error::{Error, Result};
pub use types::{GenerateRequest, GenerateResponse};

use async_trait::async_trait;
use std::path::Path;

/// A model-serving backend exposing a single generate operation
#[async_trait]
pub trait Backend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;
}

/// Send `prompt` and the image at `image` to `model`, returning the response text as-is.
///
/// The image path is handed to the backend untouched; reading it is the backend's job.
/// Errors are passed through unchanged.
pub async fn ask<B: Backend + ?Sized>(
    backend: &B,
    model: &str,
    prompt: &str,
    image: impl AsRef<Path>,
) -> Result<String> {
    ask_with(backend, model, prompt, image, None).await
}

/// [`ask`] with an optional system prompt
pub async fn ask_with<B: Backend + ?Sized>(
    backend: &B,
    model: &str,
    prompt: &str,
    image: impl AsRef<Path>,
    system: Option<&str>,
) -> Result<String> {
    let mut request = GenerateRequest::new(model, prompt).image(image);
    if let Some(system) = system {
        request = request.system(system);
    }
    backend.generate(&request).await.map(|resp| resp.response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed model name
    struct RecordingBackend {
        model: &'static str,
        reply: &'static str,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl RecordingBackend {
        fn new(model: &'static str, reply: &'static str) -> Self {
            Self {
                model,
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend for RecordingBackend {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
            self.seen.lock().unwrap().push(request.clone());
            if request.model != self.model {
                return Err(Error::Response {
                    status: 404,
                    message: format!("model '{}' not found", request.model),
                });
            }
            Ok(GenerateResponse {
                model: self.model.to_string(),
                response: self.reply.to_string(),
                done: true,
                total_duration: 0,
                load_duration: 0,
                prompt_eval_count: 0,
                eval_count: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_ask_returns_exact_response() {
        let backend = RecordingBackend::new("llava", "\nTwo dogs, one ball. ");
        let answer = ask(&backend, "llava", "Describe", "dogs.jpg").await.unwrap();
        assert_eq!(answer, "\nTwo dogs, one ball. ");
    }

    #[tokio::test]
    async fn test_ask_passes_inputs_through() {
        let backend = RecordingBackend::new("llava", "ok");
        ask(&backend, "llava", "  What's here?\n", "../imgs/Page 01.PNG")
            .await
            .unwrap();

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "llava");
        assert_eq!(seen[0].prompt, "  What's here?\n");
        assert_eq!(seen[0].images, vec![PathBuf::from("../imgs/Page 01.PNG")]);
        assert_eq!(seen[0].system, None);
    }

    #[tokio::test]
    async fn test_ask_with_system_prompt() {
        let backend = RecordingBackend::new("llava", "oui");
        let answer = ask_with(&backend, "llava", "Describe", "a.png", Some("Reply in French"))
            .await
            .unwrap();

        assert_eq!(answer, "oui");
        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen[0].system.as_deref(), Some("Reply in French"));
        assert_eq!(seen[0].images, vec![PathBuf::from("a.png")]);
    }

    #[tokio::test]
    async fn test_ask_unknown_model_fails() {
        let backend = RecordingBackend::new("llava", "should not be returned");
        let err = ask(&backend, "bakllava", "Describe", "a.png").await.unwrap_err();
        assert!(matches!(err, Error::Response { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_ask_over_dyn_backend() {
        let backend: Box<dyn Backend> = Box::new(RecordingBackend::new("llava", "a tree"));
        assert_eq!(ask(backend.as_ref(), "llava", "?", "t.png").await.unwrap(), "a tree");
    }

    #[tokio::test]
    async fn test_ask_missing_image_fails_against_ollama_client() {
        let dir = tempfile::tempdir().unwrap();
        let client = OllamaClient::with_host("127.0.0.1:9").unwrap();
        let err = ask(&client, "llava", "Describe", dir.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Image { .. }));
    }
}
