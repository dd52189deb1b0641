//! Configuration: backend host resolution and the optional TOML config file

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 11434;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_host")]
    pub host: String,
}

fn default_ollama_host() -> String {
    format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}")
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load an explicit config file, or the per-user one if it exists.
    ///
    /// A missing explicit file is an error; a missing per-user file is not. The
    /// per-user file only supplies the host, so it is not read at all when
    /// `host_override` is set.
    pub fn load(explicit: Option<&Path>, host_override: Option<&str>) -> Result<Self> {
        Self::load_from(explicit, default_path(), host_override)
    }

    fn load_from(
        explicit: Option<&Path>,
        per_user: Option<PathBuf>,
        host_override: Option<&str>,
    ) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        if host_override.is_some() {
            return Ok(Self::default());
        }

        match per_user {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Pick the backend URL: an override (CLI flag or `OLLAMA_HOST`) wins over the file
    pub fn resolve_host(&self, host_override: Option<&str>) -> Result<String> {
        parse_host(host_override.unwrap_or(&self.ollama.host))
    }
}

/// `$XDG_CONFIG_HOME/ask-vision/config.toml` or the platform equivalent
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ask-vision").join("config.toml"))
}

/// Normalize a host string into `scheme://host:port[/path]`.
///
/// Accepts bare hosts (`gpu-box`), host and port (`gpu-box:8080`), full URLs and
/// bracketed IPv6 addresses. Missing pieces fall back to `http`, `127.0.0.1` and
/// 11434, except that an explicit `http://` or `https://` implies port 80 or 443.
pub fn parse_host(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let (scheme, hostport, default_port) = match raw.split_once("://") {
        Some(("http", rest)) => ("http", rest, 80),
        Some(("https", rest)) => ("https", rest, 443),
        Some((scheme, rest)) => (scheme, rest, DEFAULT_PORT),
        None => ("http", raw, DEFAULT_PORT),
    };

    let hostport = if hostport.is_empty() || hostport.starts_with([':', '/']) {
        format!("{DEFAULT_HOST}{hostport}")
    } else {
        hostport.to_string()
    };

    // A non-special scheme keeps explicit default ports (":80") visible to `port()`
    let url = reqwest::Url::parse(&format!("ollama://{hostport}"))
        .map_err(|e| Error::Config(format!("invalid host '{raw}': {e}")))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .unwrap_or(DEFAULT_HOST);
    let port = url.port().unwrap_or(default_port);
    let path = url.path().trim_matches('/');

    if path.is_empty() {
        Ok(format!("{scheme}://{host}:{port}"))
    } else {
        Ok(format!("{scheme}://{host}:{port}/{path}"))
    }
}
