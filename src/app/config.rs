//! Application configuration loader.
//!
//! Loads optional settings from a `promptcoder.json` file in the working
//! directory, falling back to built-in defaults when the file is missing or
//! invalid. The file carries the generation-backend and identity-provider
//! endpoints plus the preview debounce interval.
//!
//! # promptcoder.json Format
//!
//! ```json
//! {
//!   "backend_url": "http://127.0.0.1:8787/api/",
//!   "api_key": null,
//!   "auth_url": "http://127.0.0.1:8787/auth/",
//!   "debounce_ms": 500
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8787/api/";
const DEFAULT_AUTH_URL: &str = "http://127.0.0.1:8787/auth/";
const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the generation backend; `generate` and `suggest` are
    /// resolved relative to it.
    pub backend_url: String,

    /// Optional bearer token for the generation backend.
    pub api_key: Option<String>,

    /// Base URL of the identity provider's session endpoints.
    pub auth_url: String,

    /// Preview debounce quiet period in milliseconds.
    pub debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            api_key: None,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl AppConfig {
    /// Load configuration from `promptcoder.json` in the current directory,
    /// or defaults when absent.
    pub fn load() -> Self {
        Self::load_from_path("promptcoder.json")
    }

    /// Load configuration from a specific path. Missing or unparsable files
    /// fall back to defaults rather than failing startup.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No promptcoder.json found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    debug!(
                        "Loaded config: backend={}, auth={}, debounce={}ms",
                        config.backend_url, config.auth_url, config.debounce_ms
                    );
                    config
                }
                Err(e) => {
                    warn!("Failed to parse promptcoder.json: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read promptcoder.json: {}", e);
                Self::default()
            }
        }
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn backend_base(&self) -> anyhow::Result<url::Url> {
        Ok(url::Url::parse(&self.backend_url)?)
    }

    pub fn generate_endpoint(&self) -> anyhow::Result<url::Url> {
        Ok(self.backend_base()?.join("generate")?)
    }

    pub fn suggest_endpoint(&self) -> anyhow::Result<url::Url> {
        Ok(self.backend_base()?.join("suggest")?)
    }

    pub fn auth_base(&self) -> anyhow::Result<url::Url> {
        Ok(url::Url::parse(&self.auth_url)?)
    }
}
