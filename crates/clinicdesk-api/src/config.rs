//! # Client Configuration
//!
//! Configuration for the API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit value (highest priority)                                  │
//! │     ApiConfig::new("https://clinic.example.com/api")                   │
//! │                                                                         │
//! │  2. Environment Variable                                               │
//! │     CLINICDESK_API_URL=https://clinic.example.com/api                  │
//! │                                                                         │
//! │  3. Default Value (lowest priority)                                    │
//! │     http://localhost:8000/api (local backend)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Environment variable consulted when no base URL is given explicitly.
pub const API_URL_ENV: &str = "CLINICDESK_API_URL";

/// Default base URL for a locally running backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration for [`crate::client::ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the clinic backend; endpoint paths are joined onto it.
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
        }
    }

    /// Creates a config from an optional value, the environment, or the
    /// default, in that order.
    pub fn from_env_or(base_url: Option<String>) -> Self {
        ApiConfig {
            base_url: base_url
                .or_else(|| std::env::var(API_URL_ENV).ok())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Parses and validates the base URL.
    ///
    /// A trailing slash is appended when missing so that `Url::join` treats
    /// the last path segment as a directory rather than replacing it.
    pub fn parsed_base_url(&self) -> ApiResult<Url> {
        let normalized = if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        };

        let url = Url::parse(&normalized)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ApiError::Config(format!(
                "Base URL must be http or https, got: {other}"
            ))),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig::from_env_or(None)
    }
}
