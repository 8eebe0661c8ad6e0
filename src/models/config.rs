// src/models/config.rs

//! Application configuration structures.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable overriding the configured API base URL.
pub const API_URL_ENV: &str = "ACERVO_API_URL";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Client-side upload limits
    #[serde(default)]
    pub upload: UploadConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if Url::parse(&self.api.resolve_base_url()).is_err() {
            return Err(AppError::validation("api.base_url is not a valid URL"));
        }
        if self.upload.max_file_size_bytes == 0 {
            return Err(AppError::validation(
                "upload.max_file_size_bytes must be > 0",
            ));
        }
        if self.upload.allowed_types.is_empty() {
            return Err(AppError::validation("upload.allowed_types is empty"));
        }
        Ok(())
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend, including the version prefix
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// Effective base URL: the environment override wins over the file value.
    pub fn resolve_base_url(&self) -> String {
        env::var(API_URL_ENV).unwrap_or_else(|_| self.base_url.clone())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Client-side upload limits, checked before any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted file size in bytes
    #[serde(default = "defaults::max_file_size")]
    pub max_file_size_bytes: u64,

    /// MIME type allow-list
    #[serde(default = "defaults::allowed_types")]
    pub allowed_types: Vec<String>,
}

impl UploadConfig {
    /// Check a MIME type against the allow-list.
    pub fn is_allowed_type(&self, mime: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: defaults::max_file_size(),
            allowed_types: defaults::allowed_types(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_url() -> String {
        "http://localhost:4000/v1".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "acervo/0.1".into()
    }

    // Upload defaults
    pub fn max_file_size() -> u64 {
        50 * 1024 * 1024
    }
    pub fn allowed_types() -> Vec<String> {
        vec![
            "application/pdf".into(),
            "application/msword".into(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".into(),
            "image/jpeg".into(),
            "image/png".into(),
            "image/gif".into(),
            "video/mp4".into(),
            "video/avi".into(),
            "video/quicktime".into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_upload_limit() {
        let mut config = Config::default();
        config.upload.max_file_size_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_allow_list_accepts_pdf_only_once() {
        let config = UploadConfig::default();
        assert!(config.is_allowed_type("application/pdf"));
        assert!(!config.is_allowed_type("application/zip"));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.com/v1"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(!config.upload.allowed_types.is_empty());
    }
}
