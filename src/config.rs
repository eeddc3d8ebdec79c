//! Configuration Management
//!
//! Handles persistent configuration storage for product-admin.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::api::DEFAULT_API_URL;

/// Environment variable overriding the configured API URL
pub const API_URL_ENV: &str = "PRODUCT_ADMIN_API_URL";

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend base URL
    #[serde(default)]
    pub api_url: Option<String>,
    /// Request timeout; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("product-admin").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path, falling back to defaults on any problem
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))?;

        Ok(())
    }

    /// Get effective API URL (CLI > env > config > default)
    pub fn effective_api_url(&self, cli: Option<&str>) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty());
        let raw = cli
            .map(str::to_string)
            .or(env)
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        validate_api_url(&raw)
    }

    /// Get effective timeout (CLI > config > none).
    /// Zero never becomes a timeout; it would fail every request at once.
    pub fn effective_timeout(&self, cli: Option<u64>) -> Option<Duration> {
        cli.or(self.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Set API URL and save
    pub fn set_api_url(&mut self, api_url: &str) -> Result<()> {
        self.api_url = Some(validate_api_url(api_url)?);
        self.save()
    }

    /// Set timeout and save
    pub fn set_timeout(&mut self, timeout_secs: Option<u64>) -> Result<()> {
        self.timeout_secs = timeout_secs;
        self.save()
    }
}

/// Check that a base URL is an absolute http(s) URL; returns it without a trailing slash
pub fn validate_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("Invalid API URL: {}", raw))?;

    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("API URL must use http or https: {}", raw);
    }

    Ok(raw.trim_end_matches('/').to_string())
}
