use crate::error::{PriceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_SEARCH: &str = "milk";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides `base_url` at startup.
pub const BASE_URL_ENV: &str = "PRICECMP_BASE_URL";

/// Configuration for pricecmp, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceConfig {
    /// Backend root, e.g. "http://localhost:5000"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Search term used for the first fetch
    #[serde(default = "default_search")]
    pub default_search: String,

    /// Send the ngrok / dev-tunnel bypass headers
    #[serde(default = "default_tunnel_headers")]
    pub tunnel_headers: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_search() -> String {
    DEFAULT_SEARCH.to_string()
}

fn default_tunnel_headers() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_search: default_search(),
            tunnel_headers: default_tunnel_headers(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl PriceConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: PriceConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies the base URL override from the process environment, if any.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Applies an optional base URL override (env var or CLI flag).
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Result<Self> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.set_base_url(&url)?;
        }
        Ok(self)
    }

    /// Set the base URL (must be absolute http/https; trailing slashes dropped)
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed).map_err(|e| PriceError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(PriceError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        self.base_url = trimmed.to_string();
        Ok(())
    }

    /// Set a key by its user-facing name (`base-url`, `default-search`, ...)
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" => self.set_base_url(value),
            "default-search" => {
                self.default_search = value.to_string();
                Ok(())
            }
            "tunnel-headers" => {
                self.tunnel_headers = parse_bool(value)?;
                Ok(())
            }
            "timeout-secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| PriceError::Config(format!("Invalid timeout: {}", value)))?;
                if secs == 0 {
                    return Err(PriceError::Config(
                        "timeout-secs must be at least 1".to_string(),
                    ));
                }
                self.timeout_secs = secs;
                Ok(())
            }
            other => Err(PriceError::Config(format!("Unknown config key: {}", other))),
        }
    }

    /// Get a key by its user-facing name
    pub fn get_key(&self, key: &str) -> Option<String> {
        match key {
            "base-url" => Some(self.base_url.clone()),
            "default-search" => Some(self.default_search.clone()),
            "tunnel-headers" => Some(self.tunnel_headers.to_string()),
            "timeout-secs" => Some(self.timeout_secs.to_string()),
            _ => None,
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["base-url", "default-search", "tunnel-headers", "timeout-secs"]
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(PriceError::Config(format!("Expected true/false, got: {}", value))),
    }
}
