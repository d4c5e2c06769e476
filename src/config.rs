//! Configuration management for Flashgate
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{FlashgateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the Gemini credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure for Flashgate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Gateway client settings (chat and generate commands)
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for non-API paths, skipped when it does not exist
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_cors")]
    pub cors: bool,

    /// Maximum accepted request body size in bytes (file uploads)
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_cors() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            cors: default_cors(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Gemini provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// API key; usually supplied through `GEMINI_API_KEY`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Optional HTTP timeout for provider calls, unlimited when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key: None,
            timeout_seconds: None,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Gateway client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of a running gateway
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FlashgateError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| FlashgateError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if !api_key.is_empty() {
                self.provider.api_key = Some(api_key);
            }
        }

        if let Ok(model) = std::env::var("FLASHGATE_MODEL") {
            self.provider.model = model;
        }

        if let Ok(api_base) = std::env::var("FLASHGATE_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(timeout) = std::env::var("FLASHGATE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.provider.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid FLASHGATE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(host) = std::env::var("FLASHGATE_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("FLASHGATE_PORT") {
            if let Ok(value) = port.parse() {
                self.server.port = value;
            } else {
                tracing::warn!("Invalid FLASHGATE_PORT: {}", port);
            }
        }

        if let Ok(static_dir) = std::env::var("FLASHGATE_STATIC_DIR") {
            self.server.static_dir = static_dir;
        }

        if let Ok(url) = std::env::var("FLASHGATE_URL") {
            self.client.base_url = url;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        use crate::cli::Commands;

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        match &cli.command {
            Commands::Serve { host, port } => {
                if let Some(host) = host {
                    self.server.host = host.clone();
                }
                if let Some(port) = port {
                    self.server.port = *port;
                }
            }
            Commands::Chat { url, .. } | Commands::Generate { url, .. } => {
                if let Some(url) = url {
                    self.client.base_url = url.clone();
                }
            }
            Commands::Render { .. } => {}
        }
    }

    /// Validate the configuration
    ///
    /// The API key is not checked here; only `serve` needs it and
    /// [`Config::validate_for_serving`] covers that.
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.model.trim().is_empty() {
            return Err(FlashgateError::Config("provider.model cannot be empty".to_string()).into());
        }

        if self.provider.api_base.trim().is_empty() {
            return Err(
                FlashgateError::Config("provider.api_base cannot be empty".to_string()).into(),
            );
        }

        if self.provider.timeout_seconds == Some(0) {
            return Err(FlashgateError::Config(
                "provider.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(FlashgateError::Config("server.port must be greater than 0".to_string()).into());
        }

        if self.server.max_upload_bytes == 0 {
            return Err(FlashgateError::Config(
                "server.max_upload_bytes must be greater than 0".to_string(),
            )
            .into());
        }

        if self.client.base_url.trim().is_empty() {
            return Err(FlashgateError::Config("client.base_url cannot be empty".to_string()).into());
        }

        Ok(())
    }

    /// Validate the settings needed to run the gateway
    ///
    /// # Errors
    ///
    /// Returns error if general validation fails or no API key is available
    pub fn validate_for_serving(&self) -> Result<()> {
        self.validate()?;

        let has_key = self
            .provider
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(FlashgateError::Config(format!(
                "{} must be set to run the gateway",
                API_KEY_ENV
            ))
            .into());
        }

        Ok(())
    }
}
