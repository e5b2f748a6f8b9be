//! Configuration loading
//!
//! Settings resolve in this order (highest first):
//! 1. Command-line argument
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! Tiers 1 and 2 are merged by each binary's `clap` definition; this module
//! covers the TOML file and the defaults.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Directory (under the platform config dir) holding AudiSense TOML files
pub const CONFIG_DIR_NAME: &str = "audisense";

pub const SERVER_CONFIG_FILE: &str = "audisense-api.toml";
pub const CLIENT_CONFIG_FILE: &str = "audisense-client.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 51704;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

// ========================================
// Shared sections
// ========================================

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ========================================
// Server
// ========================================

/// Server bootstrap configuration (`audisense-api.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Insert the two sample records on startup
    pub seed_sample_data: bool,
    pub logging: LoggingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_sample_data: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ========================================
// Client
// ========================================

/// API connection settings used by the client gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    /// Whole-call timeout for every request
    pub timeout_seconds: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:{}", DEFAULT_PORT),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ApiSettings {
    /// Base URL without trailing `/` and without a trailing `/api` segment
    ///
    /// Resource paths already start with `/api`.
    pub fn normalized_base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.normalized_base_url();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::Config(
                "API timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Client bootstrap configuration (`audisense-client.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub logging: LoggingConfig,
}

// ========================================
// Loading
// ========================================

/// Platform default location of an AudiSense config file
///
/// `~/.config/audisense/<file>` on Linux, the platform equivalent elsewhere.
pub fn default_config_path(file_name: &str) -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(file_name))
}

/// Pick the config file: explicit path (CLI or ENV) first, else the default
pub fn resolve_config_path(explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| default_config_path(file_name))
}

/// Load a TOML config file
///
/// A missing file yields the defaults. A file that exists but cannot be read
/// or parsed is an error.
pub fn load_toml_config<T>(path: Option<&Path>) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            info!("Config file {} not found, using defaults", p.display());
            return Ok(T::default());
        }
        None => {
            info!("No config directory available, using defaults");
            return Ok(T::default());
        }
    };

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}
