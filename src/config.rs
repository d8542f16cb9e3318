//! Configuration management for mcp-bauplan.
//!
//! Handles loading configuration from TOML files and environment variables,
//! and resolves it into the immutable [`PlatformConfig`] handed to the
//! connection factory.

use crate::error::{BauplanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Branch used when none is configured.
pub const DEFAULT_BRANCH: &str = "main";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "bauplan";

/// Client timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure, as read from the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Platform connection settings.
    #[serde(default)]
    pub bauplan: ConnectionConfig,

    /// Tool surface settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings that shape the MCP tool surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Refuse anything but read-only statements in `run_query`.
    #[serde(default = "default_read_only")]
    pub read_only: bool,
}

fn default_read_only() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            read_only: default_read_only(),
        }
    }
}

/// Platform connection configuration before defaults are applied.
///
/// Every field is optional so that the config file, the environment and the
/// command line can each fill in part of it.
#[derive(Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConnectionConfig {
    /// API key used to authenticate against the platform.
    pub api_key: Option<String>,

    /// Branch queries are scoped to.
    pub branch: Option<String>,

    /// Namespace tables are looked up in.
    pub namespace: Option<String>,

    /// Client timeout in seconds.
    pub timeout: Option<u64>,

    /// Query gateway base URL.
    pub endpoint: Option<String>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("branch", &self.branch)
            .field("namespace", &self.namespace)
            .field("timeout", &self.timeout)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ConnectionConfig {
    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &ConnectionConfig) {
        if other.api_key.is_some() {
            self.api_key = other.api_key.clone();
        }
        if other.branch.is_some() {
            self.branch = other.branch.clone();
        }
        if other.namespace.is_some() {
            self.namespace = other.namespace.clone();
        }
        if other.timeout.is_some() {
            self.timeout = other.timeout;
        }
        if other.endpoint.is_some() {
            self.endpoint = other.endpoint.clone();
        }
    }

    /// Applies environment variables (BAUPLAN_API_KEY, BAUPLAN_BRANCH, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        self.apply_defaults_from(|key| std::env::var(key).ok());
    }

    /// Fills unset fields from the given variable lookup.
    pub fn apply_defaults_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("BAUPLAN_API_KEY");
        }
        if self.branch.is_none() {
            self.branch = lookup("BAUPLAN_BRANCH");
        }
        if self.namespace.is_none() {
            self.namespace = lookup("BAUPLAN_NAMESPACE");
        }
        if self.timeout.is_none() {
            if let Some(raw) = lookup("BAUPLAN_TIMEOUT") {
                match raw.trim().parse() {
                    Ok(secs) => self.timeout = Some(secs),
                    Err(_) => warn!("Ignoring invalid BAUPLAN_TIMEOUT value: {raw:?}"),
                }
            }
        }
        if self.endpoint.is_none() {
            self.endpoint = lookup("BAUPLAN_ENDPOINT");
        }
    }

    /// Returns a display-safe string (no API key) for log output.
    pub fn display_string(&self) -> String {
        let branch = self.branch.as_deref().unwrap_or(DEFAULT_BRANCH);
        let namespace = self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
        format!("{branch}/{namespace}")
    }

    /// Applies defaults and validates the config.
    ///
    /// The API key is only mandatory when `require_api_key` is set; the mock
    /// platform runs without one.
    pub fn resolve(&self, require_api_key: bool) -> Result<PlatformConfig> {
        let api_key = non_empty(self.api_key.as_deref()).unwrap_or_default();
        if require_api_key && api_key.is_empty() {
            return Err(BauplanError::config(
                "No API key configured. Set BAUPLAN_API_KEY or api_key in [bauplan]",
            ));
        }

        let timeout_secs = self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(BauplanError::config("timeout must be at least 1 second"));
        }

        let endpoint = match non_empty(self.endpoint.as_deref()) {
            Some(raw) => Some(parse_endpoint(&raw)?),
            None => None,
        };

        Ok(PlatformConfig {
            api_key,
            branch: non_empty(self.branch.as_deref()).unwrap_or_else(|| DEFAULT_BRANCH.into()),
            namespace: non_empty(self.namespace.as_deref())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.into()),
            timeout: Duration::from_secs(timeout_secs),
            endpoint,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| BauplanError::config(format!("Invalid endpoint '{raw}': {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(BauplanError::config(format!(
            "Invalid endpoint scheme '{}'. Expected 'http' or 'https'",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Resolved, immutable platform configuration.
///
/// Built once at startup and shared read-only between tool calls.
#[derive(Clone, PartialEq)]
pub struct PlatformConfig {
    /// API key used to authenticate against the platform.
    pub api_key: String,
    /// Branch queries are scoped to.
    pub branch: String,
    /// Namespace tables are looked up in.
    pub namespace: String,
    /// Client timeout.
    pub timeout: Duration,
    /// Query gateway base URL, required by the HTTP client only.
    pub endpoint: Option<Url>,
}

impl PlatformConfig {
    /// Creates a config with the given API key and default branch, namespace and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            branch: DEFAULT_BRANCH.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoint: None,
        }
    }

    /// Sets the branch.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the client timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the gateway endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("api_key", &"<redacted>")
            .field("branch", &self.branch)
            .field("namespace", &self.namespace)
            .field("timeout", &self.timeout)
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .finish()
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mcp-bauplan")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BauplanError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BauplanError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
