//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the API under test
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Login credentials used by the authenticate step
    #[serde(default)]
    pub credentials: Credentials,

    /// Request payloads used by the user steps
    #[serde(default)]
    pub fixtures: Fixtures,

    /// Assertion thresholds
    #[serde(default)]
    pub thresholds: Thresholds,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Run policy
    #[serde(default)]
    pub run: RunConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            credentials: Credentials::default(),
            fixtures: Fixtures::default(),
            thresholds: Thresholds::default(),
            http: HttpConfig::default(),
            run: RunConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.example.com".to_string()
}

/// Credentials for `POST /auth/login`
#[derive(Debug, Deserialize, Clone)]
pub struct Credentials {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

fn default_username() -> String {
    "testuser".to_string()
}
fn default_password() -> String {
    "password123".to_string()
}

/// Payload values for the create, update and validation steps
#[derive(Debug, Deserialize, Clone)]
pub struct Fixtures {
    #[serde(default = "default_new_user_name")]
    pub new_user_name: String,

    #[serde(default = "default_new_user_email")]
    pub new_user_email: String,

    #[serde(default = "default_new_user_role")]
    pub new_user_role: String,

    /// Name sent by the update step
    #[serde(default = "default_updated_name")]
    pub updated_name: String,

    /// Email the validation step expects the API to reject
    #[serde(default = "default_invalid_email")]
    pub invalid_email: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            new_user_name: default_new_user_name(),
            new_user_email: default_new_user_email(),
            new_user_role: default_new_user_role(),
            updated_name: default_updated_name(),
            invalid_email: default_invalid_email(),
        }
    }
}

fn default_new_user_name() -> String {
    "New User".to_string()
}
fn default_new_user_email() -> String {
    "new.user@example.com".to_string()
}
fn default_new_user_role() -> String {
    "user".to_string()
}
fn default_updated_name() -> String {
    "Updated Name".to_string()
}
fn default_invalid_email() -> String {
    "invalid-email".to_string()
}

/// Assertion thresholds
#[derive(Debug, Deserialize, Clone)]
pub struct Thresholds {
    /// Upper bound (exclusive) for the performance check round trip
    #[serde(default = "default_max_latency")]
    pub max_latency_ms: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_latency_ms: default_max_latency(),
        }
    }
}

fn default_max_latency() -> u64 {
    1000
}

/// HTTP client settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    /// Whole-request timeout; unset means wait indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Run policy
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RunConfig {
    /// Skip the remaining steps after the first failure
    #[serde(default)]
    pub fail_fast: bool,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Replace the base URL, e.g. from a command-line override
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }
}
