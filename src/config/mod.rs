use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Prefix that repository URLs live under; stripped to get `owner/name`
    #[serde(default = "default_web_url")]
    pub web_url: String,
    /// User-Agent header sent with every API request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com/".to_string()
}

fn default_user_agent() -> String {
    format!("tokenclone/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    /// Username paired with the installation token. GitHub ignores it but it must be non-empty.
    #[serde(default = "default_git_username")]
    pub username: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            username: default_git_username(),
        }
    }
}

fn default_git_username() -> String {
    "x-access-token".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
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

/// Where the configuration came from, reported once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => {
                info!("Loaded configuration from {}", path.display())
            }
            ConfigSource::Missing(path) => {
                info!("No config file found at {}, using defaults", path.display())
            }
            ConfigSource::Defaults => {}
        }
    }
}

impl Config {
    /// Load configuration from `path`, or fall back to defaults when no path is given
    /// or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;
                Ok((
                    Self::from_toml(&content)?,
                    ConfigSource::File(path.to_path_buf()),
                ))
            }
            Some(path) => Ok((
                Config::default(),
                ConfigSource::Missing(path.to_path_buf()),
            )),
            None => Ok((Config::default(), ConfigSource::Defaults)),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse configuration file")
    }
}
