use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable holding the Slack bot token.
pub const SLACK_TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bot: BotConfig,
    pub catalog: CatalogConfig,
    pub slack: SlackConfig,
    pub logging: LoggingConfig,
}

/// Message loop timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Delay between two polls of the chat transport, in milliseconds.
    pub poll_interval_ms: u64,
    /// Fixed wait before reconnecting after a transport failure.
    pub reconnect_backoff_secs: u64,
    /// Upper bound for every outbound HTTP request.
    pub request_timeout_secs: u64,
}

/// Remote card database endpoints and the local fallback directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub five_rings_url: String,
    pub destiny_url: String,
    /// Base URL of the rulings API; `/cards/{id}/rulings` is appended.
    pub rulings_base_url: String,
    /// Override the directory holding the fallback catalog copies.
    pub cache_dir: Option<PathBuf>,
}

/// Slack Web API settings. The token itself comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackConfig {
    pub api_base_url: String,
    /// Channel ids polled for trigger messages.
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            reconnect_backoff_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            five_rings_url: "https://api.fiveringsdb.com/cards".to_string(),
            destiny_url: "https://swdestinydb.com/api/public/cards".to_string(),
            rulings_base_url: "https://api.fiveringsdb.com".to_string(),
            cache_dir: None,
        }
    }
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://slack.com/api".to_string(),
            channels: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl BotConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn reconnect_backoff(&self) -> Duration {
        Duration::from_secs(self.reconnect_backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/lcgbot/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved directory for the fallback catalog copies.
    pub fn cache_dir(&self) -> PathBuf {
        self.catalog
            .cache_dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("cache"))
    }

    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .log_dir
            .clone()
            .unwrap_or_else(|| Self::data_dir().join("logs"))
    }

    /// Slack bot token from the environment, if set and non-empty.
    pub fn slack_token() -> Option<String> {
        std::env::var(SLACK_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|d| d.join("lcgbot"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("lcgbot").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
