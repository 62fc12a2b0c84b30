use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple configuration for patchwash
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// File-name pattern of the files to sanitize
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Ignore repeated notifications for a path within this window (ms)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Pause before the first read of a changed file (ms)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Read-redact-write attempts per notification
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause between attempts (ms)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            debounce_ms: default_debounce_ms(),
            settle_ms: default_settle_ms(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_pattern() -> String {
    "*.patch".to_string()
}

fn default_debounce_ms() -> u64 {
    1000
}

fn default_settle_ms() -> u64 {
    500
}

fn default_max_attempts() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "patchwash", "patchwash") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.patchwash/config.toml")
        }
    }
}
