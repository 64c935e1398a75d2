use crate::constants;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Saved credential. Opaque bearer string; its shape selects the API
    /// dialect at session creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Base root for the legacy (v1) dialect
    #[serde(default = "default_legacy_root")]
    pub legacy_api_root: String,
    /// Base root for the modern (v3) dialect
    #[serde(default = "default_modern_root")]
    pub modern_api_root: String,
    /// Relay passthrough hosts tried after a direct request fails
    #[serde(default = "default_relay_hosts")]
    pub relay_hosts: Vec<String>,
    /// HTTP timeout in seconds for each individual request
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Interval between result polls in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Path to the log file. If not specified, logs go to the default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_legacy_root() -> String {
    constants::api::LEGACY_ROOT.to_string()
}

fn default_modern_root() -> String {
    constants::api::MODERN_ROOT.to_string()
}

fn default_relay_hosts() -> Vec<String> {
    constants::relay::HOSTS.iter().map(|h| h.to_string()).collect()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_poll_interval() -> u64 {
    constants::DEFAULT_POLL_INTERVAL_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            credential: None,
            legacy_api_root: default_legacy_root(),
            modern_api_root: default_modern_root(),
            relay_hosts: default_relay_hosts(),
            http_timeout_seconds: default_http_timeout(),
            poll_interval_seconds: default_poll_interval(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location, falling
    /// back to defaults when no file exists. Environment variables override
    /// config file values.
    ///
    /// # Environment Variables
    /// - `QUIZBOARD_CREDENTIAL` - Override saved credential
    /// - `QUIZBOARD_LEGACY_API_ROOT` / `QUIZBOARD_MODERN_API_ROOT` - Override API roots
    /// - `QUIZBOARD_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `QUIZBOARD_LOG_FILE` - Override log file path
    pub async fn load() -> Result<Self, AppError> {
        Self::load_from_path(&Self::get_config_path()).await
    }

    /// Loads configuration from an explicit path, applying env overrides
    pub async fn load_from_path(config_path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path).await?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(credential) = std::env::var(constants::env_vars::CREDENTIAL) {
            config.credential = Some(credential);
        }
        if let Ok(root) = std::env::var(constants::env_vars::LEGACY_API_ROOT) {
            config.legacy_api_root = root;
        }
        if let Ok(root) = std::env::var(constants::env_vars::MODERN_API_ROOT) {
            config.modern_api_root = root;
        }
        if let Some(timeout) = std::env::var(constants::env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.http_timeout_seconds = timeout;
        }
        if let Ok(log_file_path) = std::env::var(constants::env_vars::LOG_FILE) {
            config.log_file_path = Some(log_file_path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        for root in [&self.legacy_api_root, &self.modern_api_root] {
            if !root.starts_with("http://") && !root.starts_with("https://") {
                return Err(AppError::config_error(format!(
                    "API root must include an http(s):// prefix: {root}"
                )));
            }
        }
        if self.http_timeout_seconds == 0 {
            return Err(AppError::config_error("HTTP timeout must be positive"));
        }
        if self.poll_interval_seconds == 0 {
            return Err(AppError::config_error("Poll interval must be positive"));
        }
        Ok(())
    }

    /// Saves current configuration to the default config file location
    pub async fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&Self::get_config_path()).await
    }

    /// Saves configuration to an explicit path, creating parent directories
    pub async fn save_to_path(&self, config_path: &str) -> Result<(), AppError> {
        let path = Path::new(config_path);
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Returns the platform-specific path for the config file.
    /// Falls back to the current directory if the config dir is unavailable.
    pub fn get_config_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("quizboard")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }

    /// Returns the platform-specific path for the log directory
    pub fn get_log_dir_path() -> String {
        dirs::config_dir()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join("quizboard")
            .join("logs")
            .to_string_lossy()
            .to_string()
    }

    /// Displays current configuration settings to stdout, with the
    /// credential redacted.
    pub async fn display() -> Result<(), AppError> {
        let config = Config::load().await?;
        println!("Config file: {}", Self::get_config_path());
        match &config.credential {
            Some(_) => println!("Credential: (saved, redacted)"),
            None => println!("Credential: (not set)"),
        }
        println!("Legacy API root: {}", config.legacy_api_root);
        println!("Modern API root: {}", config.modern_api_root);
        println!("Relay hosts: {}", config.relay_hosts.join(", "));
        println!("HTTP timeout: {}s", config.http_timeout_seconds);
        println!("Poll interval: {}s", config.poll_interval_seconds);
        match &config.log_file_path {
            Some(path) => println!("Log file: {path}"),
            None => println!("Log file: (default location)"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_timeout_seconds, constants::DEFAULT_HTTP_TIMEOUT_SECONDS);
        assert!(!config.relay_hosts.is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml").to_string_lossy().to_string();

        let config = Config {
            credential: Some("ApiKey-v1 savedtoken".to_string()),
            poll_interval_seconds: 30,
            ..Config::default()
        };
        config.save_to_path(&path).await.unwrap();

        let loaded = Config::load_from_path(&path).await.unwrap();
        assert_eq!(loaded.credential.as_deref(), Some("ApiKey-v1 savedtoken"));
        assert_eq!(loaded.poll_interval_seconds, 30);
        assert_eq!(loaded.legacy_api_root, constants::api::LEGACY_ROOT);
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml").to_string_lossy().to_string();
        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.modern_api_root, constants::api::MODERN_ROOT);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "poll_interval_seconds = 45\n").await.unwrap();
        let config = Config::load_from_path(&path.to_string_lossy()).await.unwrap();
        assert_eq!(config.poll_interval_seconds, 45);
        assert_eq!(config.http_timeout_seconds, constants::DEFAULT_HTTP_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_validate_rejects_bad_roots() {
        let config = Config {
            legacy_api_root: "not-a-url".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            http_timeout_seconds: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
