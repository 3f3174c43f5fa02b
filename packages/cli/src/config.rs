use pagecraft_sync::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the site API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Quiet period before an edited draft is saved
    #[serde(default = "default_autosave_debounce_ms")]
    pub autosave_debounce_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum undo snapshots (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,
}

fn default_api_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_autosave_debounce_ms() -> u64 {
    2000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            autosave_debounce: Duration::from_millis(self.autosave_debounce_ms),
            history_limit: self.history_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            autosave_debounce_ms: default_autosave_debounce_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            history_limit: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "apiBaseUrl": "https://sites.example.com/api",
            "autosaveDebounceMs": 500,
            "historyLimit": 50
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_base_url, "https://sites.example.com/api");
        assert_eq!(config.autosave_debounce_ms, 500);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.history_limit, 50);

        let options = config.session_options();
        assert_eq!(options.autosave_debounce, Duration::from_millis(500));
        assert_eq!(options.history_limit, 50);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
        assert_eq!(config.autosave_debounce_ms, 2000);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("pagecraft-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config.api_base_url, default_api_base_url());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
