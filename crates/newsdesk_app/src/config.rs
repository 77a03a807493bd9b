use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use newsdesk_core::{
    Category, CountryCode, DispatcherConfig, RefreshPolicy, Selection, SelectionError,
};
use newsdesk_engine::GatewaySettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::logging::LogDestination;

pub const CONFIG_ENV: &str = "NEWSDESK_CONFIG";
pub const API_KEY_ENV: &str = "NEWS_API_KEY";
const DEFAULT_CONFIG_FILE: &str = "newsdesk.ron";
const DEFAULT_LOG_FILE: &str = "newsdesk.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("NEWS_API_KEY is not set")]
    MissingApiKey,
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("invalid base_url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid log_level {0:?}")]
    LogLevel(String),
}

/// Mirrors [`RefreshPolicy`] so the core stays free of serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefreshSetting {
    #[default]
    KeepStale,
    ClearOnBegin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub country: String,
    pub category: String,
    pub quiet_period_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_body_bytes: u64,
    pub refresh_policy: RefreshSetting,
    pub log_destination: LogDestination,
    /// Appended to when `log_destination` includes a file.
    pub log_file: PathBuf,
    pub log_level: String,
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            country: "us".to_string(),
            category: "general".to_string(),
            quiet_period_ms: 500,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 15_000,
            max_body_bytes: 5 * 1024 * 1024,
            refresh_policy: RefreshSetting::KeepStale,
            log_destination: LogDestination::File,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: "info".to_string(),
            tick_ms: 50,
        }
    }
}

impl AppConfig {
    /// Loads `$NEWSDESK_CONFIG`, else `./newsdesk.ron` if present, else defaults.
    ///
    /// Returns the path the settings came from, if any.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV).map(PathBuf::from) {
            return Self::from_path(&path).map(|config| (config, Some(path)));
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            return Self::from_path(&fallback).map(|config| (config, Some(fallback)));
        }
        Ok((Self::default(), None))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn dispatcher_config(&self) -> Result<DispatcherConfig, ConfigError> {
        let country: CountryCode = self.country.parse()?;
        let category: Category = self.category.parse()?;
        Ok(DispatcherConfig {
            selection: Selection::new(country, category),
            quiet_period: Duration::from_millis(self.quiet_period_ms),
            refresh_policy: match self.refresh_policy {
                RefreshSetting::KeepStale => RefreshPolicy::KeepStale,
                RefreshSetting::ClearOnBegin => RefreshPolicy::ClearOnBegin,
            },
        })
    }

    pub fn gateway_settings(&self, api_key: String) -> Result<GatewaySettings, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        let mut settings = GatewaySettings::new(base_url, api_key);
        settings.connect_timeout = Duration::from_millis(self.connect_timeout_ms);
        settings.request_timeout = Duration::from_millis(self.request_timeout_ms);
        settings.max_bytes = self.max_body_bytes;
        Ok(settings)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

pub fn api_key_from_env() -> Result<String, ConfigError> {
    api_key_from(env::var(API_KEY_ENV).ok())
}

fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    value
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "(category: \"sports\", quiet_period_ms: 250, refresh_policy: ClearOnBegin)"
        )
        .unwrap();

        let config = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(config.category, "sports");
        assert_eq!(config.country, "us");
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.log_file, PathBuf::from("newsdesk.log"));

        let dispatcher = config.dispatcher_config().unwrap();
        assert_eq!(dispatcher.selection.category, Category::Sports);
        assert_eq!(dispatcher.quiet_period, Duration::from_millis(250));
        assert_eq!(dispatcher.refresh_policy, RefreshPolicy::ClearOnBegin);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(category: ").unwrap();

        let err = AppConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let config = AppConfig {
            category: "gossip".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.dispatcher_config(),
            Err(ConfigError::Selection(SelectionError::UnknownCategory(_)))
        ));
    }

    #[test]
    fn gateway_settings_carry_timeouts() {
        let config = AppConfig {
            request_timeout_ms: 1_500,
            ..AppConfig::default()
        };
        let settings = config.gateway_settings("k".to_string()).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_millis(1_500));
        assert_eq!(settings.base_url.as_str(), "https://newsapi.org/");

        let broken = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            broken.gateway_settings("k".to_string()),
            Err(ConfigError::BaseUrl { .. })
        ));
    }

    #[test]
    fn api_key_must_be_non_blank() {
        assert!(matches!(api_key_from(None), Err(ConfigError::MissingApiKey)));
        assert!(matches!(
            api_key_from(Some("  ".to_string())),
            Err(ConfigError::MissingApiKey)
        ));
        assert_eq!(api_key_from(Some(" abc ".to_string())).unwrap(), "abc");
    }

    #[test]
    fn log_level_parses() {
        let config = AppConfig {
            log_level: "debug".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn log_file_and_destination_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(log_destination: Both, log_file: \"/var/tmp/news.log\")").unwrap();

        let config = AppConfig::from_path(file.path()).unwrap();
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_file, PathBuf::from("/var/tmp/news.log"));
    }
}
