//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `metricboard.toml` in the working directory unless another path
//! is given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use metricboard_app::config::{ClientConfig, DEFAULT_API_BASE_URL};
use metricboard_domain::format::Locale;
use metricboard_domain::metrics::DEFAULT_PAGE_SIZE;
use metricboard_domain::session::TOKEN_STORAGE_KEY;
use serde::Deserialize;

/// Config file read when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "metricboard.toml";

/// Largest page size accepted.
const MAX_PAGE_SIZE: u32 = 1000;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Number formatting.
    pub display: DisplayConfig,
    /// Session token storage.
    pub session: SessionConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Backend connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend origin, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Records per page.
    pub page_size: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Display settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `pt-BR` or `en-US`.
    pub locale: Locale,
}

/// Session token storage settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Token file; defaults to `<data dir>/metricboard/access_token`.
    pub token_path: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `metricboard.toml`, if present)
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting values are invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_required_file(path)?,
            None => Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn from_required_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(ConfigError::Parse)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F: Fn(&str) -> Option<String>>(&mut self, var: F) {
        if let Some(val) = var("METRICBOARD_API_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = var("METRICBOARD_PAGE_SIZE") {
            if let Ok(size) = val.parse() {
                self.api.page_size = size;
            }
        }
        if let Some(val) = var("METRICBOARD_LOCALE") {
            if let Ok(locale) = val.parse() {
                self.display.locale = locale;
            }
        }
        if let Some(val) = var("METRICBOARD_TOKEN_PATH") {
            self.session.token_path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("METRICBOARD_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "api base_url must start with http:// or https://, got `{url}`"
            )));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.api.page_size) {
            return Err(ConfigError::Validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings handed to the API client and dashboard controller.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base_url: self.api.base_url.trim().to_string(),
            page_size: self.api.page_size,
            locale: self.display.locale,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Where the session token is kept.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.session.token_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("metricboard")
                .join(TOKEN_STORAGE_KEY)
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "metricboard=info,metricboard_app=warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
