//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::feed::DEFAULT_INTERVAL_MS;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub fixtures: FixturesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Feed synchronizer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Milliseconds between synthetic posts
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Start the synchronizer together with the server
    #[serde(default = "default_autostart")]
    pub autostart: bool,

    /// Fixed RNG seed for reproducible synthetic posts
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

fn default_autostart() -> bool {
    true
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            autostart: default_autostart(),
            seed: None,
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where the startup dataset comes from
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixturesConfig {
    /// JSON fixture file; the built-in seed data is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` wins over the configured level when set.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("mooners={},tower_http=info", self.level).into()
        });

        let registry = tracing_subscriber::registry().with(filter);

        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("mooners").join("config.toml")),
            Some(PathBuf::from("/etc/mooners/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        let config = Self::from_env();
        if let Err(e) = config.validate() {
            tracing::warn!("{}, falling back to default feed interval", e);
            return Self {
                feed: FeedConfig::default(),
                ..config
            };
        }
        config
    }

    /// Reject settings the feed cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feed.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "feed.interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Feed overrides
        if let Ok(interval) = std::env::var("MOONERS_FEED_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.feed.interval_ms = ms;
            }
        }
        if let Ok(seed) = std::env::var("MOONERS_FEED_SEED") {
            if let Ok(s) = seed.parse() {
                self.feed.seed = Some(s);
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("MOONERS_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("MOONERS_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(path) = std::env::var("MOONERS_FIXTURES") {
            self.fixtures.path = Some(PathBuf::from(path));
        }

        // Logging overrides
        if let Ok(level) = std::env::var("MOONERS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("MOONERS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Mooners Dashboard Configuration
#
# Environment variables override these settings:
# - MOONERS_FEED_INTERVAL_MS
# - MOONERS_FEED_SEED
# - MOONERS_API_HOST
# - MOONERS_API_PORT
# - MOONERS_FIXTURES
# - MOONERS_LOG_LEVEL
# - MOONERS_LOG_FORMAT

[feed]
# Milliseconds between synthetic posts
interval_ms = 15000

# Start the feed synchronizer with the server
autostart = true

# Fixed seed for reproducible synthetic posts
# seed = 42

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8086

[fixtures]
# JSON file with posts, digest, leaderboard, events, profile and analytics.
# The built-in seed data is used when unset.
# path = "./fixtures.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.feed.interval_ms, 15_000);
        assert_eq!(config.feed.interval(), Duration::from_secs(15));
        assert!(config.feed.autostart);
        assert_eq!(config.api.addr(), "0.0.0.0:8086");
        assert!(config.fixtures.path.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.feed.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(config.api.port, 8086);
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\ninterval_ms = 500\nseed = 7\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.feed.interval_ms, 500);
        assert_eq!(config.feed.seed, Some(7));
        assert_eq!(config.api.port, 8086);
    }

    #[test]
    fn test_load_rejects_zero_interval() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\ninterval_ms = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    // The only test that touches MOONERS_* variables; the rest read files
    #[test]
    fn test_env_overrides_applied_before_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[feed]\ninterval_ms = 0\n\n[api]\nport = 9000\n").unwrap();

        std::env::set_var("MOONERS_FEED_INTERVAL_MS", "250");
        std::env::set_var("MOONERS_API_PORT", "9100");
        let config = Config::load_with_env(&path);
        std::env::remove_var("MOONERS_FEED_INTERVAL_MS");
        std::env::remove_var("MOONERS_API_PORT");

        let config = config.unwrap();
        assert_eq!(config.feed.interval_ms, 250);
        assert_eq!(config.api.port, 9100);

        // Without the override the file's zero interval is still rejected
        assert!(matches!(
            Config::load_with_env(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let missing = Config::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[feed\ninterval_ms = ").unwrap();
        let bad = Config::load(&path).unwrap_err();
        assert!(matches!(bad, ConfigError::Parse { .. }));
    }
}
