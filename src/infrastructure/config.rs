//! Configuration management for the generator
//!
//! Loads configuration from config.toml at startup.
//! Every path, threshold and output target is configurable.

use crate::core::filter::{CURATED_SYMBOL, DEFAULT_MIN_VOLUME, DEFAULT_SEPARATOR};
use crate::core::{Asset, RESERVED_BASE_IDS};
use crate::render::Template;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Generator configuration
///
/// Loaded from config.toml at startup. Missing sections fall back to the
/// defaults the tool has always used.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Ticker feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Serious-coin filter settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// Identifier mapping settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Artifacts to render, in order
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

/// Ticker feed configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Ticker endpoint
    #[serde(default = "default_feed_url")]
    pub url: Url,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Read the feed from a local JSON file instead of the network
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Filter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// A coin must trade strictly more than this in 24h (USD)
    #[serde(default = "default_min_volume")]
    pub min_volume_24h: Decimal,

    /// Separator the feed uses for clashing symbols
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Coins appended after filtering regardless of the feed
    #[serde(default = "default_curated")]
    pub curated: Vec<CuratedAsset>,
}

/// A hand-curated coin
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CuratedAsset {
    pub symbol: String,
    pub name: String,
}

/// Identifier mapping configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Persisted symbol → identifier mapping
    #[serde(default = "default_mapping_path")]
    pub mapping_path: PathBuf,

    /// Identifiers below this value belong to base currencies
    #[serde(default = "default_reserved_ids")]
    pub reserved_ids: u32,

    /// Keep mapping entries for symbols missing from this run
    #[serde(default = "default_retain_dropped")]
    pub retain_dropped: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: PathBuf,

    /// Write log files in addition to the console
    #[serde(default = "default_log_files")]
    pub files: bool,
}

/// One rendered artifact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetConfig {
    pub template: Template,
    pub destination: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            filter: FilterConfig::default(),
            registry: RegistryConfig::default(),
            logging: LoggingConfig::default(),
            targets: default_targets(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
            file: None,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_volume_24h: default_min_volume(),
            separator: default_separator(),
            curated: default_curated(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            mapping_path: default_mapping_path(),
            reserved_ids: default_reserved_ids(),
            retain_dropped: default_retain_dropped(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            files: default_log_files(),
        }
    }
}

impl FilterConfig {
    /// Curated coins as assets
    pub fn curated_assets(&self) -> Vec<Asset> {
        self.curated
            .iter()
            .map(|c| Asset::new(c.symbol.clone(), c.name.clone()))
            .collect()
    }
}

/// Ticker endpoint used when none is configured
pub const DEFAULT_FEED_URL: &str = "https://api.coinmarketcap.com/v1/ticker/?limit=10000";

fn default_feed_url() -> Url {
    Url::parse(DEFAULT_FEED_URL).expect("DEFAULT_FEED_URL is a valid URL")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_volume() -> Decimal {
    Decimal::from(DEFAULT_MIN_VOLUME)
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_curated() -> Vec<CuratedAsset> {
    vec![CuratedAsset {
        symbol: CURATED_SYMBOL.to_string(),
        name: "Cryptopia coin".to_string(),
    }]
}

fn default_mapping_path() -> PathBuf {
    PathBuf::from("tools/update-coins/coins.json")
}

fn default_reserved_ids() -> u32 {
    RESERVED_BASE_IDS // EUR, USD, BTC
}

fn default_retain_dropped() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_files() -> bool {
    true
}

fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig {
            template: Template::Rust,
            destination: PathBuf::from("market/src/symbols.rs"),
        },
        TargetConfig {
            template: Template::TypeScript,
            destination: PathBuf::from("market-ts/src/symbols.ts"),
        },
    ]
}

impl Config {
    /// Load configuration from config.toml file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// # Errors
    /// Returns error if file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File not found - use defaults
                Ok(Config::default())
            }
            Err(e) => Err(ConfigError::IoError(e)),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading file
    IoError(std::io::Error),
    /// Parse error (invalid TOML)
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::ParseError(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.filter.min_volume_24h, Decimal::from(100_000));
        assert_eq!(config.filter.separator, '@');
        assert_eq!(config.registry.reserved_ids, 3);
        assert!(config.registry.retain_dropped);
        assert_eq!(
            config.registry.mapping_path,
            PathBuf::from("tools/update-coins/coins.json")
        );
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.feed.url.host_str(), Some("api.coinmarketcap.com"));
    }

    #[test]
    fn test_default_curated() {
        let config = Config::default();
        let curated = config.filter.curated_assets();
        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].symbol, "NZDT");
        assert_eq!(curated[0].name, "Cryptopia coin");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.feed.timeout_secs, 30);
        assert_eq!(config.targets, default_targets());
    }

    #[test]
    fn test_parse_toml() {
        let config = Config::from_toml(
            r#"
            [feed]
            url = "http://localhost:8080/ticker"
            file = "feed.json"

            [filter]
            min_volume_24h = 250000
            curated = []

            [registry]
            mapping_path = "ids.json"
            reserved_ids = 5
            retain_dropped = false

            [[targets]]
            template = "typescript"
            destination = "out/symbols.ts"
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.url.port(), Some(8080));
        assert_eq!(config.feed.file, Some(PathBuf::from("feed.json")));
        assert_eq!(config.filter.min_volume_24h, Decimal::from(250_000));
        assert!(config.filter.curated.is_empty());
        assert_eq!(config.registry.reserved_ids, 5);
        assert!(!config.registry.retain_dropped);
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.targets[0].template, Template::TypeScript);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let example = Config::from_toml(include_str!("../../config.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(example.feed.url, defaults.feed.url);
        assert_eq!(example.filter.min_volume_24h, defaults.filter.min_volume_24h);
        assert_eq!(example.filter.separator, defaults.filter.separator);
        assert_eq!(example.filter.curated, defaults.filter.curated);
        assert_eq!(example.registry.mapping_path, defaults.registry.mapping_path);
        assert_eq!(example.targets, defaults.targets);
    }

    #[test]
    fn test_unknown_template_rejected() {
        let result = Config::from_toml(
            r#"
            [[targets]]
            template = "cobol"
            destination = "x"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
