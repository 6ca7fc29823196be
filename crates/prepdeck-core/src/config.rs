use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for PrepDeck
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrepdeckConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Question-store backend selection
    #[serde(default)]
    pub store: StoreConfig,

    /// Time-complexity analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Question-store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend: "local" (filesystem) or "remote" (HTTP indirection)
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// Data directory for the local backend. Expected layout:
    /// `{data_dir}/companies-list.json` and
    /// `{data_dir}/companies/{slug}/{period-file}`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL for the remote backend
    #[serde(default = "default_remote_url")]
    pub remote_url: String,

    /// Request timeout for the remote backend in seconds
    #[serde(default = "default_store_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            data_dir: default_data_dir(),
            remote_url: default_remote_url(),
            timeout_secs: default_store_timeout_secs(),
        }
    }
}

/// Time-complexity analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Enable the analysis endpoint (also enabled by GEMINI_API_KEY)
    #[serde(default)]
    pub enabled: bool,

    /// Generative-text provider: "gemini"
    #[serde(default = "default_analysis_provider")]
    pub provider: String,

    /// Model identifier
    #[serde(default = "default_analysis_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_analysis_api_base")]
    pub api_base: String,

    /// API key (falls back to GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_analysis_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum entries kept in the result cache
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Result cache TTL in seconds, 0 disables expiry
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_analysis_provider(),
            model: default_analysis_model(),
            api_base: default_analysis_api_base(),
            api_key: None,
            timeout_secs: default_analysis_timeout_secs(),
            cache_max_entries: default_cache_max_entries(),
            cache_ttl_secs: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "pretty", "json", "compact"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    4000
}
fn default_store_backend() -> String {
    "local".to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_remote_url() -> String {
    "http://localhost:4000".to_string()
}
fn default_store_timeout_secs() -> u64 {
    30
}
fn default_analysis_provider() -> String {
    "gemini".to_string()
}
fn default_analysis_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_analysis_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_analysis_timeout_secs() -> u64 {
    120
}
fn default_cache_max_entries() -> usize {
    1024
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration manager with file discovery and environment overrides
pub struct ConfigManager {
    config: PrepdeckConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration with the following precedence:
    /// 1. Environment variables (.env file)
    /// 2. Config file (prepdeck.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_dotenv();

        let (config, config_path) = Self::load_config_file()?;
        let config = Self::apply_env_overrides(config);
        Self::validate_config(&config)?;

        if let Some(ref path) = config_path {
            info!("Loaded config file: {}", path.display());
        } else {
            info!("No config file found, using defaults");
        }
        info!("Store backend: {}", config.store.backend);
        info!(
            "Analysis: {}",
            if config.analysis.enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        Ok(Self {
            config,
            config_path,
        })
    }

    /// Load .env file if it exists
    fn load_dotenv() {
        if Path::new(".env").exists() {
            if let Err(e) = dotenv::from_filename(".env") {
                warn!("Failed to load .env file: {}", e);
            }
            return;
        }

        if let Some(home) = dirs::home_dir() {
            let home_env = home.join(".prepdeck.env");
            if home_env.exists() {
                if let Err(e) = dotenv::from_path(&home_env) {
                    warn!("Failed to load .prepdeck.env: {}", e);
                }
            }
        }
    }

    /// Find and load config file
    /// Search order:
    /// 1. ./prepdeck.toml (current directory)
    /// 2. ~/.prepdeck/config.toml (user config)
    /// 3. Use defaults
    fn load_config_file() -> Result<(PrepdeckConfig, Option<PathBuf>), ConfigError> {
        let local_config = Path::new("prepdeck.toml");
        if local_config.exists() {
            let config = Self::read_toml_file(local_config)?;
            return Ok((config, Some(local_config.to_path_buf())));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".prepdeck").join("config.toml");
            if user_config.exists() {
                let config = Self::read_toml_file(&user_config)?;
                return Ok((config, Some(user_config)));
            }
        }

        Ok((PrepdeckConfig::default(), None))
    }

    fn read_toml_file(path: &Path) -> Result<PrepdeckConfig, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: PrepdeckConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: PrepdeckConfig) -> PrepdeckConfig {
        if let Ok(host) = std::env::var("PREPDECK_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PREPDECK_PORT") {
            if let Ok(p) = port.parse() {
                config.server.port = p;
            }
        }

        if let Ok(backend) = std::env::var("PREPDECK_STORE_BACKEND") {
            config.store.backend = backend;
        }
        if let Ok(dir) = std::env::var("PREPDECK_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("PREPDECK_REMOTE_URL") {
            config.store.remote_url = url;
        }

        if let Ok(model) = std::env::var("PREPDECK_ANALYSIS_MODEL") {
            config.analysis.model = model;
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.analysis.api_key = Some(key);
            config.analysis.enabled = true; // Enable if key specified
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.logging.level = level;
        }

        config
    }

    /// Validate configuration
    fn validate_config(config: &PrepdeckConfig) -> Result<(), ConfigError> {
        match config.store.backend.as_str() {
            "local" | "remote" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid store backend: {}. Must be one of: local, remote",
                    other
                )))
            }
        }

        match config.analysis.provider.as_str() {
            "gemini" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid analysis provider: {}. Must be: gemini",
                    other
                )))
            }
        }

        if config.analysis.cache_max_entries == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.cache_max_entries must be greater than zero".to_string(),
            ));
        }

        // RUST_LOG can carry full filter directives, only plain levels are checked
        match config.logging.level.as_str() {
            level if level.contains('=') || level.contains(',') => {}
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PrepdeckConfig {
        &self.config
    }

    /// Get the path to the config file that was loaded, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Create a default config file
    pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let config = PrepdeckConfig::default();
        let toml_str =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::ReadError(e.to_string()))?;
        }

        std::fs::write(path, toml_str).map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Ok(())
    }
}
