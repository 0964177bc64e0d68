use foodinator_core::DEFAULT_TOTAL_SLOTS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding planner.json
    pub data_dir: ConfigValue<PathBuf>,
    /// Number of meal slots in the weekly plan
    pub total_slots: ConfigValue<usize>,
    /// Catalog JSON file; the built-in catalog is used when unset
    pub catalog_path: ConfigValue<Option<PathBuf>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    total_slots: Option<usize>,
    catalog_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut total_slots = ConfigValue::new(DEFAULT_TOTAL_SLOTS, ConfigSource::Default);
        let mut catalog_path = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(slots) = file_config.total_slots {
                total_slots = ConfigValue::new(
                    validate_slots(slots, &slots.to_string())?,
                    ConfigSource::File,
                );
            }
            if let Some(catalog) = file_config.catalog_path {
                catalog_path =
                    ConfigValue::new(Some(resolve_relative(&path, catalog)), ConfigSource::File);
            }

            config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("FOODINATOR_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(raw) = std::env::var("FOODINATOR_TOTAL_SLOTS") {
            total_slots = ConfigValue::new(parse_slots(&raw)?, ConfigSource::Environment);
        }
        if let Ok(catalog) = std::env::var("FOODINATOR_CATALOG") {
            catalog_path =
                ConfigValue::new(Some(PathBuf::from(catalog)), ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            total_slots,
            catalog_path,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/foodinator/
    /// - macOS: ~/Library/Application Support/foodinator/
    /// - Windows: %APPDATA%/foodinator/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foodinator")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/foodinator/
    /// - macOS: ~/Library/Application Support/foodinator/
    /// - Windows: %APPDATA%/foodinator/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("foodinator")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Resolve relative paths against the config file's directory
fn resolve_relative(config_path: &Path, value: PathBuf) -> PathBuf {
    if value.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&value))
            .unwrap_or(value)
    } else {
        value
    }
}

fn parse_slots(raw: &str) -> Result<usize, ConfigError> {
    let slots = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidValue("total_slots", raw.to_string()))?;
    validate_slots(slots, raw)
}

fn validate_slots(slots: usize, raw: &str) -> Result<usize, ConfigError> {
    if slots == 0 {
        return Err(ConfigError::InvalidValue("total_slots", raw.to_string()));
    }
    Ok(slots)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(key, value) => {
                write!(f, "Invalid value '{}' for {}: expected a positive number", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
