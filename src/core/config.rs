/*
 * Manages application-wide settings: log verbosity, the simulated latency of
 * the in-memory services, the activity feed bound, hydration goals, and an
 * optional override for where the durable store keeps its files. Settings are
 * persisted as JSON in the application's local configuration directory.
 *
 * `ConfigManagerOperations` abstracts the storage so tests can substitute a
 * directory of their choice; `CoreConfigManager` resolves the real per-user
 * directory through `path_utils`.
 */
use crate::core::path_utils;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "fitbuddy_config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Serde(serde_json::Error),
    NoConfigDirectory,
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serde(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Configuration I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "Configuration format error: {e}"),
            ConfigError::NoConfigDirectory => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Serde(e) => Some(e),
            ConfigError::NoConfigDirectory => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /* One of "off", "error", "warn", "info", "debug", "trace". */
    pub log_level: String,
    pub catalog_latency_ms: u64,
    pub auth_latency_ms: u64,
    /* Maximum number of entries kept in the activity feed. */
    pub activity_feed_limit: usize,
    pub daily_water_goal_ml: u32,
    /* Amount added by the one-tap "quick water" action. */
    pub quick_water_ml: u32,
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_level: "info".to_string(),
            catalog_latency_ms: 800,
            auth_latency_ms: 1000,
            activity_feed_limit: 100,
            daily_water_goal_ml: 3000,
            quick_water_ml: 250,
            storage_dir: None,
        }
    }
}

impl AppConfig {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" | "warning" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }

    pub fn catalog_latency(&self) -> Duration {
        Duration::from_millis(self.catalog_latency_ms)
    }

    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }
}

pub trait ConfigManagerOperations: Send + Sync {
    /* Returns the defaults when no configuration has been saved yet. */
    fn load_config(&self, app_name: &str) -> Result<AppConfig>;
    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()>;
}

fn load_config_from_dir(config_dir: &Path) -> Result<AppConfig> {
    let file_path = config_dir.join(CONFIG_FILENAME);
    if !file_path.exists() {
        log::debug!("ConfigManager: Config file {file_path:?} does not exist, using defaults.");
        return Ok(AppConfig::default());
    }
    let reader = BufReader::new(File::open(&file_path)?);
    let config: AppConfig = serde_json::from_reader(reader)?;
    log::debug!("ConfigManager: Loaded configuration from {file_path:?}.");
    Ok(config)
}

fn save_config_to_dir(config_dir: &Path, config: &AppConfig) -> Result<()> {
    let file_path = config_dir.join(CONFIG_FILENAME);
    let bytes = serde_json::to_vec_pretty(config)?;
    path_utils::write_atomically(&file_path, &bytes)?;
    log::debug!("ConfigManager: Saved configuration to {file_path:?}.");
    Ok(())
}

pub struct CoreConfigManager {}

impl CoreConfigManager {
    pub fn new() -> Self {
        CoreConfigManager {}
    }
}

impl Default for CoreConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManagerOperations for CoreConfigManager {
    fn load_config(&self, app_name: &str) -> Result<AppConfig> {
        log::trace!("CoreConfigManager: Loading configuration for app '{app_name}'");
        let config_dir = path_utils::get_base_app_config_local_dir(app_name)
            .ok_or(ConfigError::NoConfigDirectory)?;
        load_config_from_dir(&config_dir)
    }

    fn save_config(&self, app_name: &str, config: &AppConfig) -> Result<()> {
        log::trace!("CoreConfigManager: Saving configuration for app '{app_name}'");
        let config_dir = path_utils::get_base_app_config_local_dir(app_name)
            .ok_or(ConfigError::NoConfigDirectory)?;
        save_config_to_dir(&config_dir, config)
    }
}
