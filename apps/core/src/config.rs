use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fuzzy::{DEFAULT_DISTANCE, DEFAULT_THRESHOLD};
use crate::search::DEFAULT_RESULT_LIMIT;
use crate::settings::{validate_hotkey, validate_max_results, validate_recent_limit};

const APP_DIR_NAME: &str = "quickswitch";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORAGE_FILE_NAME: &str = "storage.sqlite3";

pub const DEFAULT_HOTKEY: &str = "Ctrl+K";
pub const DEFAULT_STORAGE_KEY: &str = "quick-switcher:recently-searched";
pub const DEFAULT_RECENT_LIMIT: u16 = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    Fuzzy,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub hotkey: String,
    pub match_policy: MatchPolicy,
    pub fuzzy_threshold: f64,
    pub fuzzy_distance: usize,
    pub max_results: u16,
    pub recent_limit: u16,
    pub storage_key: String,
    pub storage_path: PathBuf,
    pub fetch_playlists: bool,
    pub idle_shows_system_destinations: bool,
    pub init_retry_interval_ms: u64,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            hotkey: DEFAULT_HOTKEY.to_string(),
            match_policy: MatchPolicy::Fuzzy,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            fuzzy_distance: DEFAULT_DISTANCE,
            max_results: DEFAULT_RESULT_LIMIT as u16,
            recent_limit: DEFAULT_RECENT_LIMIT,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: base.join(STORAGE_FILE_NAME),
            fetch_playlists: true,
            idle_shows_system_destinations: true,
            init_retry_interval_ms: 1_000,
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

pub fn stable_app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}

/// Loads the config at `path` (or the default location). A missing file yields
/// defaults pointing at that path.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| Config::default().config_path);

    if !path.exists() {
        return Ok(Config {
            config_path: path,
            ..Config::default()
        });
    }

    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let mut cfg = if is_json_path(&path) {
        json5::from_str::<Config>(&raw).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?
    } else {
        toml::from_str::<Config>(&raw).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?
    };
    cfg.config_path = path;

    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg)?;
    let encoded = toml::to_string_pretty(cfg)?;

    if let Some(parent) = cfg.config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: cfg.config_path.clone(),
            source,
        })?;
    }
    std::fs::write(&cfg.config_path, encoded).map_err(|source| ConfigError::Write {
        path: cfg.config_path.clone(),
        source,
    })
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    validate_hotkey(&cfg.hotkey).map_err(ConfigError::Invalid)?;
    validate_max_results(cfg.max_results).map_err(ConfigError::Invalid)?;
    validate_recent_limit(cfg.recent_limit).map_err(ConfigError::Invalid)?;

    if !(0.0..=1.0).contains(&cfg.fuzzy_threshold) {
        return Err(ConfigError::Invalid(
            "fuzzy_threshold must be between 0.0 and 1.0".into(),
        ));
    }

    if cfg.fuzzy_distance == 0 {
        return Err(ConfigError::Invalid("fuzzy_distance must be positive".into()));
    }

    if cfg.storage_key.trim().is_empty() {
        return Err(ConfigError::Invalid("storage_key is required".into()));
    }

    if cfg.storage_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("storage_path is required".into()));
    }

    Ok(())
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false)
}
