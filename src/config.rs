//! Configuration loading and management.

use crate::error::{TodoError, TodoResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "todo-desk.yaml";

/// Environment variable overriding the store path.
pub const DB_PATH_ENV: &str = "TODO_DESK_DB_PATH";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub window: WindowConfig,
}

/// Store-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("tasks.db")
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_title() -> String {
    "My To-Do List".to_string()
}

fn default_width() -> f32 {
    560.0
}

fn default_height() -> f32 {
    420.0
}

impl Config {
    /// Load configuration from file.
    pub fn load<P: AsRef<Path>>(path: P) -> TodoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| TodoError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config files, highest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(PROJECT_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("todo-desk").join("config.yaml"));
        }
        paths
    }

    /// Load from an explicit path, else the first existing search path, else defaults.
    ///
    /// The store path environment override is applied last.
    pub fn resolve(explicit: Option<&Path>) -> TodoResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::load_first(&Self::search_paths()),
        };

        if let Ok(db_path) = std::env::var(DB_PATH_ENV) {
            if !db_path.trim().is_empty() {
                config.store.db_path = PathBuf::from(db_path);
            }
        }

        Ok(config)
    }

    /// Load the first readable config among `paths`, or defaults.
    pub fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load(path) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring unreadable config"),
            }
        }
        Self::default()
    }

    fn validate(&self) -> TodoResult<()> {
        if self.store.db_path.as_os_str().is_empty() {
            return Err(TodoError::Config("store.db_path is empty".into()));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(TodoError::Config("window size must be positive".into()));
        }
        Ok(())
    }

    /// Ensure the database directory exists.
    pub fn ensure_db_dir(&self) -> TodoResult<()> {
        if let Some(parent) = self.store.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
