//! Configuration for gridview front-ends.
//!
//! Stored in `~/.gridview/config.toml`. Partial files are accepted; unspecified
//! values use the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::DEFAULT_EVENT_CAPACITY;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridviewConfig {
    /// File handling shared by every front-end.
    pub core: CoreConfig,

    /// Grid state store tuning.
    pub store: StoreConfig,

    /// Rendering of measurements.
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Default directory for loading/saving grid files.
    pub default_grid_dir: Option<PathBuf>,

    /// Recently opened grid or scenario files, most recent first.
    pub recent_files: Vec<PathBuf>,

    /// Maximum entries in recent files list.
    pub max_recent: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_grid_dir: None,
            recent_files: Vec::new(),
            max_recent: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Events buffered per subscriber before the slowest one starts lagging.
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for load magnitudes.
    pub load_precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { load_precision: 2 }
    }
}

impl GridviewConfig {
    /// Get the default config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".gridview"))
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Add a file to the front of the recent files list.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.core.recent_files.retain(|p| p != &path);
        self.core.recent_files.insert(0, path);
        self.core.recent_files.truncate(self.core.max_recent);
    }
}
