//! Main UI service entry point.
//!
//! The [`UiService`] owns the shared [`GridState`] and the configuration, and
//! adds the file-level operations a front-end needs (open a grid document,
//! generate from a scenario file, save the export).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::GridviewConfig;
use crate::error::{Error, Result};
use crate::events::GridEvent;
use crate::store::GridState;

/// Main service coordinating grid state and configuration.
///
/// # Example
///
/// ```ignore
/// let service = UiService::new()?;
/// service.open_grid("grid.json")?;
/// let closed = service.state().read().fuse_is_closed(FuseId::new(0))?;
/// ```
pub struct UiService {
    /// Shared grid state.
    state: Arc<RwLock<GridState>>,

    /// Application configuration.
    config: Arc<RwLock<GridviewConfig>>,
}

impl UiService {
    /// Create a new UI service, loading `~/.gridview/config.toml` if present.
    pub fn new() -> Result<Self> {
        let config = GridviewConfig::load()?;
        Self::with_config(config)
    }

    /// Create a new UI service with the provided configuration.
    pub fn with_config(config: GridviewConfig) -> Result<Self> {
        let state = GridState::with_event_capacity(config.store.event_capacity);
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            config: Arc::new(RwLock::new(config)),
        })
    }

    pub fn state(&self) -> &Arc<RwLock<GridState>> {
        &self.state
    }

    pub fn config(&self) -> &Arc<RwLock<GridviewConfig>> {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────
    // File-level operations
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the grid with the contents of a grid JSON file.
    pub fn open_grid(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let json = gridview_io::load_grid_json(&path).map_err(|source| Error::LoadFailed {
            path: path.clone(),
            source: source.into(),
        })?;

        self.state.write().init_from_json(&json)?;
        info!(path = %path.display(), "grid loaded");
        self.config.write().add_recent_file(path);
        Ok(())
    }

    /// Replace the grid with a synthetic one generated from a scenario file.
    pub fn open_scenario(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        let scenario = gridview_scenarios::load_scenario_from_path(&path).map_err(|source| {
            Error::LoadFailed {
                path: path.clone(),
                source: source.into(),
            }
        })?;

        self.state.write().init_from_scenario(&scenario)?;
        info!(path = %path.display(), scenario = %scenario.scenario_id, "scenario loaded");
        self.config.write().add_recent_file(path);
        Ok(())
    }

    /// Write the current grid export to a file.
    pub fn save_grid(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.state.read().grid_json()?;
        std::fs::write(path.as_ref(), text)?;
        info!(path = %path.as_ref().display(), "grid saved");
        Ok(())
    }

    /// Discard the current grid.
    pub fn reset(&self) {
        self.state.write().init_empty();
    }

    pub fn has_grid(&self) -> bool {
        !self.state.read().grid().is_empty()
    }

    /// Subscribe to grid events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<GridEvent> {
        self.state.read().subscribe()
    }

    /// Save the current configuration.
    pub fn save_config(&self) -> Result<()> {
        self.config.read().save()
    }

    pub fn recent_files(&self) -> Vec<PathBuf> {
        self.config.read().core.recent_files.clone()
    }
}

/// Builder for configuring a [`UiService`].
#[derive(Default)]
pub struct UiServiceBuilder {
    config: Option<GridviewConfig>,
    config_path: Option<PathBuf>,
}

impl UiServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration.
    pub fn config(mut self, config: GridviewConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a specific path.
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<UiService> {
        let config = if let Some(cfg) = self.config {
            cfg
        } else if let Some(path) = self.config_path {
            GridviewConfig::load_from(&path)?
        } else {
            GridviewConfig::load()?
        };

        UiService::with_config(config)
    }
}
