//! Application configuration management

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use mv_core::{ConfigError, ViewerConfig};

pub use mv_core::UiTheme;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "MV_CONFIG";

/// Default config file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "mv-config.ron";

/// Shared configuration handle
pub type SharedConfig = Arc<RwLock<ConfigManager>>;

/// Owns the active [`ViewerConfig`] and where it is persisted
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    config: ViewerConfig,
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// In-memory manager that never touches the disk
    pub fn in_memory(config: ViewerConfig) -> Self {
        Self { config, path: None }
    }

    /// Load from `path`, falling back to defaults when the file is missing
    /// or unreadable. Saving later writes back to `path`.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let config = if path.exists() {
            match ViewerConfig::load(&path) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load config {}: {}, using defaults", path.display(), e);
                    ViewerConfig::default()
                }
            }
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            ViewerConfig::default()
        };

        Self {
            config,
            path: Some(path),
        }
    }

    /// Config file from `MV_CONFIG`, or `mv-config.ron` in the working directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_or_default(path)
    }

    /// No filesystem in the browser
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::in_memory(ViewerConfig::default())
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ViewerConfig {
        &mut self.config
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn set_theme(&mut self, theme: UiTheme) {
        self.config.ui.theme = theme;
    }

    /// Write the config back to its file. No-op for in-memory managers.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        self.config.save(path)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Wrap in a [`SharedConfig`]
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::load_or_default(dir.path().join("absent.ron"));
        assert_eq!(manager.config(), &ViewerConfig::default());
        assert!(manager.path().is_some());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.ron");

        let mut manager = ConfigManager::load_or_default(&path);
        manager.set_theme(UiTheme::Light);
        manager.config_mut().gizmo.size = 2.0;
        manager.save().unwrap();

        let reloaded = ConfigManager::load_or_default(&path);
        assert_eq!(reloaded.config().ui.theme, UiTheme::Light);
        assert_eq!(reloaded.config().gizmo.size, 2.0);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        std::fs::write(&path, "ViewerConfig(selection: 42").unwrap();

        let manager = ConfigManager::load_or_default(&path);
        assert_eq!(manager.config(), &ViewerConfig::default());
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let manager = ConfigManager::in_memory(ViewerConfig::default());
        assert!(manager.save().is_ok());
        assert!(manager.path().is_none());
    }
}
