//! Configuration for the editor buffer

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DOCUMENT_INIT_CAPACITY, LINE_INIT_CAPACITY};

/// Largest tab width a config may ask for
pub const MAX_TAB_WIDTH: usize = 64;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces inserted by a tab
    pub tab_width: usize,
    /// First allocation of a line, in bytes
    pub line_initial_capacity: usize,
    /// First allocation of the row sequence, in rows
    pub row_initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            line_initial_capacity: LINE_INIT_CAPACITY,
            row_initial_capacity: DOCUMENT_INIT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from the default location or return the default config
    pub fn load_or_default() -> Self {
        // Try ~/.config/grive/config.json
        if let Some(config_dir) = dirs_config_path() {
            let config_path = config_dir.join("config.json");
            if config_path.exists() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Ignoring config {}: {}", config_path.display(), e);
                    },
                }
            }
        }
        Self::default()
    }

    /// Replace zero capacities with 1 so doubling always makes progress, and
    /// cap the tab width at `MAX_TAB_WIDTH`
    pub fn normalized(mut self) -> Self {
        self.tab_width = self.tab_width.min(MAX_TAB_WIDTH);
        self.line_initial_capacity = self.line_initial_capacity.max(1);
        self.row_initial_capacity = self.row_initial_capacity.max(1);
        self
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("grive"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
