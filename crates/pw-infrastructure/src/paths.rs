//! Unified path management for Persona Weaver files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/persona-weaver/        # Config directory
//! └── config.toml                  # WeaverConfig
//!
//! ~/.local/share/persona-weaver/   # Data directory
//! └── store/                       # FileKeyValueStore (history, draft)
//! ```

use std::path::PathBuf;

use pw_core::error::{PwError, Result};

const APP_DIR: &str = "persona-weaver";

/// Resolves platform directories, honouring explicit overrides.
#[derive(Debug, Clone, Default)]
pub struct PwPaths {
    config_file: Option<PathBuf>,
    store_dir: Option<PathBuf>,
}

impl PwPaths {
    pub fn new(config_file: Option<PathBuf>, store_dir: Option<PathBuf>) -> Self {
        Self {
            config_file,
            store_dir,
        }
    }

    /// Returns the path of `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.config_file {
            return Ok(path.clone());
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| PwError::config("Cannot determine the configuration directory"))?;
        Ok(dir.join(APP_DIR).join("config.toml"))
    }

    /// Returns the directory backing the key-value store.
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }
        let dir = dirs::data_dir()
            .ok_or_else(|| PwError::config("Cannot determine the data directory"))?;
        Ok(dir.join(APP_DIR).join("store"))
    }
}
