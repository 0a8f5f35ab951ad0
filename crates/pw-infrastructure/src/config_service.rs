//! Configuration loading.
//!
//! A missing config file yields the defaults; a file that exists but cannot
//! be parsed is reported as an error rather than silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use pw_core::config::WeaverConfig;
use pw_core::error::Result;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<WeaverConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No config file; using defaults");
            return Ok(WeaverConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let config = WeaverConfig::from_toml_str(&content)?;
        info!(path = %self.path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Writes `config`, creating parent directories as needed.
    pub fn save(&self, config: &WeaverConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, config.to_toml_string()?)?;
        Ok(())
    }
}
