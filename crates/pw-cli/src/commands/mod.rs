pub mod config;
pub mod document;
pub mod draft;
pub mod history;
pub mod utils;
pub mod workshop;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use pw_application::PersonaWorkshop;
use pw_core::config::WeaverConfig;
use pw_core::error::PwError;
use pw_core::generation::GenerationProvider;
use pw_infrastructure::{ConfigService, FileKeyValueStore, PwPaths};

/// Resolved locations shared by every subcommand.
pub struct Context {
    paths: PwPaths,
}

impl Context {
    pub fn new(config_file: Option<PathBuf>, store_dir: Option<PathBuf>) -> Self {
        Self {
            paths: PwPaths::new(config_file, store_dir),
        }
    }

    pub fn config_service(&self) -> Result<ConfigService> {
        Ok(ConfigService::new(self.paths.config_file()?))
    }

    pub fn config(&self) -> Result<WeaverConfig> {
        Ok(self.config_service()?.load()?)
    }

    pub fn store_dir(&self) -> Result<PathBuf> {
        Ok(self.paths.store_dir()?)
    }

    pub fn workshop_with(&self, provider: Arc<dyn GenerationProvider>) -> Result<PersonaWorkshop> {
        let store = Arc::new(FileKeyValueStore::new(self.store_dir()?));
        Ok(PersonaWorkshop::with_store(provider, store, self.config()?))
    }

    /// A workshop for commands that only touch the draft and history.
    pub fn workshop(&self) -> Result<PersonaWorkshop> {
        self.workshop_with(Arc::new(NoProvider))
    }
}

struct NoProvider;

#[async_trait]
impl GenerationProvider for NoProvider {
    async fn generate(&self, _instruction: &str) -> pw_core::error::Result<String> {
        Err(PwError::generation("this command does not call a model"))
    }
}
