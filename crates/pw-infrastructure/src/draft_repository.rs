//! Key-value backed DraftRepository implementation.

use std::sync::Arc;

use pw_core::draft::{DraftRepository, DraftState};
use pw_core::error::Result;
use pw_core::storage::KeyValueStore;
use tracing::warn;
use version_migrate::Migrator;

use crate::dto::{DRAFT_ENTITY, create_draft_migrator};

pub struct KvDraftRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    migrator: Migrator,
}

impl KvDraftRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            migrator: create_draft_migrator(),
        }
    }
}

impl DraftRepository for KvDraftRepository {
    fn save(&self, draft: &DraftState) -> Result<()> {
        let json = self.migrator.save_domain_flat(DRAFT_ENTITY, draft.clone())?;
        self.store.set_string(&self.key, &json)
    }

    fn load(&self) -> DraftState {
        let raw = match self.store.get_string(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DraftState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read draft; using empty draft");
                return DraftState::default();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Corrupted draft data; using empty draft");
                return DraftState::default();
            }
        };

        let draft: std::result::Result<DraftState, _> =
            self.migrator.load_flat_from(DRAFT_ENTITY, value);
        draft.unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Failed to migrate draft data; using empty draft");
            DraftState::default()
        })
    }

    fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}
