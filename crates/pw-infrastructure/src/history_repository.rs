//! Key-value backed HistoryRepository implementation.

use std::sync::Arc;

use pw_core::error::{PwError, Result};
use pw_core::history::{HistoryEntry, HistoryLog, HistoryRepository};
use pw_core::storage::KeyValueStore;
use tracing::warn;
use version_migrate::Migrator;

use crate::dto::{HISTORY_ENTITY, create_history_migrator};

/// Stores the whole history log as one JSON value under a single key.
///
/// Anything unreadable under that key (storage error, malformed JSON, or a
/// version the migrator has no path for) loads as an empty log. The stored
/// value is left untouched until the next successful save overwrites it.
pub struct KvHistoryRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    migrator: Migrator,
}

impl KvHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            capacity,
            migrator: create_history_migrator(),
        }
    }

    fn empty(&self) -> HistoryLog {
        HistoryLog::new(self.capacity)
    }

    fn decode(&self, raw: Option<String>) -> HistoryLog {
        let Some(raw) = raw else {
            return self.empty();
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Corrupted history data; using empty log");
                return self.empty();
            }
        };

        let entries: std::result::Result<Vec<HistoryEntry>, _> =
            self.migrator.load_flat_from(HISTORY_ENTITY, value);
        match entries {
            Ok(entries) => HistoryLog::from_entries(entries, self.capacity),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to migrate history data; using empty log");
                self.empty()
            }
        }
    }

    fn encode(&self, log: &HistoryLog) -> Result<String> {
        Ok(self
            .migrator
            .save_domain_flat(HISTORY_ENTITY, log.entries().to_vec())?)
    }
}

impl HistoryRepository for KvHistoryRepository {
    fn load(&self) -> HistoryLog {
        match self.store.get_string(&self.key) {
            Ok(raw) => self.decode(raw),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read history; using empty log");
                self.empty()
            }
        }
    }

    fn save(&self, log: &HistoryLog) -> Result<()> {
        let json = self.encode(log)?;
        self.store.set_string(&self.key, &json)
    }

    fn update(&self, change: &mut dyn FnMut(&mut HistoryLog) -> Result<()>) -> Result<HistoryLog> {
        let mut saved = None;
        self.store.update(&self.key, &mut |raw| {
            let mut log = self.decode(raw);
            change(&mut log)?;
            let json = self.encode(&log)?;
            saved = Some(log);
            Ok(json)
        })?;
        saved.ok_or_else(|| PwError::internal("history update finished without a log"))
    }
}
