//! History log DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema (entries most-recent-first)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use pw_core::history::HistoryEntry;

/// Entity name the history migration path is registered under.
pub const HISTORY_ENTITY: &str = "history";

/// History entry DTO V1.0.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryV1_0_0 {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl From<&HistoryEntry> for HistoryEntryV1_0_0 {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            created_at: entry.created_at,
            title: entry.title.clone(),
            text: entry.text.clone(),
            instruction: entry.instruction.clone(),
        }
    }
}

impl From<HistoryEntryV1_0_0> for HistoryEntry {
    fn from(dto: HistoryEntryV1_0_0) -> Self {
        HistoryEntry {
            id: dto.id,
            created_at: dto.created_at,
            title: dto.title,
            text: dto.text,
            instruction: dto.instruction,
        }
    }
}

/// Stored form of the whole log V1.0.0.
///
/// The domain side is the bare entry list; capacity is configuration and
/// is applied by the repository after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct HistoryLogV1_0_0 {
    #[serde(default)]
    pub entries: Vec<HistoryEntryV1_0_0>,
}

/// Convert HistoryLogV1_0_0 DTO to the domain entry list
impl IntoDomain<Vec<HistoryEntry>> for HistoryLogV1_0_0 {
    fn into_domain(self) -> Vec<HistoryEntry> {
        self.entries.into_iter().map(HistoryEntry::from).collect()
    }
}

/// Convert the domain entry list to HistoryLogV1_0_0 (for version-migrate save support)
impl FromDomain<Vec<HistoryEntry>> for HistoryLogV1_0_0 {
    fn from_domain(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries: entries.iter().map(HistoryEntryV1_0_0::from).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the history log.
///
/// # Migration Path
///
/// - V1.0.0 → `Vec<HistoryEntry>`
pub fn create_history_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define(HISTORY_ENTITY)
        .from::<HistoryLogV1_0_0>()
        .into_with_save::<Vec<HistoryEntry>>();
    migrator
        .register(path)
        .expect("Failed to register history migration path");
    migrator
}
