//! Draft state DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Initial schema (text + instruction)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use pw_core::draft::DraftState;

/// Entity name the draft migration path is registered under.
pub const DRAFT_ENTITY: &str = "draft";

/// Draft slot DTO V1.0.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct DraftStateV1_0_0 {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl IntoDomain<DraftState> for DraftStateV1_0_0 {
    fn into_domain(self) -> DraftState {
        DraftState {
            text: self.text,
            instruction: self.instruction,
            updated_at: self.updated_at,
        }
    }
}

impl FromDomain<DraftState> for DraftStateV1_0_0 {
    fn from_domain(draft: DraftState) -> Self {
        Self {
            text: draft.text,
            instruction: draft.instruction,
            updated_at: draft.updated_at,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for the draft slot.
pub fn create_draft_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define(DRAFT_ENTITY)
        .from::<DraftStateV1_0_0>()
        .into_with_save::<DraftState>();
    migrator
        .register(path)
        .expect("Failed to register draft migration path");
    migrator
}
