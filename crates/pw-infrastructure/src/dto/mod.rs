//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs are the stored JSON shape of the history log and the draft
//! slot. Each is a `version-migrate` `Versioned` type; repositories load and
//! save through the migrator factories below so that stored values carry a
//! `version` field and older schemas can be stepped forward.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes; values with no migration path are discarded on load
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)

mod draft;
mod history;

pub use draft::{DRAFT_ENTITY, DraftStateV1_0_0, create_draft_migrator};
pub use history::{HISTORY_ENTITY, HistoryEntryV1_0_0, HistoryLogV1_0_0, create_history_migrator};
