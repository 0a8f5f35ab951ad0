//! Domain layer for Persona Weaver.
//!
//! Holds the attribute document model, the diff/merge engine, prompt
//! templates, the bounded history log, the draft slot, and the interfaces
//! through which the outside world (model provider, storage, lorebook) is
//! reached.

pub mod config;
pub mod diff;
pub mod document;
pub mod draft;
pub mod error;
pub mod generation;
pub mod history;
pub mod lorebook;
pub mod reference;
pub mod storage;
pub mod tag;
pub mod template;

// Re-export common types
pub use config::WeaverConfig;
pub use diff::{ChangeKind, ChangeRecord, diff, resolve};
pub use document::{Attribute, AttributeDocument};
pub use draft::DraftState;
pub use error::PwError;
pub use history::{HistoryEntry, HistoryLog};
