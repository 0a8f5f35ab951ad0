//! Lorebook (world-info) synchronisation boundary.
//!
//! The core only decides what to write: the serialized document under an
//! identifier derived from the persona's display name. Where and how the
//! entry is stored belongs to the `LorebookSink` implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LorebookEntry {
    /// External identifier, e.g. `User: Alice`.
    pub identifier: String,
    pub display_name: String,
    pub content: String,
}

impl LorebookEntry {
    pub fn new(prefix: &str, display_name: &str, content: impl Into<String>) -> Self {
        let display_name = display_name.trim().to_string();
        Self {
            identifier: format!("{prefix}{display_name}"),
            display_name,
            content: content.into(),
        }
    }
}

/// Insert-or-update target for persona text.
#[async_trait]
pub trait LorebookSink: Send + Sync {
    async fn upsert(&self, entry: &LorebookEntry) -> Result<()>;
}
