//! Draft state domain model.
//!
//! A single last-write-wins slot holding the in-progress document text and
//! the last instruction. It exists so that an editing surface can be closed
//! and reopened without losing work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeDocument;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftState {
    /// Raw document text exactly as last edited.
    #[serde(default)]
    pub text: String,
    /// Last instruction typed by the user.
    #[serde(default)]
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DraftState {
    pub fn new(text: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            instruction: instruction.into(),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.instruction.trim().is_empty()
    }

    /// Parses the draft text.
    pub fn document(&self) -> AttributeDocument {
        AttributeDocument::parse(&self.text)
    }
}
