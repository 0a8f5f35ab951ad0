//! Persona Weaver configuration model.
//!
//! Every section and field has a default, so a partial (or empty) TOML file
//! is a valid configuration.
//!
//! ```toml
//! [history]
//! capacity = 50
//!
//! [prompts]
//! refine = "Rewrite {{current}} so that: {{request}}"
//!
//! [lorebook]
//! entry_prefix = "User: "
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::template::PromptKind;

pub const DEFAULT_HISTORY_KEY: &str = "pw_history_v1";
pub const DEFAULT_DRAFT_KEY: &str = "pw_draft_v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaverConfig {
    pub history: HistoryConfig,
    pub draft: DraftConfig,
    pub prompts: PromptConfig,
    pub lorebook: LorebookConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of saved drafts.
    pub capacity: usize,
    /// Storage key of the history log.
    pub key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_HISTORY_CAPACITY,
            key: DEFAULT_HISTORY_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Storage key of the current draft.
    pub key: String,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_DRAFT_KEY.to_string(),
        }
    }
}

/// Template overrides. `None` selects the built-in template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LorebookConfig {
    pub entry_prefix: String,
}

impl Default for LorebookConfig {
    fn default() -> Self {
        Self {
            entry_prefix: "User: ".to_string(),
        }
    }
}

impl WeaverConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The template for `kind`: the configured override when it is
    /// non-blank, otherwise the built-in one.
    pub fn template_for(&self, kind: PromptKind) -> &str {
        let configured = match kind {
            PromptKind::Generate => self.prompts.generate.as_deref(),
            PromptKind::Refine => self.prompts.refine.as_deref(),
        };
        configured
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| kind.default_template())
    }
}
