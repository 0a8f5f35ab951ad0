//! Reference text collected from external knowledge entries.

use serde::{Deserialize, Serialize};

/// A piece of reference material (typically a world-info entry) that can be
/// fed to the generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Where the entry comes from, e.g. a lorebook name.
    pub source: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Joins enabled, non-empty entries into `[source - title]` blocks separated
/// by blank lines.
pub fn collect_reference_text(entries: &[ReferenceEntry]) -> String {
    entries
        .iter()
        .filter(|e| e.enabled && !e.content.trim().is_empty())
        .map(|e| format!("[{} - {}]\n{}", e.source, e.title, e.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
