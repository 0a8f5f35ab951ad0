//! Change record domain model.

use serde::Serialize;
use strum::{AsRefStr, Display};

/// How a single attribute differs between two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Modified,
    Added,
    Removed,
}

/// One attribute's comparison result plus the caller's current choice.
///
/// At least one of `old`/`new` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub key: String,
    pub old: Option<String>,
    pub new: Option<String>,
    /// Selectable values: `[old, new]` when they differ, otherwise a single
    /// entry.
    pub options: Vec<String>,
    pub selected: String,
    /// Free-text replacement typed by the user. Takes precedence over
    /// `selected` when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_value: Option<String>,
}

impl ChangeRecord {
    pub(crate) fn new(key: String, old: Option<String>, new: Option<String>) -> Self {
        let options: Vec<String> = match (&old, &new) {
            (Some(o), Some(n)) if o == n => vec![n.clone()],
            (Some(o), Some(n)) => vec![o.clone(), n.clone()],
            (Some(o), None) => vec![o.clone()],
            (None, Some(n)) => vec![n.clone()],
            (None, None) => Vec::new(),
        };
        let selected = new.clone().or_else(|| old.clone()).unwrap_or_default();

        Self {
            key,
            old,
            new,
            options,
            selected,
            override_value: None,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match (&self.old, &self.new) {
            (Some(o), Some(n)) if o == n => ChangeKind::Unchanged,
            (Some(_), Some(_)) => ChangeKind::Modified,
            (None, Some(_)) => ChangeKind::Added,
            _ => ChangeKind::Removed,
        }
    }

    /// True when the caller has a real choice to make.
    pub fn needs_decision(&self) -> bool {
        self.options.len() > 1
    }

    /// Selects the old value. Returns false when there is no old value.
    pub fn select_old(&mut self) -> bool {
        match &self.old {
            Some(old) => {
                self.selected = old.clone();
                true
            }
            None => false,
        }
    }

    /// Selects the new value. Returns false when there is no new value.
    pub fn select_new(&mut self) -> bool {
        match &self.new {
            Some(new) => {
                self.selected = new.clone();
                true
            }
            None => false,
        }
    }

    /// Selects `options[index]`. Returns false when out of range.
    pub fn select_option(&mut self, index: usize) -> bool {
        match self.options.get(index) {
            Some(value) => {
                self.selected = value.clone();
                true
            }
            None => false,
        }
    }

    /// Stores a free-text override. An empty string clears the override.
    pub fn set_override(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.override_value = (!text.is_empty()).then_some(text);
    }

    /// The value this record resolves to, ignoring external overrides.
    pub fn effective_value(&self) -> &str {
        match self.override_value.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => &self.selected,
        }
    }
}

/// Per-kind counts over a change-set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub unchanged: usize,
    pub modified: usize,
    pub added: usize,
    pub removed: usize,
}

impl ChangeSummary {
    pub fn from_records(records: &[ChangeRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                match record.kind() {
                    ChangeKind::Unchanged => summary.unchanged += 1,
                    ChangeKind::Modified => summary.modified += 1,
                    ChangeKind::Added => summary.added += 1,
                    ChangeKind::Removed => summary.removed += 1,
                }
                summary
            })
    }

    pub fn has_changes(&self) -> bool {
        self.modified + self.added + self.removed > 0
    }
}
