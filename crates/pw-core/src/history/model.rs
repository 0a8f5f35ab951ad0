//! History log domain model.
//!
//! The log keeps saved drafts most-recent-first and never grows beyond its
//! capacity; appending past the limit silently evicts the oldest entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{PwError, Result};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One saved draft. Only the title may change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique entry identifier (UUID format)
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    /// Serialized attribute document.
    pub text: String,
    /// Instruction that produced this draft, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time. A blank title is
    /// replaced by the creation time.
    pub fn new(title: impl Into<String>, text: impl Into<String>, instruction: Option<String>) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at,
            title: title_or_timestamp(&title.into(), created_at),
            text: text.into(),
            instruction: instruction.filter(|i| !i.trim().is_empty()),
        }
    }

    /// Renames the entry with the same blank-title fallback as [`new`](Self::new).
    pub fn set_title(&mut self, title: &str) {
        self.title = title_or_timestamp(title, self.created_at);
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.text.to_lowercase().contains(needle)
    }
}

fn title_or_timestamp(title: &str, created_at: DateTime<Utc>) -> String {
    let title = title.trim();
    if title.is_empty() {
        created_at.format("%Y-%m-%d %H:%M").to_string()
    } else {
        title.to_string()
    }
}

/// A capacity-bounded, most-recent-first log of saved drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryLog {
    /// Creates an empty log. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuilds a log from persisted entries (already most-recent-first),
    /// dropping whatever exceeds `capacity`.
    pub fn from_entries(entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        let mut log = Self {
            entries,
            capacity: capacity.max(1),
        };
        log.enforce_capacity();
        log
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity, evicting the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.enforce_capacity();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Inserts at the head and returns how many old entries were evicted.
    pub fn append(&mut self, entry: HistoryEntry) -> usize {
        self.entries.insert(0, entry);
        self.enforce_capacity()
    }

    pub fn remove_at(&mut self, index: usize) -> Result<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(PwError::invalid_index(index, self.entries.len()));
        }
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Renames an entry. A blank title falls back to the entry's creation time.
    pub fn update_title(&mut self, index: usize, title: impl Into<String>) -> Result<()> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| PwError::invalid_index(index, len))?;
        entry.set_title(&title.into());
        Ok(())
    }

    /// Case-insensitive substring search over titles and document text.
    /// Results keep log order; an empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&HistoryEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.matches(&needle))
            .collect()
    }

    fn enforce_capacity(&mut self) -> usize {
        if self.entries.len() <= self.capacity {
            return 0;
        }
        let evicted = self.entries.len() - self.capacity;
        self.entries.truncate(self.capacity);
        info!(evicted, capacity = self.capacity, "Evicted oldest history entries");
        evicted
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> HistoryEntry {
        HistoryEntry::new(title, format!("Name: {title}"), None)
    }

    fn titles(log: &HistoryLog) -> Vec<&str> {
        log.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_append_is_most_recent_first() {
        let mut log = HistoryLog::new(10);
        log.append(entry("first"));
        log.append(entry("second"));
        assert_eq!(titles(&log), vec!["second", "first"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = HistoryLog::new(3);
        let mut evicted = 0;
        for i in 0..8 {
            evicted += log.append(entry(&format!("e{i}")));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(evicted, 5);
        assert_eq!(titles(&log), vec!["e7", "e6", "e5"]);
    }

    #[test]
    fn test_default_capacity() {
        let mut log = HistoryLog::default();
        for i in 0..(DEFAULT_HISTORY_CAPACITY + 5) {
            log.append(entry(&format!("e{i}")));
        }
        assert_eq!(log.len(), DEFAULT_HISTORY_CAPACITY);
        assert_eq!(log.get(0).unwrap().title, format!("e{}", DEFAULT_HISTORY_CAPACITY + 4));
        assert_eq!(log.get(DEFAULT_HISTORY_CAPACITY - 1).unwrap().title, "e5");
    }

    #[test]
    fn test_from_entries_and_set_capacity_truncate() {
        let entries: Vec<HistoryEntry> = (0..5).map(|i| entry(&format!("e{i}"))).collect();
        let mut log = HistoryLog::from_entries(entries, 4);
        assert_eq!(titles(&log), vec!["e0", "e1", "e2", "e3"]);

        log.set_capacity(2);
        assert_eq!(titles(&log), vec!["e0", "e1"]);

        log.set_capacity(0);
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut log = HistoryLog::new(5);
        log.append(entry("a"));
        log.append(entry("b"));

        let removed = log.remove_at(1).unwrap();
        assert_eq!(removed.title, "a");
        assert!(matches!(
            log.remove_at(3),
            Err(PwError::InvalidIndex { index: 3, len: 1 })
        ));

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_update_title() {
        let mut log = HistoryLog::new(5);
        log.append(entry("draft"));
        log.update_title(0, "final").unwrap();
        assert_eq!(log.get(0).unwrap().title, "final");
        assert!(log.update_title(1, "nope").is_err());
    }

    #[test]
    fn test_blank_rename_falls_back_to_timestamp() {
        let mut log = HistoryLog::new(5);
        log.append(entry("draft"));
        log.update_title(0, "  padded  ").unwrap();
        assert_eq!(log.get(0).unwrap().title, "padded");

        log.update_title(0, "   ").unwrap();
        let renamed = log.get(0).unwrap();
        assert_eq!(
            renamed.title,
            renamed.created_at.format("%Y-%m-%d %H:%M").to_string()
        );
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let mut log = HistoryLog::new(5);
        log.append(HistoryEntry::new("Knight", "Job: Guard", None));
        log.append(HistoryEntry::new("Mage", "Job: Wizard\nHome: Tower", None));
        log.append(HistoryEntry::new("Archer", "Home: forest", None));

        let hits: Vec<&str> = log.search("HOME").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(hits, vec!["Archer", "Mage"]);

        let hits: Vec<&str> = log.search("knight").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(hits, vec!["Knight"]);

        assert_eq!(log.search("").len(), 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_blank_title_and_instruction_defaults() {
        let e = HistoryEntry::new("  ", "Name: A", Some("   ".to_string()));
        assert!(!e.title.is_empty());
        assert_eq!(e.instruction, None);
    }
}
