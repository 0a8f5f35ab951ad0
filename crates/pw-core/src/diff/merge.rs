//! Document comparison and change-set resolution.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::model::{ChangeRecord, ChangeSummary};
use crate::document::{AttributeDocument, normalize_key};

/// Compares two documents attribute by attribute.
///
/// Output order is every key of `old` in its order, followed by keys only
/// present in `new` in their order. Neither input is modified.
pub fn diff(old: &AttributeDocument, new: &AttributeDocument) -> Vec<ChangeRecord> {
    let mut records = Vec::with_capacity(old.len().max(new.len()));
    let mut seen: HashSet<&str> = HashSet::new();

    for attr in old {
        seen.insert(attr.key.as_str());
        records.push(ChangeRecord::new(
            attr.key.clone(),
            Some(attr.value.clone()),
            new.get(&attr.key).map(str::to_string),
        ));
    }

    for attr in new {
        if seen.contains(attr.key.as_str()) {
            continue;
        }
        records.push(ChangeRecord::new(
            attr.key.clone(),
            None,
            Some(attr.value.clone()),
        ));
    }

    let summary = ChangeSummary::from_records(&records);
    debug!(
        unchanged = summary.unchanged,
        modified = summary.modified,
        added = summary.added,
        removed = summary.removed,
        "Computed document diff"
    );
    records
}

/// Builds the final document from a change-set.
///
/// For each record the value is the entry in `overrides` when present and
/// non-empty, else the record's own override, else its selected option.
/// Records that end up empty are dropped, which is how an attribute is
/// deleted during a merge. Override keys are matched after normalization.
/// The result is built through [`AttributeDocument::from_pairs`], so an
/// override spanning several lines is scanned the same way a reloaded draft
/// would be.
pub fn resolve(records: &[ChangeRecord], overrides: &HashMap<String, String>) -> AttributeDocument {
    let overrides: HashMap<String, &str> = overrides
        .iter()
        .map(|(k, v)| (normalize_key(k), v.as_str()))
        .collect();

    AttributeDocument::from_pairs(records.iter().map(|record| {
        let value = match overrides.get(&record.key) {
            Some(text) if !text.trim().is_empty() => *text,
            _ => record.effective_value(),
        };
        (record.key.as_str(), value)
    }))
}
