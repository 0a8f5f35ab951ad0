//! Attribute document domain model.
//!
//! An `AttributeDocument` is one revision of a persona's structured
//! description. Documents are immutable; every edit builds a new one.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::parser::{self, normalize_key};

/// A single named field of a persona description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// An ordered, key-unique mapping from attribute key to value.
///
/// Invariants upheld by every constructor:
/// - keys are unique and non-empty after normalization
/// - values are non-empty after trimming
/// - insertion order (position of first occurrence) is preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeDocument {
    attributes: Vec<Attribute>,
}

impl AttributeDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses free-form `Key: Value` text. Never fails; lines that cannot be
    /// attached to an attribute are dropped.
    pub fn parse(raw: &str) -> Self {
        parser::parse(raw)
    }

    /// Builds a document from key/value pairs.
    ///
    /// Each pair is written out as a `Key: Value` line and the whole text is
    /// run through [`parse`](Self::parse), so a value spanning several lines
    /// is scanned exactly as it would be after a save and reload: lines are
    /// trimmed, blank lines dropped, and an embedded `Other: x` line opens its
    /// own attribute. Pairs whose key normalizes to nothing are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut text = String::new();
        for (key, value) in pairs {
            let key = normalize_key(key.as_ref());
            if key.is_empty() {
                continue;
            }
            text.push_str(&key);
            text.push_str(": ");
            text.push_str(value.as_ref());
            text.push('\n');
        }
        parser::parse(&text)
    }

    /// Returns the value for `key`, matching on the normalized form.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = normalize_key(key);
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.key.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// One `Key: Value` line per attribute, in document order. Multi-line
    /// values are written as-is so that parsing the result reproduces them
    /// as continuation lines.
    pub fn serialize(&self) -> String {
        self.attributes
            .iter()
            .map(|a| format!("{}: {}", a.key, a.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Like [`serialize`](Self::serialize), but every value is flattened to
    /// a single line for display surfaces that cannot show line breaks.
    pub fn serialize_flat(&self) -> String {
        self.attributes
            .iter()
            .map(|a| {
                let flat = a
                    .value
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("{}: {}", a.key, flat)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for AttributeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl<'a> IntoIterator for &'a AttributeDocument {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// Accumulates attributes while enforcing last-value-wins at the position of
/// the first occurrence.
#[derive(Default)]
pub(crate) struct DocumentBuilder {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl DocumentBuilder {
    /// Opens (or reopens) the attribute for `raw_key` and returns its slot.
    ///
    /// Reopening an existing key discards its previous value. Returns `None`
    /// when the key is empty after normalization.
    pub(crate) fn start(&mut self, raw_key: &str) -> Option<usize> {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return None;
        }

        if let Some(&slot) = self.positions.get(&key) {
            self.entries[slot].1.clear();
            return Some(slot);
        }

        let slot = self.entries.len();
        self.positions.insert(key.clone(), slot);
        self.entries.push((key, Vec::new()));
        Some(slot)
    }

    pub(crate) fn push_line(&mut self, slot: usize, line: &str) {
        if let Some((_, lines)) = self.entries.get_mut(slot) {
            lines.push(line.to_string());
        }
    }

    /// Joins, trims and prunes empty values.
    pub(crate) fn finish(self) -> AttributeDocument {
        let attributes = self
            .entries
            .into_iter()
            .filter_map(|(key, lines)| {
                let value = lines.join("\n").trim().to_string();
                (!value.is_empty()).then_some(Attribute { key, value })
            })
            .collect();
        AttributeDocument { attributes }
    }
}
