//! Line scanner for `Key: Value` text.

use tracing::debug;

use super::model::{AttributeDocument, DocumentBuilder};

/// Separators that open a new attribute. The full-width colon is common in
/// CJK model output.
const SEPARATORS: [char; 2] = [':', '：'];

/// Normalizes an attribute key: keeps letters, digits and whitespace, then
/// trims. Any script's letters and digits are kept.
pub fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

pub(crate) fn parse(raw: &str) -> AttributeDocument {
    let mut builder = DocumentBuilder::default();
    let mut current: Option<usize> = None;
    let mut dropped = 0usize;

    for line in raw.lines() {
        if is_fence(line) {
            dropped += 1;
            continue;
        }

        match line.split_once(SEPARATORS) {
            Some((key, value)) => {
                current = builder.start(key);
                match current {
                    Some(slot) => builder.push_line(slot, value.trim()),
                    None => dropped += 1,
                }
            }
            None => {
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                match current {
                    Some(slot) => builder.push_line(slot, text),
                    None => dropped += 1,
                }
            }
        }
    }

    let doc = builder.finish();
    debug!(attributes = doc.len(), dropped_lines = dropped, "Parsed attribute document");
    doc
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}
