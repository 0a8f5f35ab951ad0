//! Persona tags.
//!
//! Tags are the attribute headings a user wants the generated persona to
//! cover, optionally with a hint value (e.g. `Age: early twenties`). They
//! are rendered into the `{{tags}}` prompt variable.

use serde::{Deserialize, Serialize};

use crate::error::{PwError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            value: value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{}: {}", self.name, value),
            None => self.name.clone(),
        }
    }
}

/// An ordered list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl Default for TagList {
    fn default() -> Self {
        let tags = [
            "Name",
            "Gender",
            "Age",
            "Occupation",
            "Appearance",
            "Personality",
            "Background",
            "Relationships",
        ]
        .into_iter()
        .map(|name| Tag::new(name, None))
        .collect();
        Self { tags }
    }
}

impl TagList {
    pub fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Appends a tag. Tags with a blank name are ignored; returns whether
    /// the tag was added.
    pub fn add(&mut self, tag: Tag) -> bool {
        if tag.name.is_empty() {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, index: usize) -> Result<Tag> {
        if index >= self.tags.len() {
            return Err(PwError::invalid_index(index, self.tags.len()));
        }
        Ok(self.tags.remove(index))
    }

    /// Replaces the tag at `index`. A blank name removes the tag.
    pub fn update(&mut self, index: usize, name: &str, value: Option<String>) -> Result<()> {
        if index >= self.tags.len() {
            return Err(PwError::invalid_index(index, self.tags.len()));
        }
        let tag = Tag::new(name, value);
        if tag.name.is_empty() {
            self.tags.remove(index);
        } else {
            self.tags[index] = tag;
        }
        Ok(())
    }

    /// One `name: value` (or bare `name`) line per tag.
    pub fn render(&self) -> String {
        self.tags
            .iter()
            .map(Tag::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
