use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::engine::render;

/// Values available to persona prompt templates.
///
/// Each field maps to one token: `{{user}}`, `{{char}}`, `{{tags}}`,
/// `{{request}}`, `{{current}}`, `{{reference}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariables {
    /// Name of the persona being written.
    pub user_name: String,
    /// Name of the character the persona will talk to.
    pub char_name: String,
    /// Rendered tag list.
    pub tags: String,
    /// Free-text instruction for this round.
    pub request: String,
    /// Serialized current draft (refine only).
    pub current: String,
    /// Collected reference text.
    pub reference: String,
}

impl PromptVariables {
    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("user".to_string(), self.user_name.clone()),
            ("char".to_string(), self.char_name.clone()),
            ("tags".to_string(), self.tags.clone()),
            ("request".to_string(), self.request.clone()),
            ("current".to_string(), self.current.clone()),
            ("reference".to_string(), self.reference.clone()),
        ])
    }

    pub fn render(&self, template: &str) -> String {
        render(template, &self.to_map())
    }
}
