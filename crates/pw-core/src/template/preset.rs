//! Built-in prompt templates.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Which kind of instruction is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PromptKind {
    /// Write a persona from scratch out of tags and a request.
    Generate,
    /// Modify the current draft according to a request.
    Refine,
}

pub const DEFAULT_GENERATE_TEMPLATE: &str = r#"You are writing the persona of {{user}}, who will interact with {{char}}.

Attributes to cover:
{{tags}}

Request from the user:
{{request}}

Reference material:
{{reference}}

Write the persona as plain "Key: Value" lines, one attribute per line.
Do not add commentary, headings or code fences."#;

pub const DEFAULT_REFINE_TEMPLATE: &str = r#"Here is the current persona of {{user}}, who interacts with {{char}}:

{{current}}

Apply this change request:
{{request}}

Reference material:
{{reference}}

Return the complete updated persona as plain "Key: Value" lines, one attribute per line.
Keep attributes that the request does not touch exactly as they are.
Do not add commentary, headings or code fences."#;

impl PromptKind {
    pub fn default_template(self) -> &'static str {
        match self {
            PromptKind::Generate => DEFAULT_GENERATE_TEMPLATE,
            PromptKind::Refine => DEFAULT_REFINE_TEMPLATE,
        }
    }
}
