//! Prompt template module.
//!
//! - `engine`: single-pass `{{name}}` substitution
//! - `variables`: the variable set used for persona prompts
//! - `preset`: built-in generate/refine templates

mod engine;
mod preset;
mod variables;

pub use engine::{render, tokens};
pub use preset::{DEFAULT_GENERATE_TEMPLATE, DEFAULT_REFINE_TEMPLATE, PromptKind};
pub use variables::PromptVariables;
