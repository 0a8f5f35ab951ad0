use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use clap::Args;
use colored::Colorize;
use pw_core::diff::resolve;
use pw_core::generation::GenerationProvider;
use pw_core::reference::{ReferenceEntry, collect_reference_text};
use pw_core::tag::{Tag, TagList};
use pw_core::template::{PromptKind, PromptVariables};
use tracing::debug;

use super::Context;
use super::utils::{ChoiceArgs, print_changes, print_summary, read_input};

/// Inputs of one generate/refine round.
#[derive(Args, Debug, Clone)]
pub struct RoundArgs {
    /// generate or refine
    #[arg(long, default_value = "refine")]
    pub kind: PromptKind,

    /// What the model should do this round
    #[arg(long, default_value = "")]
    pub request: String,

    /// Name of the persona
    #[arg(long, default_value = "User")]
    pub user: String,

    /// Name of the character the persona talks to
    #[arg(long = "char", default_value = "")]
    pub char_name: String,

    /// Attribute heading to cover, repeatable; defaults to the built-in list
    #[arg(long = "tag", value_name = "NAME[=HINT]")]
    pub tags: Vec<String>,

    /// Reference material: a JSON list of entries, or plain text
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Document to refine instead of the saved draft
    #[arg(long)]
    pub current: Option<PathBuf>,
}

impl RoundArgs {
    pub fn variables(&self) -> Result<PromptVariables> {
        let tags = if self.tags.is_empty() {
            TagList::default()
        } else {
            let mut list = TagList::empty();
            for raw in &self.tags {
                let tag = match raw.split_once('=') {
                    Some((name, hint)) => Tag::new(name, Some(hint.to_string())),
                    None => Tag::new(raw.as_str(), None),
                };
                if !list.add(tag) {
                    debug!(tag = %raw, "Skipping blank tag");
                }
            }
            list
        };

        let reference = match &self.reference {
            Some(path) => load_reference(path)?,
            None => String::new(),
        };
        let current = match &self.current {
            Some(path) => read_input(path)?,
            None => String::new(),
        };

        Ok(PromptVariables {
            user_name: self.user.clone(),
            char_name: self.char_name.clone(),
            tags: tags.render(),
            request: self.request.clone(),
            current,
            reference,
        })
    }
}

fn load_reference(path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if path.extension().is_some_and(|ext| ext == "json") {
        let entries: Vec<ReferenceEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as reference entries", path.display()))?;
        return Ok(collect_reference_text(&entries));
    }
    Ok(content.trim().to_string())
}

/// Replays a model reply captured in a file.
pub struct FileResponseProvider {
    reply: String,
}

impl FileResponseProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for FileResponseProvider {
    async fn generate(&self, instruction: &str) -> pw_core::error::Result<String> {
        debug!(instruction_len = instruction.len(), "Replaying captured response");
        Ok(self.reply.clone())
    }
}

pub fn prompt(ctx: &Context, round: &RoundArgs) -> Result<()> {
    let workshop = ctx.workshop()?;
    let mut vars = round.variables()?;
    if round.kind == PromptKind::Refine && vars.current.trim().is_empty() {
        vars.current = workshop.load_draft().document().serialize();
    }
    println!("{}", workshop.build_instruction(round.kind, &vars));
    Ok(())
}

pub async fn apply(
    ctx: &Context,
    round: &RoundArgs,
    response: &Path,
    choices: &ChoiceArgs,
    title: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let reply = read_input(response)?;
    let workshop = ctx.workshop_with(Arc::new(FileResponseProvider::new(reply)))?;
    let vars = round.variables()?;

    let mut proposal = match round.kind {
        PromptKind::Generate => workshop.generate(vars).await?,
        PromptKind::Refine => workshop.refine(vars).await?,
    };
    let overrides = choices.apply(&mut proposal.changes)?;

    print_changes(&proposal.changes);
    print_summary(&proposal.summary());

    if dry_run {
        println!("\n{}", "Result (not saved):".dimmed());
        println!("{}", resolve(&proposal.changes, &overrides).serialize());
        return Ok(());
    }

    let committed = workshop.commit(&proposal, &overrides, title)?;
    println!(
        "\n{} Saved draft with {} attributes",
        "✓".green(),
        committed.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir) -> Context {
        Context::new(
            Some(temp_dir.path().join("config.toml")),
            Some(temp_dir.path().join("store")),
        )
    }

    fn round(kind: PromptKind, request: &str) -> RoundArgs {
        RoundArgs {
            kind,
            request: request.to_string(),
            user: "Alice".to_string(),
            char_name: "Bob".to_string(),
            tags: Vec::new(),
            reference: None,
            current: None,
        }
    }

    #[test]
    fn test_variables_with_custom_tags() {
        let mut args = round(PromptKind::Generate, "a knight");
        args.tags = vec!["Name".to_string(), "Age=thirties".to_string(), "  ".to_string()];

        let vars = args.variables().unwrap();
        assert_eq!(vars.tags, "Name\nAge: thirties");
        assert_eq!(vars.user_name, "Alice");
        assert!(vars.current.is_empty());
    }

    #[test]
    fn test_reference_json_and_text() {
        let temp_dir = TempDir::new().unwrap();
        let json = temp_dir.path().join("world.json");
        fs::write(
            &json,
            r#"[{"source":"World","title":"Town","content":"A port city"},
                {"source":"World","title":"Off","content":"hidden","enabled":false}]"#,
        )
        .unwrap();
        let text = temp_dir.path().join("notes.txt");
        fs::write(&text, "  Rainy all year  \n").unwrap();

        assert_eq!(load_reference(&json).unwrap(), "[World - Town]\nA port city");
        assert_eq!(load_reference(&text).unwrap(), "Rainy all year");
    }

    #[tokio::test]
    async fn test_apply_generate_then_refine_keeping_old_value() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let first = temp_dir.path().join("first.txt");
        fs::write(&first, "Sure!\nName: Alice\nAge: 20").unwrap();
        let second = temp_dir.path().join("second.txt");
        fs::write(&second, "Name: Alice\nAge: 21\nJob: Baker").unwrap();

        apply(
            &ctx,
            &round(PromptKind::Generate, "a baker"),
            &first,
            &ChoiceArgs::default(),
            Some("first"),
            false,
        )
        .await
        .unwrap();

        let choices = ChoiceArgs {
            keep_old: vec!["Age".to_string()],
            set: Vec::new(),
        };
        apply(
            &ctx,
            &round(PromptKind::Refine, "give her a job"),
            &second,
            &choices,
            None,
            false,
        )
        .await
        .unwrap();

        let workshop = ctx.workshop().unwrap();
        assert_eq!(workshop.load_draft().text, "Name: Alice\nAge: 20\nJob: Baker");
        assert_eq!(workshop.history().len(), 2);
        assert_eq!(workshop.history().get(1).unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_dry_run_saves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir);
        let reply = temp_dir.path().join("reply.txt");
        fs::write(&reply, "Name: Alice").unwrap();

        apply(
            &ctx,
            &round(PromptKind::Generate, "x"),
            &reply,
            &ChoiceArgs::default(),
            None,
            true,
        )
        .await
        .unwrap();

        let workshop = ctx.workshop().unwrap();
        assert!(workshop.load_draft().is_empty());
        assert!(workshop.history().is_empty());
    }
}
