use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use pw_core::document::AttributeDocument;

use super::Context;
use super::utils::read_input;

#[derive(Subcommand)]
pub enum DraftAction {
    /// Print the current draft
    Show,
    /// Replace the current draft with the parsed contents of a file
    Save {
        /// Input file, or - for stdin
        input: PathBuf,
        /// Instruction to remember with the draft
        #[arg(long, default_value = "")]
        instruction: String,
    },
    /// Discard the current draft
    Clear,
}

pub fn run(ctx: &Context, action: DraftAction) -> Result<()> {
    let workshop = ctx.workshop()?;

    match action {
        DraftAction::Show => {
            let draft = workshop.load_draft();
            if draft.is_empty() {
                println!("No draft saved.");
                return Ok(());
            }
            if let Some(updated_at) = draft.updated_at {
                println!(
                    "{} {}",
                    "updated:".dimmed(),
                    updated_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
            if !draft.instruction.is_empty() {
                println!("{} {}", "instruction:".dimmed(), draft.instruction);
            }
            println!("\n{}", draft.text);
        }
        DraftAction::Save { input, instruction } => {
            let document = AttributeDocument::parse(&read_input(&input)?);
            workshop.save_draft(&document.serialize(), &instruction)?;
            println!("{} Saved {} attributes", "✓".green(), document.len());
        }
        DraftAction::Clear => {
            workshop.clear_draft()?;
            println!("{} Draft cleared", "✓".green());
        }
    }
    Ok(())
}
