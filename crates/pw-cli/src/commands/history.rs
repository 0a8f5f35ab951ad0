use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use pw_core::error::PwError;
use pw_core::history::HistoryEntry;

use super::Context;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved drafts, newest first
    List,
    /// Find drafts whose title or text contains the query
    Search { query: String },
    /// Print one saved draft
    Show { index: usize },
    /// Save the current draft into history
    Snapshot {
        #[arg(long)]
        title: Option<String>,
    },
    /// Load a saved draft back as the current draft
    Restore { index: usize },
    /// Change the title of a saved draft
    Rename { index: usize, title: String },
    /// Delete one saved draft
    Remove { index: usize },
    /// Delete every saved draft
    Clear,
}

pub fn run(ctx: &Context, action: HistoryAction) -> Result<()> {
    let workshop = ctx.workshop()?;

    match action {
        HistoryAction::List => {
            let log = workshop.history();
            if log.is_empty() {
                println!("No saved drafts.");
            }
            for (index, entry) in log.iter().enumerate() {
                print_line(index, entry);
            }
        }
        HistoryAction::Search { query } => {
            let log = workshop.history();
            let hits = log.search(&query);
            if hits.is_empty() {
                println!("No drafts match \"{query}\".");
            }
            for entry in hits {
                let index = log.iter().position(|e| e.id == entry.id).unwrap_or_default();
                print_line(index, entry);
            }
        }
        HistoryAction::Show { index } => {
            let log = workshop.history();
            let entry = log
                .get(index)
                .ok_or_else(|| PwError::invalid_index(index, log.len()))?;
            println!("{}", entry.title.bold());
            if let Some(instruction) = &entry.instruction {
                println!("{} {}", "instruction:".dimmed(), instruction);
            }
            println!("\n{}", entry.text);
        }
        HistoryAction::Snapshot { title } => {
            let entry = workshop.snapshot(title.as_deref())?;
            println!("{} Saved as \"{}\"", "✓".green(), entry.title);
        }
        HistoryAction::Restore { index } => {
            let draft = workshop.restore(index)?;
            println!("{} Restored draft #{index}", "✓".green());
            println!("\n{}", draft.text);
        }
        HistoryAction::Rename { index, title } => {
            workshop.rename_history(index, &title)?;
            println!("{} Renamed #{index}", "✓".green());
        }
        HistoryAction::Remove { index } => {
            let removed = workshop.remove_history(index)?;
            println!("{} Removed \"{}\"", "✓".green(), removed.title);
        }
        HistoryAction::Clear => {
            workshop.clear_history()?;
            println!("{} History cleared", "✓".green());
        }
    }
    Ok(())
}

fn print_line(index: usize, entry: &HistoryEntry) {
    println!(
        "{:>3}  {}  {}",
        index.to_string().cyan(),
        entry.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        entry.title
    );
}
