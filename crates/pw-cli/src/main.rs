use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::utils::parse_key_val;
use commands::workshop::RoundArgs;

#[derive(Parser)]
#[command(name = "pw")]
#[command(about = "Persona Weaver - build persona sheets through reviewed AI edits", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the history and draft store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse Key: Value text and print the normalized document
    Parse {
        /// Input file, or - for stdin
        input: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Flatten multi-line values
        #[arg(long)]
        flat: bool,
    },
    /// Compare two documents attribute by attribute
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Print the change-set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Merge two documents, choosing per attribute
    Merge {
        old: PathBuf,
        new: PathBuf,
        #[command(flatten)]
        choices: commands::utils::ChoiceArgs,
        /// Save the result as the current draft and snapshot it
        #[arg(long)]
        commit: bool,
        /// Title of the history snapshot
        #[arg(long)]
        title: Option<String>,
    },
    /// Render a {{name}} template
    Render {
        template: PathBuf,
        /// Template variable, repeatable
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,
    },
    /// Print the instruction for a generate/refine round
    Prompt {
        #[command(flatten)]
        round: RoundArgs,
    },
    /// Apply a model response: show the change-set and commit it
    Apply {
        #[command(flatten)]
        round: RoundArgs,
        /// File holding the model's reply, or - for stdin
        #[arg(long)]
        response: PathBuf,
        #[command(flatten)]
        choices: commands::utils::ChoiceArgs,
        /// Title of the history snapshot
        #[arg(long)]
        title: Option<String>,
        /// Show the change-set without saving anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage saved drafts
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Manage the current draft
    Draft {
        #[command(subcommand)]
        action: commands::draft::DraftAction,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.config, cli.store);

    match cli.command {
        Commands::Parse { input, json, flat } => commands::document::parse(&input, json, flat)?,
        Commands::Diff { old, new, json } => commands::document::diff(&old, &new, json)?,
        Commands::Merge {
            old,
            new,
            choices,
            commit,
            title,
        } => commands::document::merge(&ctx, &old, &new, &choices, commit, title.as_deref())?,
        Commands::Render { template, vars } => commands::document::render(&template, vars)?,
        Commands::Prompt { round } => commands::workshop::prompt(&ctx, &round)?,
        Commands::Apply {
            round,
            response,
            choices,
            title,
            dry_run,
        } => {
            commands::workshop::apply(&ctx, &round, &response, &choices, title.as_deref(), dry_run)
                .await?
        }
        Commands::History { action } => commands::history::run(&ctx, action)?,
        Commands::Draft { action } => commands::draft::run(&ctx, action)?,
        Commands::Config { action } => commands::config::run(&ctx, action)?,
    }

    Ok(())
}
