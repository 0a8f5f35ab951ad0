use anyhow::{Result, bail};
use clap::Subcommand;
use colored::Colorize;
use pw_core::config::WeaverConfig;

use super::Context;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration and file locations
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(ctx: &Context, action: ConfigAction) -> Result<()> {
    let service = ctx.config_service()?;

    match action {
        ConfigAction::Show => {
            println!("{} {}", "config:".dimmed(), service.path().display());
            println!("{} {}", "store:".dimmed(), ctx.store_dir()?.display());
            println!();
            print!("{}", service.load()?.to_toml_string()?);
        }
        ConfigAction::Init { force } => {
            if service.path().exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    service.path().display()
                );
            }
            service.save(&WeaverConfig::default())?;
            println!("{} Wrote {}", "✓".green(), service.path().display());
        }
    }
    Ok(())
}
