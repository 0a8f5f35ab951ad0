use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pw_core::diff::{ChangeKind, ChangeRecord, ChangeSummary};
use pw_core::document::normalize_key;

/// Reads a file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parses `KEY=VALUE`. The value may be empty and may contain `=`.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

/// Per-attribute decisions taken on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ChoiceArgs {
    /// Keep the previous value of an attribute, repeatable
    #[arg(long = "keep-old", value_name = "KEY")]
    pub keep_old: Vec<String>,

    /// Replace an attribute with custom text, repeatable
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,
}

impl ChoiceArgs {
    /// Applies `--keep-old` selections to `records` and returns the
    /// `--set` overrides. A key in either flag that names no record is an
    /// error.
    pub fn apply(&self, records: &mut [ChangeRecord]) -> Result<HashMap<String, String>> {
        for key in &self.keep_old {
            find_record(records, key)?.select_old();
        }
        for (key, _) in &self.set {
            find_record(records, key)?;
        }
        Ok(self.set.iter().cloned().collect())
    }
}

fn find_record<'a>(records: &'a mut [ChangeRecord], key: &str) -> Result<&'a mut ChangeRecord> {
    let wanted = normalize_key(key);
    records
        .iter_mut()
        .find(|r| r.key == wanted)
        .with_context(|| format!("No attribute named `{key}` in the change-set"))
}

pub fn print_changes(records: &[ChangeRecord]) {
    for record in records {
        let old = record.old.as_deref().unwrap_or_default();
        let new = record.new.as_deref().unwrap_or_default();
        match record.kind() {
            ChangeKind::Unchanged => println!("  {}: {}", record.key, old.dimmed()),
            ChangeKind::Added => println!("{} {}: {}", "+".green(), record.key.bold(), new.green()),
            ChangeKind::Removed => println!("{} {}: {}", "-".red(), record.key.bold(), old.red()),
            ChangeKind::Modified => {
                println!("{} {}", "~".yellow(), record.key.bold());
                println!("    {} {}", "-".red(), old.red());
                println!("    {} {}", "+".green(), new.green());
            }
        }
    }
}

pub fn print_summary(summary: &ChangeSummary) {
    println!(
        "\n{} modified, {} added, {} removed, {} unchanged",
        summary.modified.to_string().yellow(),
        summary.added.to_string().green(),
        summary.removed.to_string().red(),
        summary.unchanged
    );
}
