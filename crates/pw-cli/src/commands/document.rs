use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use pw_core::diff::{ChangeSummary, diff as diff_documents, resolve};
use pw_core::document::AttributeDocument;
use pw_core::template::{render as render_template, tokens};

use super::Context;
use super::utils::{ChoiceArgs, print_changes, print_summary, read_input};

pub fn parse(input: &Path, json: bool, flat: bool) -> Result<()> {
    let document = AttributeDocument::parse(&read_input(input)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else if flat {
        println!("{}", document.serialize_flat());
    } else {
        println!("{}", document.serialize());
    }
    Ok(())
}

pub fn diff(old: &Path, new: &Path, json: bool) -> Result<()> {
    let old = AttributeDocument::parse(&read_input(old)?);
    let new = AttributeDocument::parse(&read_input(new)?);
    let records = diff_documents(&old, &new);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_changes(&records);
        print_summary(&ChangeSummary::from_records(&records));
    }
    Ok(())
}

pub fn merge(
    ctx: &Context,
    old: &Path,
    new: &Path,
    choices: &ChoiceArgs,
    commit: bool,
    title: Option<&str>,
) -> Result<()> {
    let old = AttributeDocument::parse(&read_input(old)?);
    let new = AttributeDocument::parse(&read_input(new)?);
    let mut records = diff_documents(&old, &new);
    let overrides = choices.apply(&mut records)?;
    let merged = resolve(&records, &overrides);

    println!("{}", merged.serialize());

    if commit {
        let workshop = ctx.workshop()?;
        workshop.save_draft(&merged.serialize(), "")?;
        let entry = workshop.snapshot(title)?;
        eprintln!("{} Saved as \"{}\"", "✓".green(), entry.title);
    }
    Ok(())
}

pub fn render(template: &Path, vars: Vec<(String, String)>) -> Result<()> {
    let template = read_input(template)?;
    let vars: HashMap<String, String> = vars.into_iter().collect();

    for name in tokens(&template) {
        if !vars.contains_key(&name) {
            eprintln!("{} {{{{{}}}}} has no value and is left as is", "warning:".yellow(), name);
        }
    }
    println!("{}", render_template(&template, &vars));
    Ok(())
}
