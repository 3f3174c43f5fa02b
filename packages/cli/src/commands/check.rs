use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{locator, ContentNode, Layout, PageDocument};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Page document (.json) to check
    pub input: PathBuf,

    /// Show node counts per kind
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn check(args: CheckArgs) -> Result<()> {
    println!("🔍 {} {}", "Checking".green().bold(), args.input.display());

    let document = PageDocument::load(&args.input)?;
    let duplicates = locator::duplicate_ids(&document.content);

    println!("   Top-level nodes: {}", document.content.len());
    println!("   Total nodes:     {}", document.node_count());
    println!("   Column slots:    {}", slot_count(&document.content));

    if args.verbose {
        println!();
        for (kind, count) in kind_counts(&document.content) {
            println!("   {:<22} {}", kind, count);
        }
    }

    println!();
    if duplicates.is_empty() {
        println!("✨ {} No duplicate ids", "Done".green().bold());
        return Ok(());
    }

    for id in &duplicates {
        println!("   {} duplicate id {}", "✗".red(), id.bright_white());
    }
    bail!("{} duplicate id(s) in {}", duplicates.len(), args.input.display())
}

fn kind_counts(nodes: &[ContentNode]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    locator::visit(nodes, |node, _| {
        *counts.entry(node.kind.as_str()).or_insert(0) += 1;
        false
    });
    counts
}

fn slot_count(nodes: &[ContentNode]) -> usize {
    let mut slots = 0;
    locator::visit(nodes, |node, _| {
        if let Layout::Slots(list) = &node.layout {
            slots += list.len();
        }
        false
    });
    slots
}
