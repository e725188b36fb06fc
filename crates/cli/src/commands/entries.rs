//! `parlor entries`: List prompt entries and what happens to each.

use std::path::Path;

use parlor_core::{Placement, PromptEntry};
use parlor_prompt::{AssemblyReport, preview};

pub fn run(config: Option<&Path>, pairs: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config)?;
    let pairs = config.preview_pairs(pairs)?;
    let condense = config.prompt.condense_prompt_entries;
    let entries = &config.prompt.entries;

    let result = preview(entries, pairs, condense);

    println!(
        "Prompt entries — evaluated at {} message(s){}",
        result.report.turn_count,
        if condense { ", condensed" } else { "" }
    );
    println!("==============================================");
    if entries.is_empty() {
        println!("  (no entries configured)");
        return Ok(());
    }
    for entry in entries {
        println!(
            "  {:<20} {:<10} {:<44} {}",
            entry.id,
            entry.role.to_string(),
            entry.describe_injection(),
            status(entry, &result.report)
        );
    }

    Ok(())
}

/// What assembly did with `entry`.
fn status(entry: &PromptEntry, report: &AssemblyReport) -> String {
    if let Some(reason) = report.skip_reason(&entry.id) {
        return format!("skipped ({reason})");
    }
    if report.condensed_entries.iter().any(|id| id == &entry.id) {
        return "condensed".into();
    }
    if let Some(fired) = report.fired.iter().find(|f| f.entry_id == entry.id) {
        return format!("fires at position {}", fired.raw_position);
    }
    match entry.placement() {
        Placement::Relative => "placed before transcript".into(),
        Placement::InChat { .. } | Placement::Inert => "not placed".into(),
    }
}
