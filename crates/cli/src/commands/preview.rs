//! `parlor preview`: Show the assembled prompt over mock turns.

use std::path::Path;

use parlor_prompt::{AssembledPrompt, AssemblyReport, preview, render_structure};

pub fn run(
    config: Option<&Path>,
    pairs: Option<usize>,
    condense: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config)?;
    let pairs = config.preview_pairs(pairs)?;
    let condense = condense || config.prompt.condense_prompt_entries;

    let result = preview(&config.prompt.entries, pairs, condense);

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&result))?);
        return Ok(());
    }

    println!(
        "Prompt structure — {} mock exchange(s), {} message(s){}",
        pairs,
        result.messages.len(),
        if condense { ", condensed" } else { "" }
    );
    println!();
    print!("{}", render_structure(&result.messages));
    println!();
    print!("{}", summarize(&result.report));

    Ok(())
}

fn to_json(result: &AssembledPrompt) -> serde_json::Value {
    serde_json::json!({
        "messages": result.messages,
        "report": result.report,
    })
}

/// One line per fired and skipped entry.
fn summarize(report: &AssemblyReport) -> String {
    let mut out = format!(
        "  Relative: {}   Injected: {}   Skipped: {}\n",
        report.relative_count,
        report.injected_count(),
        report.skipped.len()
    );
    for fired in &report.fired {
        out.push_str(&format!(
            "  ✅ {} inserted at transcript position {}\n",
            fired.entry_id, fired.raw_position
        ));
    }
    for skipped in &report.skipped {
        out.push_str(&format!("  ⏭️  {} — {}\n", skipped.entry_id, skipped.reason));
    }
    out
}
