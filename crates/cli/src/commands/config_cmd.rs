//! `parlor config`: Configuration management commands.

use std::path::Path;

pub fn validate(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match super::load_config(config) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let warnings = config.warnings();
            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            let active = config
                .prompt
                .entries
                .iter()
                .filter(|e| e.is_active() && e.has_content())
                .count();

            println!();
            println!("   Entries:   {} ({} active)", config.prompt.entries.len(), active);
            println!(
                "   Condense:  {}",
                if config.prompt.condense_prompt_entries { "on" } else { "off" }
            );
            println!("   Preview:   {} mock exchange(s)", config.preview.turn_pairs);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", super::config_file(config).display());
    Ok(())
}
