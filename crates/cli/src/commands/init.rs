//! `parlor init`: Write a default configuration file.

use std::path::Path;

use parlor_config::AppConfig;

pub fn run(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = super::config_file(config);

    println!("Parlor — First-Time Setup");
    println!("=========================\n");

    if let Some(dir) = config_path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        std::fs::create_dir_all(dir)?;
        println!("✅ Created config directory: {}", dir.display());
    }

    if config_path.exists() {
        println!("⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
        return Ok(());
    }

    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("✅ Created config.toml at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Edit the [[prompt.entries]] tables to describe your character");
    println!("   2. Run `parlor preview` to see what the model will receive");
    println!("   3. Run `parlor config validate` to check for inert entries");

    Ok(())
}
