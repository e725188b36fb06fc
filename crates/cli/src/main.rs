//! Parlor CLI - the main entry point.
//!
//! Commands:
//! - `init`        - Write a default config file
//! - `preview`     - Show what the model will see over mock turns
//! - `assemble`    - Assemble a real transcript into a model payload
//! - `entries`     - List prompt entries and whether they fire
//! - `config`      - Show, validate, or locate the config file
//! - `completions` - Generate shell completions

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parlor",
    about = "Parlor — prompt structure assembly for character chats",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.parlor/config.toml
    #[arg(short, long, global = true, env = "PARLOR_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,

    /// Assemble configured entries over mock turns and print the structure
    Preview {
        /// Mock user/assistant exchanges (defaults to preview.turn_pairs)
        #[arg(short, long)]
        pairs: Option<usize>,

        /// Merge all entries into one system message
        #[arg(long)]
        condense: bool,

        /// Print messages and report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble a transcript (JSON array of messages) into the model payload
    Assemble {
        /// Transcript file, or `-` for stdin
        transcript: PathBuf,

        /// Merge all entries into one system message
        #[arg(long)]
        condense: bool,

        /// Print plain `{role, content}` messages without provenance
        #[arg(long)]
        chat: bool,
    },

    /// List prompt entries with their placement and status
    Entries {
        /// Mock user/assistant exchanges used to evaluate triggers
        #[arg(short, long)]
        pairs: Option<usize>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Validate the configuration and list warnings
    Validate,
    /// Print the config file path
    Path,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so JSON output on stdout stays clean)
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => commands::init::run(config)?,
        Commands::Preview {
            pairs,
            condense,
            json,
        } => commands::preview::run(config, pairs, condense, json)?,
        Commands::Assemble {
            transcript,
            condense,
            chat,
        } => commands::assemble::run(config, &transcript, condense, chat)?,
        Commands::Entries { pairs } => commands::entries::run(config, pairs)?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config)?,
            ConfigAction::Validate => commands::config_cmd::validate(config)?,
            ConfigAction::Path => commands::config_cmd::path(config)?,
        },
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "parlor", &mut std::io::stdout());
        }
    }

    Ok(())
}
