//! `parlor assemble`: Build the model payload for a real transcript.

use std::io::Read;
use std::path::Path;

use parlor_core::{Error, TranscriptMessage};
use parlor_prompt::PromptAssembler;

pub fn run(
    config: Option<&Path>,
    transcript: &Path,
    condense: bool,
    chat: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config)?;
    let raw = read_source(transcript)?;
    let messages = parse_transcript(&raw)?;

    let assembler = PromptAssembler::new(condense || config.prompt.condense_prompt_entries);
    let result = assembler.assemble(&config.prompt.entries, &messages);
    tracing::info!(
        turns = messages.len(),
        total = result.messages.len(),
        injected = result.report.injected_count(),
        "Transcript assembled"
    );

    let output = if chat {
        serde_json::to_string_pretty(&result.to_chat_messages())?
    } else {
        serde_json::to_string_pretty(&result.messages)?
    };
    println!("{output}");

    Ok(())
}

fn read_source(path: &Path) -> Result<String, Error> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse a JSON array of transcript messages.
pub fn parse_transcript(raw: &str) -> Result<Vec<TranscriptMessage>, Error> {
    serde_json::from_str(raw).map_err(|e| Error::Transcript(e.to_string()))
}
