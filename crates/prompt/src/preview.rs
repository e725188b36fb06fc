//! Structure preview for the prompt template editor.
//!
//! The editor has no real conversation to show, so it assembles the configured
//! entries over synthetic alternating user/assistant turns. That is enough to
//! visualize depth, conditional and interval behaviour.

use parlor_core::{AssembledMessage, PromptEntry, Role, TranscriptMessage};

use crate::assembler::{AssembledPrompt, PromptAssembler};

/// Longest content excerpt shown per row.
const EXCERPT_CHARS: usize = 60;

/// Build `turn_pairs` user/assistant exchanges with stable IDs.
pub fn mock_transcript(turn_pairs: usize) -> Vec<TranscriptMessage> {
    (1..=turn_pairs)
        .flat_map(|turn| {
            [
                mock_message(
                    format!("mock_user_{turn}"),
                    Role::User,
                    format!("Example user message #{turn}"),
                ),
                mock_message(
                    format!("mock_assistant_{turn}"),
                    Role::Assistant,
                    format!("Example character reply #{turn}"),
                ),
            ]
        })
        .collect()
}

fn mock_message(id: String, role: Role, content: String) -> TranscriptMessage {
    TranscriptMessage {
        id,
        role,
        content,
        name: None,
        timestamp: None,
    }
}

/// Assemble entries over `turn_pairs` mock exchanges.
pub fn preview(entries: &[PromptEntry], turn_pairs: usize, condense: bool) -> AssembledPrompt {
    PromptAssembler::new(condense).assemble(entries, &mock_transcript(turn_pairs))
}

/// Render an assembled prompt as a plain-text table.
pub fn render_structure(messages: &[AssembledMessage]) -> String {
    let mut out = format!("{:>3}  {:<9}  {:<44}  {}\n", "#", "ROLE", "SOURCE", "CONTENT");
    for (i, msg) in messages.iter().enumerate() {
        let source = match (&msg.entry_id, &msg.injection_info) {
            (Some(id), Some(info)) => format!("{info} [{id}]"),
            (Some(id), None) => format!("entry [{id}]"),
            _ => "transcript".to_string(),
        };
        out.push_str(&format!(
            "{:>3}  {:<9}  {:<44}  {}\n",
            i,
            msg.role.to_string(),
            source,
            excerpt(&msg.content)
        ));
    }
    out
}

/// First line of `content`, cut to [`EXCERPT_CHARS`] characters.
fn excerpt(content: &str) -> String {
    let first_line = content.trim().lines().next().unwrap_or("");
    let mut cut: String = first_line.chars().take(EXCERPT_CHARS).collect();
    let multiline = content.trim().lines().nth(1).is_some();
    if first_line.chars().count() > EXCERPT_CHARS || multiline {
        cut.push('…');
    }
    cut
}
