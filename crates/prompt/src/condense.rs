//! Prompt condensation.
//!
//! Some provider and model combinations accept only a single system message.
//! Condensation merges every participating entry into one, in configured
//! order, regardless of each entry's own position or role.

use parlor_core::{InjectionPosition, PromptEntry, Role};

/// ID of the synthetic entry produced by [`condense`].
pub const CONDENSED_ENTRY_ID: &str = "entry_condensed_system";

/// Separator placed between merged entry contents.
const SEPARATOR: &str = "\n\n";

/// Merge all active entries into one relative system entry.
///
/// Returns `None` when nothing with content participates.
pub fn condense(entries: &[PromptEntry]) -> Option<PromptEntry> {
    let merged = entries
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    if merged.trim().is_empty() {
        return None;
    }

    Some(PromptEntry {
        id: CONDENSED_ENTRY_ID.into(),
        name: "Condensed System Prompt".into(),
        role: Role::System,
        content: merged,
        enabled: true,
        is_system_prompt: true,
        injection_position: InjectionPosition::Relative,
        injection_depth: 0,
        conditional_min_messages: None,
        interval_turns: None,
    })
}
