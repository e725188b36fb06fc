//! Assembly diagnostics.
//!
//! The assembler never fails, so misconfigured entries simply vanish from the
//! output. The report records what happened to each entry so a preview can
//! explain why something is missing.

use serde::{Deserialize, Serialize};

/// Why an entry did not contribute a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `enabled = false` and not a mandatory system prompt
    Disabled,
    /// Content is empty after trimming
    BlankContent,
    /// `injectionPosition` was not recognised
    UnknownPosition,
    /// Conditional or interval trigger not satisfied at this turn count
    TriggerNotMet,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Disabled => "disabled",
            Self::BlankContent => "blank content",
            Self::UnknownPosition => "unknown injection position",
            Self::TriggerNotMet => "trigger not met",
        };
        f.write_str(s)
    }
}

/// An entry that was left out of the assembled prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    pub entry_id: String,
    pub name: String,
    pub reason: SkipReason,
}

/// An in-chat entry that fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiredEntry {
    pub entry_id: String,
    /// Insertion point in the original transcript's index space.
    pub raw_position: usize,
}

/// What the assembler did with each entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyReport {
    /// Transcript length before injection.
    pub turn_count: usize,
    /// Whether condensation mode was used.
    pub condensed: bool,
    /// Messages placed before the transcript.
    pub relative_count: usize,
    /// In-chat entries spliced into the transcript.
    pub fired: Vec<FiredEntry>,
    /// Entries merged into the condensed system prompt.
    pub condensed_entries: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

impl AssemblyReport {
    pub fn new(turn_count: usize, condensed: bool) -> Self {
        Self {
            turn_count,
            condensed,
            ..Self::default()
        }
    }

    pub fn injected_count(&self) -> usize {
        self.fired.len()
    }

    pub(crate) fn skip(&mut self, entry: &parlor_core::PromptEntry, reason: SkipReason) {
        tracing::debug!(entry_id = %entry.id, %reason, "Prompt entry skipped");
        self.skipped.push(SkippedEntry {
            entry_id: entry.id.clone(),
            name: entry.name.clone(),
            reason,
        });
    }

    /// Look up why an entry was skipped, if it was.
    pub fn skip_reason(&self, entry_id: &str) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|s| s.entry_id == entry_id)
            .map(|s| s.reason)
    }
}
