//! Prompt assembly: the orchestrating stage.
//!
//! Produces the final message list:
//!
//! 1. **Working set**: all active entries, or the single condensed entry
//!    when condensation is on
//! 2. **Partition** into relative and in-chat buckets
//! 3. **Relative** entries first, in configured order
//! 4. **Transcript** with firing in-chat entries spliced in
//!
//! Assembly never fails. Entries that cannot contribute are dropped and
//! recorded in the [`AssemblyReport`].

use parlor_core::{AssembledMessage, ChatMessage, PromptEntry, TranscriptMessage, to_chat_messages};

use crate::condense::condense;
use crate::inject::plan_insertions;
use crate::partition::partition;
use crate::report::{AssemblyReport, FiredEntry, SkipReason};

/// An assembled prompt and how it was built.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub messages: Vec<AssembledMessage>,
    pub report: AssemblyReport,
}

impl AssembledPrompt {
    /// The provider payload for this prompt.
    pub fn to_chat_messages(&self) -> Vec<ChatMessage> {
        to_chat_messages(&self.messages)
    }
}

/// The prompt assembler. Stateless; create one and reuse it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAssembler {
    condense: bool,
}

impl PromptAssembler {
    /// Create an assembler; `condense` merges every entry into one system message.
    pub fn new(condense: bool) -> Self {
        Self { condense }
    }

    pub fn condenses(&self) -> bool {
        self.condense
    }

    /// Assemble entries and a transcript into the message list for a model.
    pub fn assemble(
        &self,
        entries: &[PromptEntry],
        transcript: &[TranscriptMessage],
    ) -> AssembledPrompt {
        let turns = transcript.len();
        let mut report = AssemblyReport::new(turns, self.condense);

        let condensed = if self.condense {
            condense(entries)
        } else {
            None
        };

        let working: Vec<&PromptEntry> = if self.condense {
            for entry in entries {
                if !entry.is_active() {
                    report.skip(entry, SkipReason::Disabled);
                } else if !entry.has_content() {
                    report.skip(entry, SkipReason::BlankContent);
                } else {
                    report.condensed_entries.push(entry.id.clone());
                }
            }
            condensed.iter().collect()
        } else {
            entries
                .iter()
                .filter(|entry| {
                    if entry.is_active() {
                        true
                    } else {
                        report.skip(entry, SkipReason::Disabled);
                        false
                    }
                })
                .collect()
        };

        let buckets = partition(working);
        for (entry, reason) in &buckets.excluded {
            report.skip(entry, *reason);
        }

        let plan = plan_insertions(turns, &buckets.in_chat);
        for entry in &plan.not_fired {
            report.skip(entry, SkipReason::TriggerNotMet);
        }

        let mut messages = Vec::with_capacity(buckets.relative.len() + turns + plan.insertions.len());
        messages.extend(
            buckets
                .relative
                .iter()
                .map(|entry| AssembledMessage::from_entry(entry, entry.describe_injection())),
        );
        messages.extend(plan.apply(transcript));

        report.relative_count = buckets.relative.len();
        report.fired = plan
            .insertions
            .iter()
            .map(|i| FiredEntry {
                entry_id: i.entry.id.clone(),
                raw_position: i.position,
            })
            .collect();

        tracing::debug!(
            turns,
            condensed = self.condense,
            relative = report.relative_count,
            injected = report.injected_count(),
            skipped = report.skipped.len(),
            total = messages.len(),
            "Prompt assembled"
        );

        AssembledPrompt { messages, report }
    }
}

/// Assemble without the report.
pub fn assemble(
    entries: &[PromptEntry],
    transcript: &[TranscriptMessage],
    condense: bool,
) -> Vec<AssembledMessage> {
    PromptAssembler::new(condense)
        .assemble(entries, transcript)
        .messages
}
