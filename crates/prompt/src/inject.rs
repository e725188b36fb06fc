//! In-chat injection.
//!
//! Splices in-chat entries into the transcript at a depth measured from the
//! most recent message.
//!
//! # Algorithm
//!
//! 1. Evaluate each entry's trigger against `N`, the transcript length
//!    before any injection.
//! 2. For each firing entry compute `raw_position = max(0, N - depth)` in
//!    the original transcript's index space.
//! 3. Sort by `(raw_position, original_index)`.
//! 4. Merge the sorted insertions with the transcript: before copying
//!    transcript message `i`, emit every insertion whose position is `i`.
//!
//! Step 4 lands each entry exactly where left-to-right splicing with a
//! running offset would, without touching the caller's transcript. Entries
//! sharing a position keep their configured order.

use parlor_core::{AssembledMessage, Placement, PromptEntry, TranscriptMessage};

/// A firing entry and where it goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insertion<'a> {
    /// Position in the original transcript's index space.
    pub position: usize,
    /// Index of the entry within the in-chat bucket.
    pub index: usize,
    pub entry: &'a PromptEntry,
}

/// Sorted insertions for one transcript length.
#[derive(Debug, Default)]
pub struct InsertionPlan<'a> {
    /// Firing entries ordered by `(position, index)`.
    pub insertions: Vec<Insertion<'a>>,
    /// Entries whose trigger did not fire.
    pub not_fired: Vec<&'a PromptEntry>,
}

impl InsertionPlan<'_> {
    /// Build the injected transcript.
    ///
    /// The result has `transcript.len() + insertions.len()` messages.
    pub fn apply(&self, transcript: &[TranscriptMessage]) -> Vec<AssembledMessage> {
        let mut out = Vec::with_capacity(transcript.len() + self.insertions.len());
        let mut cursor = 0;

        for insertion in &self.insertions {
            let at = insertion.position.min(transcript.len());
            while cursor < at {
                out.push(AssembledMessage::from_transcript(&transcript[cursor]));
                cursor += 1;
            }
            out.push(AssembledMessage::from_entry(
                insertion.entry,
                insertion.entry.describe_injection(),
            ));
        }

        out.extend(transcript[cursor..].iter().map(AssembledMessage::from_transcript));
        out
    }
}

/// Evaluate triggers and compute insertion points for `turns` messages.
pub fn plan_insertions<'a>(turns: usize, in_chat: &[&'a PromptEntry]) -> InsertionPlan<'a> {
    let mut plan = InsertionPlan::default();

    for (index, &entry) in in_chat.iter().enumerate() {
        let (depth, trigger) = match entry.placement() {
            Placement::InChat { depth, trigger } => (depth, trigger),
            // Not in-chat; the partitioner keeps these out of the bucket.
            Placement::Relative | Placement::Inert => continue,
        };

        if !entry.has_content() || !trigger.fires(turns) {
            plan.not_fired.push(entry);
            continue;
        }

        plan.insertions.push(Insertion {
            position: turns.saturating_sub(depth),
            index,
            entry,
        });
    }

    plan.insertions.sort_by_key(|i| (i.position, i.index));
    plan
}

/// Splice firing in-chat entries into a copy of the transcript.
pub fn inject(transcript: &[TranscriptMessage], in_chat: &[&PromptEntry]) -> Vec<AssembledMessage> {
    plan_insertions(transcript.len(), in_chat).apply(transcript)
}
