//! Entry partitioning.
//!
//! Splits configured entries into the two placement buckets. Entries that
//! cannot contribute (inactive, blank, unknown position) are set aside with
//! the reason they were dropped.

use parlor_core::{Placement, PromptEntry};

use crate::report::SkipReason;

/// The result of partitioning, borrowing from the input entries.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Entries placed before the transcript, in input order.
    pub relative: Vec<&'a PromptEntry>,
    /// Entries spliced into the transcript, in input order.
    pub in_chat: Vec<&'a PromptEntry>,
    /// Entries in neither bucket.
    pub excluded: Vec<(&'a PromptEntry, SkipReason)>,
}

/// Partition entries into `relative` and `in_chat` buckets.
///
/// An entry is dropped when it is disabled and not a system prompt, or when
/// its content is blank after trimming. Unknown positions land in neither
/// bucket. Never fails.
pub fn partition<'a, I>(entries: I) -> Partition<'a>
where
    I: IntoIterator<Item = &'a PromptEntry>,
{
    let mut out = Partition::default();

    for entry in entries {
        if !entry.is_active() {
            out.excluded.push((entry, SkipReason::Disabled));
            continue;
        }
        if !entry.has_content() {
            out.excluded.push((entry, SkipReason::BlankContent));
            continue;
        }
        match entry.placement() {
            Placement::Relative => out.relative.push(entry),
            Placement::InChat { .. } => out.in_chat.push(entry),
            Placement::Inert => out.excluded.push((entry, SkipReason::UnknownPosition)),
        }
    }

    out
}
