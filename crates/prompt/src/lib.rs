//! Prompt structure assembly.
//!
//! Turns a list of configured [`PromptEntry`] records and a conversation
//! transcript into the ordered message list sent to a language model.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | 1. Partition | [`partition`] | `relative` and `in_chat` buckets, input order kept |
//! | 2. Condense (optional) | [`condense`] | One merged system entry replacing all others |
//! | 3. Inject | [`inject`] | Transcript with firing in-chat entries spliced in |
//! | 4. Assemble | [`assembler`] | Relative entries followed by the injected transcript |
//!
//! # Determinism
//!
//! Every stage is a pure function of its inputs: identical entries and
//! transcripts always produce identical output. Nothing is cached and no
//! state is shared between calls, so the assembler can be invoked on every
//! keystroke of a live preview or from several threads at once.
//!
//! [`PromptEntry`]: parlor_core::PromptEntry

pub mod assembler;
pub mod condense;
pub mod inject;
pub mod partition;
pub mod preview;
pub mod report;

pub use assembler::{AssembledPrompt, PromptAssembler, assemble};
pub use condense::{CONDENSED_ENTRY_ID, condense};
pub use inject::{Insertion, InsertionPlan, inject, plan_insertions};
pub use partition::{Partition, partition};
pub use preview::{mock_transcript, preview, render_structure};
pub use report::{AssemblyReport, FiredEntry, SkipReason, SkippedEntry};
