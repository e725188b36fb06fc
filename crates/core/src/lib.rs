//! # Parlor Core
//!
//! Domain types and error definitions for Parlor's prompt assembly.
//! This crate has **no framework dependencies**. It defines the records
//! that flow between the configuration layer, the assembly pipeline and
//! whatever model client ends up sending the result.
//!
//! ## Records
//!
//! - [`PromptEntry`]: a configured fragment of instructions with a
//!   positioning rule ([`InjectionPosition`]).
//! - [`TranscriptMessage`]: one message of an existing conversation.
//! - [`AssembledMessage`]: one message of the final prompt, with provenance.
//! - [`ChatMessage`]: the provenance-free `{role, content}` pair a provider
//!   client actually transmits.

pub mod entry;
pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use entry::{InjectionPosition, Placement, PromptEntry, Trigger};
pub use error::{Error, Result};
pub use message::{AssembledMessage, ChatMessage, Role, TranscriptMessage, to_chat_messages};
