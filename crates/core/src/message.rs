//! Message domain types.
//!
//! These are the value objects that flow through prompt assembly:
//! the conversation supplies [`TranscriptMessage`]s → the assembler merges them
//! with prompt entries into [`AssembledMessage`]s → a model client sends the
//! resulting [`ChatMessage`]s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::PromptEntry;

/// The conversational role a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions (character card, rules, author's notes)
    System,
    /// The human participant
    User,
    /// A character played by the model
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        };
        f.write_str(s)
    }
}

/// A single message of an existing conversation.
///
/// Treated as read-only input by the assembler: it is copied into the output,
/// never modified in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content
    #[serde(default)]
    pub content: String,

    /// Speaking character in group chats
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When the message was sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            name: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Replace the generated ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attribute the message to a named character.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// One message of an assembled prompt.
///
/// Either a copy of a transcript message or a materialized prompt entry;
/// the provenance fields tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembledMessage {
    /// Transcript message ID, or the originating entry ID for injected messages
    pub id: String,

    pub role: Role,

    pub content: String,

    /// Speaking character, carried over from the transcript
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// True when this message came from a prompt entry
    pub is_injected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,

    /// Human-readable placement description (e.g. `in-chat (depth 2)`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection_info: Option<String>,
}

impl AssembledMessage {
    /// Copy a transcript message into the assembled prompt.
    pub fn from_transcript(message: &TranscriptMessage) -> Self {
        Self {
            id: message.id.clone(),
            role: message.role,
            content: message.content.clone(),
            name: message.name.clone(),
            is_injected: false,
            entry_id: None,
            injection_info: None,
        }
    }

    /// Materialize a prompt entry as an injected message.
    pub fn from_entry(entry: &PromptEntry, injection_info: impl Into<String>) -> Self {
        Self {
            id: entry.id.clone(),
            role: entry.role,
            content: entry.content.clone(),
            name: None,
            is_injected: true,
            entry_id: Some(entry.id.clone()),
            injection_info: Some(injection_info.into()),
        }
    }

    /// Strip provenance for transmission.
    pub fn to_chat(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// The `{role, content}` pair sent to a model-serving backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Convert an assembled prompt into the payload a provider client sends.
pub fn to_chat_messages(messages: &[AssembledMessage]) -> Vec<ChatMessage> {
    messages.iter().map(AssembledMessage::to_chat).collect()
}
