//! Prompt entry domain types.
//!
//! A [`PromptEntry`] is the flat record the configuration layer stores. Its
//! positioning fields are interpreted through [`PromptEntry::placement`], which
//! folds `injectionPosition` and the trigger fields into one tagged
//! [`Placement`] so the assembler can match on it exhaustively.

use serde::{Deserialize, Deserializer, Serialize};

use crate::message::Role;

/// Where (and when) an entry is placed in the assembled prompt.
///
/// Stored as a camelCase string. Values this build does not recognise are
/// kept verbatim in [`InjectionPosition::Unknown`] so a load/save cycle
/// writes them back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InjectionPosition {
    /// Before the transcript, in configured order
    #[default]
    Relative,
    /// Inside the transcript, every turn
    InChat,
    /// Inside the transcript, once enough messages exist
    Conditional,
    /// Inside the transcript, every N turns
    Interval,
    /// Any other value. Such entries are inert.
    Unknown(String),
}

impl InjectionPosition {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Relative => "relative",
            Self::InChat => "inChat",
            Self::Conditional => "conditional",
            Self::Interval => "interval",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for InjectionPosition {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "relative" => Self::Relative,
            "inChat" => Self::InChat,
            "conditional" => Self::Conditional,
            "interval" => Self::Interval,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<InjectionPosition> for String {
    fn from(position: InjectionPosition) -> Self {
        match position {
            InjectionPosition::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for InjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured fragment of instructions contributing to the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptEntry {
    pub id: String,

    /// Display label, not used during assembly
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_role")]
    pub role: Role,

    #[serde(default)]
    pub content: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Mandatory baseline prompt: participates even when disabled
    #[serde(default)]
    pub is_system_prompt: bool,

    #[serde(default)]
    pub injection_position: InjectionPosition,

    /// Messages back from the end of the transcript to insert before
    #[serde(default, deserialize_with = "lenient_count")]
    pub injection_depth: usize,

    /// Minimum turn count for `conditional` entries (unset means 1)
    #[serde(
        default,
        deserialize_with = "lenient_count_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub conditional_min_messages: Option<usize>,

    /// Period for `interval` entries
    #[serde(
        default,
        deserialize_with = "lenient_count_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval_turns: Option<usize>,
}

/// A count field that tolerates out-of-range integers.
///
/// Negative values clamp to 0 and values beyond `usize` saturate, so one
/// hand-edited entry cannot stop the rest of the file from loading. A
/// zero depth appends at the end, a zero minimum always fires and a zero
/// interval never fires.
struct LenientCount(usize);

impl<'de> Deserialize<'de> for LenientCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = LenientCount;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("an integer")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<LenientCount, E> {
                Ok(LenientCount(usize::try_from(v.max(0)).unwrap_or(usize::MAX)))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<LenientCount, E> {
                Ok(LenientCount(usize::try_from(v).unwrap_or(usize::MAX)))
            }
        }

        deserializer.deserialize_i64(Visitor)
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    LenientCount::deserialize(deserializer).map(|count| count.0)
}

fn lenient_count_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    Option::<LenientCount>::deserialize(deserializer).map(|count| count.map(|c| c.0))
}

fn default_role() -> Role {
    Role::System
}
fn default_true() -> bool {
    true
}

/// When an in-chat entry fires, given the transcript length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Always,
    /// Fires once the transcript has at least this many messages.
    MinMessages(usize),
    /// Fires when the transcript length is a positive multiple of this value.
    EveryTurns(usize),
}

impl Trigger {
    /// Evaluate the trigger against a turn count.
    pub fn fires(&self, turns: usize) -> bool {
        match *self {
            Self::Always => true,
            Self::MinMessages(min) => turns >= min,
            Self::EveryTurns(every) => every > 0 && turns > 0 && turns % every == 0,
        }
    }
}

/// The resolved positioning rule of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Anchored before the transcript.
    Relative,
    /// Spliced into the transcript `depth` messages from the end.
    InChat { depth: usize, trigger: Trigger },
    /// Unknown position; never placed.
    Inert,
}

impl PromptEntry {
    fn with_position(
        id: impl Into<String>,
        content: impl Into<String>,
        position: InjectionPosition,
        depth: usize,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            role: Role::System,
            content: content.into(),
            enabled: true,
            is_system_prompt: false,
            injection_position: position,
            injection_depth: depth,
            conditional_min_messages: None,
            interval_turns: None,
        }
    }

    /// An entry placed before the transcript.
    pub fn relative(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_position(id, content, InjectionPosition::Relative, 0)
    }

    /// An entry injected every turn at `depth`.
    pub fn in_chat(id: impl Into<String>, content: impl Into<String>, depth: usize) -> Self {
        Self::with_position(id, content, InjectionPosition::InChat, depth)
    }

    /// An entry injected at `depth` once the transcript has `min_messages` messages.
    pub fn conditional(
        id: impl Into<String>,
        content: impl Into<String>,
        depth: usize,
        min_messages: usize,
    ) -> Self {
        let mut entry = Self::with_position(id, content, InjectionPosition::Conditional, depth);
        entry.conditional_min_messages = Some(min_messages);
        entry
    }

    /// An entry injected at `depth` whenever the turn count is a multiple of `every`.
    pub fn interval(
        id: impl Into<String>,
        content: impl Into<String>,
        depth: usize,
        every: usize,
    ) -> Self {
        let mut entry = Self::with_position(id, content, InjectionPosition::Interval, depth);
        entry.interval_turns = Some(every);
        entry
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark as a mandatory baseline system prompt.
    pub fn as_system_prompt(mut self) -> Self {
        self.is_system_prompt = true;
        self
    }

    /// Whether the entry participates at all.
    pub fn is_active(&self) -> bool {
        self.enabled || self.is_system_prompt
    }

    /// Whether the entry has non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Resolve `injectionPosition` and trigger fields into a [`Placement`].
    pub fn placement(&self) -> Placement {
        let depth = self.injection_depth;
        match self.injection_position {
            InjectionPosition::Relative => Placement::Relative,
            InjectionPosition::InChat => Placement::InChat {
                depth,
                trigger: Trigger::Always,
            },
            InjectionPosition::Conditional => Placement::InChat {
                depth,
                trigger: Trigger::MinMessages(self.conditional_min_messages.unwrap_or(1)),
            },
            InjectionPosition::Interval => Placement::InChat {
                depth,
                trigger: Trigger::EveryTurns(self.interval_turns.unwrap_or(0)),
            },
            InjectionPosition::Unknown(_) => Placement::Inert,
        }
    }

    /// Human-readable placement, used as `injectionInfo` on assembled messages.
    pub fn describe_injection(&self) -> String {
        match self.placement() {
            Placement::Relative => "relative".into(),
            Placement::InChat {
                depth,
                trigger: Trigger::Always,
            } => format!("in-chat (depth {depth})"),
            Placement::InChat {
                depth,
                trigger: Trigger::MinMessages(min),
            } => format!("conditional (min {min} messages, depth {depth})"),
            Placement::InChat {
                depth,
                trigger: Trigger::EveryTurns(every),
            } => format!("interval (every {every} turns, depth {depth})"),
            Placement::Inert => "inactive (unknown position)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_record_uses_defaults() {
        let entry: PromptEntry = serde_json::from_str(r#"{"id":"e1"}"#).unwrap();
        assert_eq!(entry.role, Role::System);
        assert!(entry.enabled);
        assert!(!entry.is_system_prompt);
        assert_eq!(entry.injection_position, InjectionPosition::Relative);
        assert_eq!(entry.injection_depth, 0);
        assert!(entry.conditional_min_messages.is_none());
    }

    #[test]
    fn bridge_record_parses() {
        let json = r#"{
            "id": "author_note",
            "name": "Author's Note",
            "role": "user",
            "content": "[Style: terse]",
            "enabled": true,
            "isSystemPrompt": false,
            "injectionPosition": "interval",
            "injectionDepth": 4,
            "conditionalMinMessages": null,
            "intervalTurns": 5
        }"#;
        let entry: PromptEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.injection_position, InjectionPosition::Interval);
        assert_eq!(entry.interval_turns, Some(5));
        assert_eq!(
            entry.placement(),
            Placement::InChat {
                depth: 4,
                trigger: Trigger::EveryTurns(5)
            }
        );
    }

    #[test]
    fn unknown_position_is_inert() {
        let json = r#"{"id":"x","content":"hi","injectionPosition":"afterCharacter"}"#;
        let entry: PromptEntry = serde_json::from_str(json).unwrap();
        assert_eq!(
            entry.injection_position,
            InjectionPosition::Unknown("afterCharacter".into())
        );
        assert_eq!(entry.placement(), Placement::Inert);
    }

    #[test]
    fn unknown_position_written_back_verbatim() {
        let json = r#"{"id":"x","content":"hi","injectionPosition":"afterCharacter"}"#;
        let entry: PromptEntry = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["injectionPosition"], "afterCharacter");
        assert_eq!(entry.injection_position.to_string(), "afterCharacter");
    }

    #[test]
    fn negative_counts_clamp_instead_of_failing() {
        let json = r#"[
            {"id":"d","content":"x","injectionPosition":"inChat","injectionDepth":-1},
            {"id":"c","content":"x","injectionPosition":"conditional","conditionalMinMessages":-3},
            {"id":"i","content":"x","injectionPosition":"interval","intervalTurns":-5}
        ]"#;
        let entries: Vec<PromptEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].injection_depth, 0);
        assert_eq!(
            entries[0].placement(),
            Placement::InChat {
                depth: 0,
                trigger: Trigger::Always
            }
        );

        assert_eq!(entries[1].conditional_min_messages, Some(0));
        assert!(matches!(
            entries[1].placement(),
            Placement::InChat { trigger, .. } if trigger.fires(0)
        ));

        assert_eq!(entries[2].interval_turns, Some(0));
        assert!(matches!(
            entries[2].placement(),
            Placement::InChat { trigger, .. } if !trigger.fires(5)
        ));
    }

    #[test]
    fn null_and_missing_counts_stay_unset() {
        let json = r#"{"id":"c","injectionPosition":"conditional","conditionalMinMessages":null}"#;
        let entry: PromptEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.conditional_min_messages, None);
        assert_eq!(entry.interval_turns, None);
    }

    #[test]
    fn conditional_defaults_to_one_message() {
        let mut entry = PromptEntry::conditional("c", "text", 0, 3);
        entry.conditional_min_messages = None;
        assert_eq!(
            entry.placement(),
            Placement::InChat {
                depth: 0,
                trigger: Trigger::MinMessages(1)
            }
        );
    }

    #[test]
    fn min_messages_trigger() {
        let trigger = Trigger::MinMessages(10);
        assert!(!trigger.fires(3));
        assert!(trigger.fires(10));
        assert!(trigger.fires(11));
    }

    #[test]
    fn interval_trigger_boundaries() {
        let trigger = Trigger::EveryTurns(5);
        for turns in [5, 10, 15, 100] {
            assert!(trigger.fires(turns), "should fire at {turns}");
        }
        for turns in [0, 1, 4, 6, 9, 11] {
            assert!(!trigger.fires(turns), "should not fire at {turns}");
        }
    }

    #[test]
    fn zero_interval_never_fires() {
        assert!(!Trigger::EveryTurns(0).fires(0));
        assert!(!Trigger::EveryTurns(0).fires(10));
    }

    #[test]
    fn activity_and_content_flags() {
        let disabled = PromptEntry::relative("a", "text").disabled();
        assert!(!disabled.is_active());
        assert!(disabled.clone().as_system_prompt().is_active());

        let blank = PromptEntry::relative("b", "  \n\t ");
        assert!(!blank.has_content());
    }

    #[test]
    fn describe_each_placement() {
        assert_eq!(PromptEntry::relative("a", "x").describe_injection(), "relative");
        assert_eq!(
            PromptEntry::conditional("b", "x", 1, 10).describe_injection(),
            "conditional (min 10 messages, depth 1)"
        );
        assert_eq!(
            PromptEntry::interval("c", "x", 0, 5).describe_injection(),
            "interval (every 5 turns, depth 0)"
        );
    }

    #[test]
    fn position_serializes_camel_case() {
        let json = serde_json::to_string(&InjectionPosition::InChat).unwrap();
        assert_eq!(json, r#""inChat""#);
    }
}
