//! Configuration loading, validation, and management for Parlor.
//!
//! Loads configuration from `~/.parlor/config.toml` with environment
//! variable overrides. Prompt entries keep the camelCase field names the
//! storage bridge uses, so records can be pasted between the two.

use parlor_core::{InjectionPosition, PromptEntry, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound on mock exchanges rendered by the preview.
pub const MAX_PREVIEW_TURN_PAIRS: usize = 500;

/// The root configuration structure.
///
/// Maps directly to `~/.parlor/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prompt entries and assembly mode
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Structure preview settings
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Merge every entry into a single system message
    #[serde(default)]
    pub condense_prompt_entries: bool,

    /// Entries in configured order
    #[serde(default)]
    pub entries: Vec<PromptEntry>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            condense_prompt_entries: false,
            entries: default_entries(),
        }
    }
}

fn default_entries() -> Vec<PromptEntry> {
    vec![
        PromptEntry::relative(
            "main_prompt",
            "Write the next reply in this fictional chat. Stay in character and keep the story moving.",
        )
        .with_name("Main Prompt")
        .as_system_prompt(),
        PromptEntry::in_chat(
            "authors_note",
            "[Author's note: keep replies under three paragraphs.]",
            4,
        )
        .with_name("Author's Note"),
        PromptEntry::interval(
            "scene_recap",
            "Briefly restate where the scene stands before continuing.",
            0,
            10,
        )
        .with_name("Scene Recap")
        .with_role(Role::User)
        .disabled(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Mock user/assistant exchanges to assemble over
    #[serde(default = "default_turn_pairs")]
    pub turn_pairs: usize,
}

fn default_turn_pairs() -> usize {
    3
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            turn_pairs: default_turn_pairs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.parlor/config.toml).
    ///
    /// Environment overrides:
    /// - `PARLOR_CONDENSE_PROMPT_ENTRIES` (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`)
    /// - `PARLOR_PREVIEW_TURNS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            entries = config.prompt.entries.len(),
            "Config loaded"
        );
        Ok(config)
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("PARLOR_CONDENSE_PROMPT_ENTRIES") {
            match parse_bool(&raw) {
                Some(value) => self.prompt.condense_prompt_entries = value,
                None => tracing::warn!(
                    "Ignoring PARLOR_CONDENSE_PROMPT_ENTRIES={raw:?}: expected a boolean"
                ),
            }
        }

        if let Some(raw) = lookup("PARLOR_PREVIEW_TURNS") {
            match raw.trim().parse::<usize>() {
                Ok(value) => self.preview.turn_pairs = value,
                Err(_) => tracing::warn!("Ignoring PARLOR_PREVIEW_TURNS={raw:?}: expected an integer"),
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parlor")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    ///
    /// Only problems that break entry identity or the preview are errors;
    /// everything else degrades during assembly and is reported by
    /// [`AppConfig::warnings`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.prompt.entries {
            if entry.id.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "prompt entries must have a non-empty id".into(),
                ));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate prompt entry id: {}",
                    entry.id
                )));
            }
        }

        check_turn_pairs(self.preview.turn_pairs, "preview.turn_pairs")?;

        Ok(())
    }

    /// Mock exchanges for a preview: `requested` if given, else
    /// `preview.turn_pairs`. Either way the value is capped.
    pub fn preview_pairs(&self, requested: Option<usize>) -> Result<usize, ConfigError> {
        match requested {
            Some(pairs) => check_turn_pairs(pairs, "--pairs"),
            None => check_turn_pairs(self.preview.turn_pairs, "preview.turn_pairs"),
        }
    }

    /// Advisory findings about entries that will not behave as expected.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for entry in &self.prompt.entries {
            let id = &entry.id;
            if !entry.has_content() {
                warnings.push(format!("Entry '{id}' has no content and will never appear"));
            }
            if !entry.is_active() {
                warnings.push(format!("Entry '{id}' is disabled"));
            }
            match &entry.injection_position {
                InjectionPosition::Unknown(raw) => {
                    warnings.push(format!(
                        "Entry '{id}' has an unknown injection position '{raw}'"
                    ));
                }
                InjectionPosition::Interval if entry.interval_turns.unwrap_or(0) == 0 => {
                    warnings.push(format!(
                        "Entry '{id}' is an interval entry without a positive intervalTurns"
                    ));
                }
                InjectionPosition::Conditional if entry.conditional_min_messages == Some(0) => {
                    warnings.push(format!(
                        "Entry '{id}' has conditionalMinMessages = 0 and always fires"
                    ));
                }
                _ => {}
            }
        }

        warnings
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn check_turn_pairs(pairs: usize, source: &str) -> Result<usize, ConfigError> {
    if pairs > MAX_PREVIEW_TURN_PAIRS {
        return Err(ConfigError::ValidationError(format!(
            "{source} must be at most {MAX_PREVIEW_TURN_PAIRS} (got {pairs})"
        )));
    }
    Ok(pairs)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
