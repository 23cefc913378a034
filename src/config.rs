//! Configuration types for the parser and the pipeline.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`WhatsAppConfig`] - WhatsApp TXT export parsing settings
//! - [`PipelineConfig`] - everything one pipeline run needs
//!
//! # Example
//!
//! ```rust
//! use chatseed::config::PipelineConfig;
//!
//! let config = PipelineConfig::new("Razanius12", "My Partner")
//!     .with_split_minutes(30)
//!     .with_character_limit(8000)
//!     .with_seed(7);
//!
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::filter::FilterPolicy;
use crate::core::participants::{Participants, RoleLabels};
use crate::error::{ChatseedError, Result};
use crate::format::OutputStyle;

/// Configuration for WhatsApp export parsing.
///
/// WhatsApp exports are TXT files with various locale-specific date formats.
/// The parser auto-detects the format by analyzing the first
/// `detection_sample` non-empty lines.
///
/// # Example
///
/// ```rust
/// use chatseed::config::WhatsAppConfig;
///
/// let config = WhatsAppConfig::new()
///     .with_skip_system_messages(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    /// Skip system messages (encryption banner, missed calls, etc.) (default: true)
    pub skip_system_messages: bool,

    /// Number of non-empty lines used for format detection (default: 20)
    pub detection_sample: usize,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            skip_system_messages: true,
            detection_sample: 20,
        }
    }
}

impl WhatsAppConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets how many lines format detection looks at.
    #[must_use]
    pub fn with_detection_sample(mut self, lines: usize) -> Self {
        self.detection_sample = lines;
        self
    }
}

/// Settings for one pipeline run.
///
/// Loaded from JSON, every field is optional and falls back to its default.
/// Filter settings sit at the top level next to the other fields:
///
/// ```json
/// {
///   "user_name": "Razanius12",
///   "char_name": "My Partner",
///   "split_minutes": 15,
///   "filter_links": false,
///   "media_replacement": "[photo]"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sender name that becomes the user role
    pub user_name: String,

    /// Sender name that becomes the character role
    pub char_name: String,

    /// Largest gap in minutes that continues a conversation (default: 15)
    pub split_minutes: u32,

    /// Maximum document length in characters (default: 20000)
    pub character_limit: usize,

    /// Smallest block size that is kept (default: 4)
    pub min_messages_per_conversation: usize,

    /// Media and link handling
    #[serde(flatten)]
    pub filter: FilterPolicy,

    /// Output key for the character role (default: `{{char}}`)
    pub char_label: String,

    /// Output key for the user role (default: `{{random_user_1}}`)
    pub user_label: String,

    /// Seed for conversation selection; entropy when `None`
    pub seed: Option<u64>,

    /// Entry layout of the output document
    pub style: OutputStyle,

    /// Drop speaker-attributed system notices (default: true)
    pub skip_system_messages: bool,

    /// Replace newlines inside messages with spaces (default: true)
    pub flatten_newlines: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let labels = RoleLabels::default();
        Self {
            user_name: String::new(),
            char_name: String::new(),
            split_minutes: 15,
            character_limit: 20_000,
            min_messages_per_conversation: 4,
            filter: FilterPolicy::default(),
            char_label: labels.character,
            user_label: labels.user,
            seed: None,
            style: OutputStyle::default(),
            skip_system_messages: true,
            flatten_newlines: true,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration for the two participants with default values.
    pub fn new(user_name: impl Into<String>, char_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            char_name: char_name.into(),
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// The result is not validated, so names may still be filled in later.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read(path)?;
        let text = String::from_utf8(content).map_err(|e| ChatseedError::utf8(path, e))?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the user participant.
    #[must_use]
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Sets the character participant.
    #[must_use]
    pub fn with_char_name(mut self, name: impl Into<String>) -> Self {
        self.char_name = name.into();
        self
    }

    /// Sets the conversation gap threshold in minutes.
    #[must_use]
    pub fn with_split_minutes(mut self, minutes: u32) -> Self {
        self.split_minutes = minutes;
        self
    }

    /// Sets the document character limit.
    #[must_use]
    pub fn with_character_limit(mut self, limit: usize) -> Self {
        self.character_limit = limit;
        self
    }

    /// Sets the minimum number of messages per conversation.
    #[must_use]
    pub fn with_min_messages(mut self, min: usize) -> Self {
        self.min_messages_per_conversation = min;
        self
    }

    /// Replaces the filter policy.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterPolicy) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the output keys for both roles.
    #[must_use]
    pub fn with_labels(mut self, labels: RoleLabels) -> Self {
        self.char_label = labels.character;
        self.user_label = labels.user;
        self
    }

    /// Fixes the selection seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the output style.
    #[must_use]
    pub fn with_style(mut self, style: OutputStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets whether to skip system messages.
    #[must_use]
    pub fn with_skip_system_messages(mut self, skip: bool) -> Self {
        self.skip_system_messages = skip;
        self
    }

    /// Sets whether newlines inside messages become spaces.
    #[must_use]
    pub fn with_flatten_newlines(mut self, flatten: bool) -> Self {
        self.flatten_newlines = flatten;
        self
    }

    /// Returns the two participants.
    pub fn participants(&self) -> Participants {
        Participants::new(self.user_name.clone(), self.char_name.clone())
    }

    /// Returns the output keys for both roles.
    pub fn labels(&self) -> RoleLabels {
        RoleLabels::new(self.char_label.clone(), self.user_label.clone())
    }

    /// Returns the parser settings derived from this configuration.
    pub fn whatsapp(&self) -> WhatsAppConfig {
        WhatsAppConfig::new().with_skip_system_messages(self.skip_system_messages)
    }

    /// Checks that the configuration can drive a pipeline run.
    pub fn validate(&self) -> Result<()> {
        if self.user_name.trim().is_empty() {
            return Err(ChatseedError::invalid_config("user_name", "must not be empty"));
        }
        if self.char_name.trim().is_empty() {
            return Err(ChatseedError::invalid_config("char_name", "must not be empty"));
        }
        if self.user_name == self.char_name {
            return Err(ChatseedError::invalid_config(
                "char_name",
                format!("must differ from user_name ('{}')", self.user_name),
            ));
        }
        if self.char_label.is_empty() {
            return Err(ChatseedError::invalid_config("char_label", "must not be empty"));
        }
        if self.user_label.is_empty() {
            return Err(ChatseedError::invalid_config("user_label", "must not be empty"));
        }
        if self.char_label == self.user_label {
            return Err(ChatseedError::invalid_config(
                "user_label",
                format!("must differ from char_label ('{}')", self.char_label),
            ));
        }
        Ok(())
    }
}
