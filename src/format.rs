//! Output document styles.
//!
//! Both styles wrap the conversations in the same envelope:
//!
//! ```text
//! {
//!   "example_conversation": [
//!     <entry>,
//!     <entry>
//!   ]
//! }
//! ```
//!
//! They differ in how an entry holds its turns:
//!
//! | Style | Entry | Duplicate keys |
//! |-------|-------|----------------|
//! | [`DuplicateKeys`](OutputStyle::DuplicateKeys) | one object, one member per turn | yes |
//! | [`TurnObjects`](OutputStyle::TurnObjects) | array of single-member objects | no |
//!
//! `DuplicateKeys` is what character-card templates expect. JSON allows
//! repeated member names, but many parsers keep only the last one, so
//! `TurnObjects` exists for consumers that read the document into maps.
//!
//! # Example
//!
//! ```rust
//! use chatseed::format::OutputStyle;
//! use std::str::FromStr;
//!
//! let style = OutputStyle::from_str("turn-objects").unwrap();
//! assert_eq!(style, OutputStyle::TurnObjects);
//! assert!(!style.repeats_keys());
//! ```

use serde::{Deserialize, Serialize};

/// Layout of each conversation entry in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStyle {
    /// `{"{{char}}": "...", "{{char}}": "...", "{{random_user_1}}": "..."}`
    #[default]
    DuplicateKeys,

    /// `[{"{{char}}": "..."}, {"{{char}}": "..."}, {"{{random_user_1}}": "..."}]`
    TurnObjects,
}

impl OutputStyle {
    /// Returns all supported style names.
    pub fn all_names() -> &'static [&'static str] {
        &["duplicate-keys", "turn-objects"]
    }

    /// Returns `true` if entries may contain the same key more than once.
    pub fn repeats_keys(&self) -> bool {
        matches!(self, OutputStyle::DuplicateKeys)
    }
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::DuplicateKeys => write!(f, "duplicate-keys"),
            OutputStyle::TurnObjects => write!(f, "turn-objects"),
        }
    }
}

impl std::str::FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "duplicate-keys" | "duplicate" | "keys" => Ok(OutputStyle::DuplicateKeys),
            "turn-objects" | "objects" | "strict" => Ok(OutputStyle::TurnObjects),
            _ => Err(format!(
                "Unknown style: '{}'. Expected one of: {}",
                s,
                OutputStyle::all_names().join(", ")
            )),
        }
    }
}
