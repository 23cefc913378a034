//! Speaker attribution.
//!
//! A conversation is always between two known people: the user whose
//! side becomes the generic user role, and the person whose side becomes
//! the character. Every other speaker in the export is unattributed.

use serde::{Deserialize, Serialize};

/// Which side of the dialogue a turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The character being profiled
    Character,
    /// The generic user talking to the character
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Character => write!(f, "character"),
            Role::User => write!(f, "user"),
        }
    }
}

/// The two speaker names that take part in the dialogue.
///
/// Names are matched exactly, including case and spacing.
///
/// ```
/// use chatseed::core::participants::{Participants, Role};
///
/// let people = Participants::new("Razanius12", "My Partner");
/// assert_eq!(people.role_of("My Partner"), Some(Role::Character));
/// assert_eq!(people.role_of("my partner"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participants {
    user: String,
    character: String,
}

impl Participants {
    /// Creates the pair from the user's and the character's export names.
    pub fn new(user: impl Into<String>, character: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            character: character.into(),
        }
    }

    /// Returns the user's export name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the character's export name.
    pub fn character(&self) -> &str {
        &self.character
    }

    /// Returns the role of `sender`, or `None` when the sender is neither participant.
    pub fn role_of(&self, sender: &str) -> Option<Role> {
        if sender == self.character {
            Some(Role::Character)
        } else if sender == self.user {
            Some(Role::User)
        } else {
            None
        }
    }

    /// Returns `true` if `sender` is one of the two participants.
    pub fn contains(&self, sender: &str) -> bool {
        self.role_of(sender).is_some()
    }
}

/// Literal keys written for each role in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleLabels {
    /// Key for character turns (default: `{{char}}`)
    pub character: String,
    /// Key for user turns (default: `{{random_user_1}}`)
    pub user: String,
}

impl Default for RoleLabels {
    fn default() -> Self {
        Self {
            character: "{{char}}".to_string(),
            user: "{{random_user_1}}".to_string(),
        }
    }
}

impl RoleLabels {
    /// Creates labels with custom keys.
    pub fn new(character: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            user: user.into(),
        }
    }

    /// Returns the key for `role`.
    pub fn label(&self, role: Role) -> &str {
        match role {
            Role::Character => &self.character,
            Role::User => &self.user,
        }
    }

    /// Returns the role whose key is `label`.
    pub fn role_for(&self, label: &str) -> Option<Role> {
        if label == self.character {
            Some(Role::Character)
        } else if label == self.user {
            Some(Role::User)
        } else {
            None
        }
    }
}
