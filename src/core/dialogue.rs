//! Role-labelled dialogue turns.
//!
//! A [`Dialogue`] is the serializer's view of an accepted conversation: an
//! ordered list of `(role, text)` turns. It is a list and never a map,
//! because the same role routinely speaks several times in a row and every
//! one of those turns has to survive.

use chrono::{DateTime, Utc};

use crate::core::participants::{Participants, Role, RoleLabels};
use crate::core::segment::Conversation;

/// One turn of a dialogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Speaking side
    pub role: Role,
    /// What was said
    pub text: String,
}

impl Turn {
    /// Creates a turn.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Ordered turns of one accepted conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialogue {
    turns: Vec<Turn>,
    started_at: Option<DateTime<Utc>>,
}

impl Dialogue {
    /// Creates a dialogue from turns.
    pub fn new(turns: Vec<Turn>) -> Self {
        Self {
            turns,
            started_at: None,
        }
    }

    /// Converts a conversation, mapping each sender to its role.
    ///
    /// Messages from anyone other than the two participants are skipped.
    /// With `flatten_newlines`, embedded line breaks become single spaces.
    ///
    /// ```
    /// use chatseed::core::dialogue::Dialogue;
    /// use chatseed::core::participants::{Participants, Role};
    /// use chatseed::core::segment::Conversation;
    /// use chatseed::Message;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
    /// let conv = Conversation::new(vec![
    ///     Message::new(ts, "Alice", "Hi"),
    ///     Message::new(ts, "Bob", "Hello\nthere"),
    /// ]);
    ///
    /// let dialogue = Dialogue::from_conversation(&conv, &Participants::new("Alice", "Bob"), true);
    /// assert_eq!(dialogue.turns()[1].role, Role::Character);
    /// assert_eq!(dialogue.turns()[1].text, "Hello there");
    /// ```
    pub fn from_conversation(
        conversation: &Conversation,
        participants: &Participants,
        flatten_newlines: bool,
    ) -> Self {
        let turns = conversation
            .messages()
            .iter()
            .filter_map(|msg| {
                let role = participants.role_of(msg.sender())?;
                let text = if flatten_newlines {
                    flatten(msg.content())
                } else {
                    msg.content().to_string()
                };
                Some(Turn { role, text })
            })
            .collect();

        Self {
            turns,
            started_at: conversation.started_at(),
        }
    }

    /// Returns the turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Timestamp of the source conversation's first message, if known.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the turns as `(label, text)` pairs under `labels`.
    pub fn labeled<'a>(&'a self, labels: &'a RoleLabels) -> Vec<(&'a str, &'a str)> {
        self.turns
            .iter()
            .map(|t| (labels.label(t.role), t.text.as_str()))
            .collect()
    }
}

fn flatten(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Message;
    use chrono::TimeZone;

    fn conversation(entries: &[(&str, &str)]) -> Conversation {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        Conversation::new(
            entries
                .iter()
                .map(|(s, t)| Message::new(ts, *s, *t))
                .collect(),
        )
    }

    #[test]
    fn test_repeated_roles_are_kept() {
        let conv = conversation(&[("Bob", "a"), ("Bob", "b"), ("Alice", "c"), ("Bob", "d")]);
        let dialogue = Dialogue::from_conversation(&conv, &Participants::new("Alice", "Bob"), true);
        let roles: Vec<Role> = dialogue.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::Character, Role::Character, Role::User, Role::Character]
        );
    }

    #[test]
    fn test_unknown_senders_skipped() {
        let conv = conversation(&[("Alice", "a"), ("Eve", "b"), ("Bob", "c")]);
        let dialogue = Dialogue::from_conversation(&conv, &Participants::new("Alice", "Bob"), true);
        assert_eq!(dialogue.len(), 2);
    }

    #[test]
    fn test_newline_handling() {
        let conv = conversation(&[("Alice", "line one\nline two\r\nthree")]);
        let people = Participants::new("Alice", "Bob");

        let flat = Dialogue::from_conversation(&conv, &people, true);
        assert_eq!(flat.turns()[0].text, "line one line two three");

        let kept = Dialogue::from_conversation(&conv, &people, false);
        assert_eq!(kept.turns()[0].text, "line one\nline two\r\nthree");
    }

    #[test]
    fn test_labeled_pairs() {
        let dialogue = Dialogue::new(vec![
            Turn::new(Role::User, "hi"),
            Turn::new(Role::Character, "hey"),
        ]);
        let labels = RoleLabels::default();
        assert_eq!(
            dialogue.labeled(&labels),
            vec![("{{random_user_1}}", "hi"), ("{{char}}", "hey")]
        );
        assert!(dialogue.started_at().is_none());
    }
}
