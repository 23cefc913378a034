//! Conversation acceptance rules.
//!
//! A conversation is kept only if it has at least
//! `min_messages_per_conversation` messages and both participants speak in
//! it. Rejection is ordinary filtering, not an error.

use crate::core::participants::Participants;
use crate::core::segment::Conversation;

/// Why a conversation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer messages than the configured minimum
    TooShort {
        /// Messages in the conversation
        len: usize,
        /// Configured minimum
        min: usize,
    },
    /// Only one of the two participants speaks
    OneSided,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::TooShort { len, min } => {
                write!(f, "too short ({len} messages, minimum {min})")
            }
            Rejection::OneSided => write!(f, "only one participant speaks"),
        }
    }
}

/// Checks conversations against the size and two-speaker rules.
#[derive(Debug, Clone)]
pub struct BlockValidator {
    min_messages: usize,
    participants: Participants,
}

impl BlockValidator {
    /// Creates a validator.
    pub fn new(min_messages: usize, participants: Participants) -> Self {
        Self {
            min_messages,
            participants,
        }
    }

    /// Returns `Ok(())` if the conversation is kept, or the reason it is not.
    ///
    /// The size rule is checked first.
    pub fn check(&self, conversation: &Conversation) -> Result<(), Rejection> {
        if conversation.len() < self.min_messages {
            return Err(Rejection::TooShort {
                len: conversation.len(),
                min: self.min_messages,
            });
        }

        let both_speak = conversation.has_speaker(self.participants.user())
            && conversation.has_speaker(self.participants.character());
        if !both_speak {
            return Err(Rejection::OneSided);
        }

        Ok(())
    }

    /// Returns `true` if the conversation is kept.
    pub fn accepts(&self, conversation: &Conversation) -> bool {
        self.check(conversation).is_ok()
    }
}
