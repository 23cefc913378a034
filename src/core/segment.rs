//! Time-gap conversation segmentation.
//!
//! Records arrive in export order. A new [`Conversation`] starts whenever
//! the gap to the previous record is strictly greater than the split
//! threshold; a gap of exactly the threshold stays in the same
//! conversation. Records are never reordered, so a timestamp that goes
//! backwards (clock change, edited export) yields a negative gap and
//! stays in the current conversation.
//!
//! # Example
//!
//! ```
//! use chatseed::core::segment::segment;
//! use chatseed::Message;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let start = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
//! let records = vec![
//!     Message::new(start, "Alice", "Hi"),
//!     Message::new(start + Duration::minutes(5), "Bob", "Hey"),
//!     Message::new(start + Duration::minutes(40), "Alice", "Still there?"),
//! ];
//!
//! let blocks: Vec<_> = segment(records, 15).collect();
//! assert_eq!(blocks.len(), 2);
//! assert_eq!(blocks[0].len(), 2);
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use crate::Message;

/// An ordered run of messages with no gap above the split threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Wraps an ordered run of messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Returns the messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the conversation and returns its messages.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Sum of the text lengths of all messages, in characters.
    pub fn char_count(&self) -> usize {
        self.messages.iter().map(Message::char_count).sum()
    }

    /// Timestamp of the first message.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.messages.first().map(Message::timestamp)
    }

    /// Timestamp of the last message.
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.messages.last().map(Message::timestamp)
    }

    /// Returns `true` if `sender` wrote at least one message.
    pub fn has_speaker(&self, sender: &str) -> bool {
        self.messages.iter().any(|m| m.sender() == sender)
    }
}

/// Lazy iterator of conversations, created by [`segment`].
pub struct Segments<I> {
    records: I,
    max_gap: TimeDelta,
    current: Vec<Message>,
}

impl<I> Iterator for Segments<I>
where
    I: Iterator<Item = Message>,
{
    type Item = Conversation;

    fn next(&mut self) -> Option<Conversation> {
        for msg in self.records.by_ref() {
            let split = self
                .current
                .last()
                .is_some_and(|prev| msg.timestamp() - prev.timestamp() > self.max_gap);

            if split {
                let done = std::mem::replace(&mut self.current, vec![msg]);
                return Some(Conversation::new(done));
            }
            self.current.push(msg);
        }

        if self.current.is_empty() {
            None
        } else {
            Some(Conversation::new(std::mem::take(&mut self.current)))
        }
    }
}

/// Groups chronologically ordered records into conversations.
///
/// `split_minutes` is the largest gap, in minutes, that still continues a
/// conversation.
pub fn segment<I>(records: I, split_minutes: u32) -> Segments<I::IntoIter>
where
    I: IntoIterator<Item = Message>,
{
    Segments {
        records: records.into_iter(),
        max_gap: TimeDelta::minutes(i64::from(split_minutes)),
        current: Vec::new(),
    }
}
