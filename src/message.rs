//! Parsed chat message record.
//!
//! This module provides [`Message`], the structured form of one entry in a
//! chat export. The line parser produces messages, the content filter
//! transforms or drops them, and the segmenter groups them into
//! conversations.
//!
//! # Overview
//!
//! A message consists of:
//! - `timestamp`, `sender` and `content`, taken from the export line
//! - `is_media` and `is_link`, classified once from the content at construction
//!
//! Messages are immutable once built. The filter never edits a message in
//! place; it builds a new one with [`Message::with_content`].
//!
//! # Examples
//!
//! ```
//! use chatseed::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let msg = Message::new(ts, "Alice", "see https://example.com");
//!
//! assert_eq!(msg.sender(), "Alice");
//! assert!(msg.is_link());
//! assert!(!msg.is_media());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::filter::{contains_link, is_media_placeholder};

/// A single timestamped, speaker-tagged chat message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `DateTime<Utc>` | When the message was sent (export local time, stored as UTC) |
/// | `sender` | `String` | Speaker name exactly as it appears in the export |
/// | `content` | `String` | Text content, may contain newlines |
/// | `is_media` | `bool` | Content carries a media placeholder |
/// | `is_link` | `bool` | Content carries a URL |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    timestamp: DateTime<Utc>,
    sender: String,
    content: String,
    is_media: bool,
    is_link: bool,
}

impl Message {
    /// Creates a message and classifies its content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatseed::Message;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    /// let msg = Message::new(ts, "Bob", "<Media omitted>");
    /// assert!(msg.is_media());
    /// ```
    pub fn new(timestamp: DateTime<Utc>, sender: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            timestamp,
            sender: sender.into(),
            is_media: is_media_placeholder(&content),
            is_link: contains_link(&content),
            content,
        }
    }

    /// Returns a copy of this message carrying different text.
    ///
    /// Timestamp, sender and the media/link classification of the original
    /// content are kept, so a replaced attachment still reports `is_media()`.
    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Returns the send time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if the content is (or contains) a media placeholder.
    pub fn is_media(&self) -> bool {
        self.is_media
    }

    /// Returns `true` if the content contains a URL.
    pub fn is_link(&self) -> bool {
        self.is_link
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Number of characters (Unicode scalar values) in the content.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
