//! Media and link filtering.
//!
//! This module provides [`FilterPolicy`] for describing what happens to
//! media placeholders and link-bearing messages, and [`apply_filters`] for
//! running a policy over a record stream.
//!
//! # Policy Table
//!
//! | Flag | Replacement | Result |
//! |------|-------------|--------|
//! | `false` | anything | message passes through unchanged |
//! | `true` | `None` | message is removed from the stream |
//! | `true` | `Some(text)` | message text becomes `text`, sender and time kept |
//!
//! Media is checked before links, so a media message that also carries a
//! URL follows the media rule when media filtering is enabled.
//!
//! # Examples
//!
//! ```
//! use chatseed::core::filter::{FilterPolicy, apply_filters};
//! use chatseed::Message;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let messages = vec![
//!     Message::new(ts, "Alice", "Hello"),
//!     Message::new(ts, "Bob", "<Media omitted>"),
//!     Message::new(ts, "Alice", "https://example.com"),
//! ];
//!
//! let policy = FilterPolicy::new().with_media_replacement("<sends an attachment>");
//! let kept: Vec<_> = apply_filters(messages, &policy).collect();
//!
//! assert_eq!(kept.len(), 2);
//! assert_eq!(kept[1].content(), "<sends an attachment>");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Placeholders WhatsApp writes in place of attachments.
///
/// Android exports use `<Media omitted>`; iOS exports name the attachment
/// kind or the attached file.
pub const MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "<attached:",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
    "Contact card omitted",
    "<Без медиафайлов>",
];

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:https?://|www\.)\S+|\b[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.(?:com|org|net|io|dev|app|co|me|gg|ly|be|tv|info|xyz|ru|de|uk)\b(?:/\S*)?",
    )
    .expect("link pattern is valid")
});

/// Returns `true` if `text` contains one of the [`MEDIA_PLACEHOLDERS`].
pub fn is_media_placeholder(text: &str) -> bool {
    MEDIA_PLACEHOLDERS.iter().any(|marker| text.contains(marker))
}

/// Returns `true` if `text` contains a URL or a bare domain.
///
/// ```
/// use chatseed::core::filter::contains_link;
///
/// assert!(contains_link("https://example.com"));
/// assert!(contains_link("go to example.com/page"));
/// assert!(!contains_link("see you at 5.30"));
/// ```
pub fn contains_link(text: &str) -> bool {
    LINK_PATTERN.is_match(text)
}

/// What to do with media placeholders and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterPolicy {
    /// Apply the media rule (default: true)
    pub filter_media: bool,

    /// Apply the link rule (default: true)
    pub filter_links: bool,

    /// Replacement text for media messages; `None` removes them
    pub media_replacement: Option<String>,

    /// Replacement text for link messages; `None` removes them
    pub link_replacement: Option<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            filter_media: true,
            filter_links: true,
            media_replacement: None,
            link_replacement: None,
        }
    }
}

/// Why the filter removed a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    /// The message was a media placeholder
    Media,
    /// The message carried a link
    Link,
}

/// Outcome of running one message through a [`FilterPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filtered {
    /// No rule applied
    Unchanged(Message),
    /// A rule applied and substituted the text
    Replaced(Message),
    /// A rule applied and the message must leave the stream
    Removed(FilterReason),
}

impl Filtered {
    /// Returns the surviving message, if any.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Filtered::Unchanged(msg) | Filtered::Replaced(msg) => Some(msg),
            Filtered::Removed(_) => None,
        }
    }

    /// Returns `true` if the message was removed.
    pub fn is_removed(&self) -> bool {
        matches!(self, Filtered::Removed(_))
    }
}

impl FilterPolicy {
    /// Creates the default policy: media and links are both removed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that lets everything through.
    pub fn disabled() -> Self {
        Self {
            filter_media: false,
            filter_links: false,
            media_replacement: None,
            link_replacement: None,
        }
    }

    /// Enables or disables the media rule.
    #[must_use]
    pub fn with_filter_media(mut self, enabled: bool) -> Self {
        self.filter_media = enabled;
        self
    }

    /// Enables or disables the link rule.
    #[must_use]
    pub fn with_filter_links(mut self, enabled: bool) -> Self {
        self.filter_links = enabled;
        self
    }

    /// Replaces media messages with `text` instead of removing them.
    #[must_use]
    pub fn with_media_replacement(mut self, text: impl Into<String>) -> Self {
        self.media_replacement = Some(text.into());
        self
    }

    /// Replaces link messages with `text` instead of removing them.
    #[must_use]
    pub fn with_link_replacement(mut self, text: impl Into<String>) -> Self {
        self.link_replacement = Some(text.into());
        self
    }

    /// Returns `true` if any rule can change the stream.
    pub fn is_active(&self) -> bool {
        self.filter_media || self.filter_links
    }

    /// Runs one message through the policy.
    pub fn apply(&self, msg: Message) -> Filtered {
        if self.filter_media && msg.is_media() {
            return Self::resolve(msg, self.media_replacement.as_deref(), FilterReason::Media);
        }
        if self.filter_links && msg.is_link() {
            return Self::resolve(msg, self.link_replacement.as_deref(), FilterReason::Link);
        }
        Filtered::Unchanged(msg)
    }

    fn resolve(msg: Message, replacement: Option<&str>, reason: FilterReason) -> Filtered {
        match replacement {
            Some(text) => Filtered::Replaced(msg.with_content(text)),
            None => {
                tracing::trace!(sender = msg.sender(), ?reason, "message removed by filter");
                Filtered::Removed(reason)
            }
        }
    }
}

/// Applies `policy` to every message, lazily dropping removed ones.
pub fn apply_filters<'a, I>(messages: I, policy: &'a FilterPolicy) -> impl Iterator<Item = Message> + 'a
where
    I: IntoIterator<Item = Message>,
    I::IntoIter: 'a,
{
    messages
        .into_iter()
        .filter_map(move |msg| policy.apply(msg).into_message())
}
