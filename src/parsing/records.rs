//! WhatsApp TXT export parser.
//!
//! The parser detects the export dialect from the first lines of the file
//! and then walks the text lazily: each header line starts a new
//! [`Message`], and each following line that is not a header is appended
//! to it with a newline. Lines that cannot belong to any message are
//! skipped and logged.

use std::iter::Enumerate;
use std::path::Path;
use std::str::Lines;

use chrono::{DateTime, Utc};

use crate::Message;
use crate::config::WhatsAppConfig;
use crate::error::Result;
use crate::parsing::read_export;
use crate::parsing::whatsapp::{
    DateFormat, HeaderMatcher, LineKind, detect_whatsapp_format, is_system_notice,
    resolve_slash_order, strip_direction_marks,
};

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatseed::parsing::WhatsAppParser;
///
/// let export = "[1/15/24, 10:30:00 AM] Alice: Hello\n\
///               second line\n\
///               [1/15/24, 10:31:00 AM] Bob: Hi";
///
/// let parser = WhatsAppParser::new();
/// let messages: Vec<_> = parser.records(export).collect();
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].content(), "Hello\nsecond line");
/// ```
#[derive(Debug, Clone, Default)]
pub struct WhatsAppParser {
    config: WhatsAppConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    /// Detects the dialect of `content` from its first non-empty lines.
    ///
    /// For slash-dated exports the day/month order is then checked against
    /// every line, since a sample of days 1 to 12 reads both ways.
    pub fn detect_format(&self, content: &str) -> Option<DateFormat> {
        let sample: Vec<_> = content
            .lines()
            .map(strip_direction_marks)
            .filter(|line| !line.trim().is_empty())
            .take(self.config.detection_sample)
            .collect();
        let refs: Vec<&str> = sample.iter().map(AsRef::as_ref).collect();
        let format = detect_whatsapp_format(&refs)?;

        Some(resolve_slash_order(
            format,
            content.lines().map(strip_direction_marks),
        ))
    }

    /// Returns a lazy iterator over the messages in `content`.
    ///
    /// Calling this again on the same text starts over from the beginning.
    /// If no dialect can be detected the iterator is empty.
    pub fn records<'a>(&self, content: &'a str) -> Records<'a> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let matcher = self.detect_format(content).map(HeaderMatcher::new);

        match matcher {
            Some(m) => tracing::debug!(format = ?m.format(), "detected export format"),
            None if !content.trim().is_empty() => {
                tracing::warn!("could not detect WhatsApp export format; no messages read");
            }
            None => {}
        }

        Records {
            lines: content.lines().enumerate(),
            matcher,
            pending: None,
            skip_system_messages: self.config.skip_system_messages,
        }
    }

    /// Parses all messages of `content` into memory.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.records(content).collect()
    }

    /// Reads and parses an export file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = read_export(path)?;
        Ok(self.parse_str(&content))
    }
}

/// Message under construction while its continuation lines are read.
struct Pending {
    timestamp: DateTime<Utc>,
    sender: String,
    text: String,
}

impl Pending {
    fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line.trim_end());
    }

    fn into_message(self) -> Message {
        Message::new(self.timestamp, self.sender, self.text.trim())
    }
}

/// Lazy iterator of messages, created by [`WhatsAppParser::records`].
pub struct Records<'a> {
    lines: Enumerate<Lines<'a>>,
    matcher: Option<HeaderMatcher>,
    pending: Option<Pending>,
    skip_system_messages: bool,
}

impl Records<'_> {
    /// Returns the detected dialect, if any.
    pub fn format(&self) -> Option<DateFormat> {
        self.matcher.map(|m| m.format())
    }

    fn next_pending(&mut self) -> Option<Pending> {
        let matcher = self.matcher?;

        for (idx, raw) in self.lines.by_ref() {
            let line_no = idx + 1;
            let line = strip_direction_marks(raw);
            if line.trim().is_empty() {
                if let Some(pending) = self.pending.as_mut() {
                    pending.push_line("");
                }
                continue;
            }

            match matcher.classify(&line) {
                LineKind::Message {
                    timestamp: Some(timestamp),
                    sender,
                    text,
                } => {
                    let started = Pending {
                        timestamp,
                        sender: sender.to_string(),
                        text: text.to_string(),
                    };
                    if let Some(done) = self.pending.replace(started) {
                        return Some(done);
                    }
                }
                LineKind::Message { timestamp: None, .. } => {
                    tracing::warn!(line = line_no, "skipping message with unreadable timestamp");
                    if let Some(done) = self.pending.take() {
                        return Some(done);
                    }
                }
                LineKind::Notice => {
                    tracing::debug!(line = line_no, "skipping system notice");
                    if let Some(done) = self.pending.take() {
                        return Some(done);
                    }
                }
                LineKind::Text => match self.pending.as_mut() {
                    Some(pending) => pending.push_line(&line),
                    None => tracing::debug!(line = line_no, "skipping line outside any message"),
                },
            }
        }

        self.pending.take()
    }
}

impl Iterator for Records<'_> {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        loop {
            let msg = self.next_pending()?.into_message();
            if self.skip_system_messages && is_system_notice(msg.content()) {
                tracing::debug!(sender = msg.sender(), "skipping system message");
                continue;
            }
            return Some(msg);
        }
    }
}
