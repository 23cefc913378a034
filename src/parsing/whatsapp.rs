//! WhatsApp export dialects.
//!
//! This module knows what a message header looks like in each export
//! dialect, how to read its timestamp, and how to pick the dialect of a
//! file from a sample of its lines.
//!
//! Supported headers:
//! - US, iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - US, Android: `12/25/21, 12:51 PM - Sender: Message`
//! - EU dot, iOS: `[15.01.24, 10:30:45] Sender: Message`
//! - EU dot, Android: `26.10.2025, 20:40 - Sender: Message`
//! - EU slash, iOS: `[15/01/2024, 10:30:45] Sender: Message`
//! - EU slash, Android: `15/01/2024, 10:30 - Sender: Message`

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// Header dialects of WhatsApp exports.
///
/// WhatsApp exports vary by locale and platform. iOS wraps the timestamp in
/// brackets; Android separates it from the sender with ` - `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `[M/D/YY, h:mm:ss AM]`, month first, 12h or 24h
    UsBracketed,
    /// `M/D/YY, h:mm AM -`, month first, 12h or 24h
    UsDashed,
    /// `[DD.MM.YY, HH:MM:SS]`
    EuDotBracketed,
    /// `DD.MM.YYYY, HH:MM -`
    EuDotDashed,
    /// `[DD/MM/YYYY, HH:MM:SS]`
    EuSlashBracketed,
    /// `DD/MM/YYYY, HH:MM -`
    EuSlashDashed,
}

const US_DATE: &str = r"(\d{1,2}/\d{1,2}/\d{2,4})";
const US_TIME: &str = r"(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)";
const EU_DOT_DATE: &str = r"(\d{1,2}\.\d{1,2}\.\d{2,4})";
const EU_SLASH_DATE: &str = r"(\d{1,2}/\d{1,2}/\d{2,4})";
const EU_TIME: &str = r"(\d{1,2}:\d{2}(?::\d{2})?)";

static HEADER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DateFormat::all()
        .iter()
        .map(|format| Regex::new(&format.pattern()).expect("header pattern is valid"))
        .collect()
});

impl DateFormat {
    /// Returns all dialects, in detection tie-break order.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::UsBracketed,
            DateFormat::UsDashed,
            DateFormat::EuDotBracketed,
            DateFormat::EuDotDashed,
            DateFormat::EuSlashBracketed,
            DateFormat::EuSlashDashed,
        ]
    }

    /// Returns the header regex source.
    ///
    /// Captures: 1 = date, 2 = time, 3 = everything after the timestamp.
    pub fn pattern(self) -> String {
        let (date, time) = match self {
            DateFormat::UsBracketed | DateFormat::UsDashed => (US_DATE, US_TIME),
            DateFormat::EuDotBracketed | DateFormat::EuDotDashed => (EU_DOT_DATE, EU_TIME),
            DateFormat::EuSlashBracketed | DateFormat::EuSlashDashed => (EU_SLASH_DATE, EU_TIME),
        };
        if self.is_bracketed() {
            format!(r"^\[{date},\s{time}\]\s?(.*)$")
        } else {
            format!(r"^{date},\s{time}\s-\s(.*)$")
        }
    }

    /// Returns `true` for the iOS-style `[date, time]` headers.
    pub fn is_bracketed(self) -> bool {
        matches!(
            self,
            DateFormat::UsBracketed | DateFormat::EuDotBracketed | DateFormat::EuSlashBracketed
        )
    }

    /// Returns the dialect with the same header shape but the other
    /// day/month order, for the slash-dated dialects.
    pub fn slash_sibling(self) -> Option<DateFormat> {
        match self {
            DateFormat::UsBracketed => Some(DateFormat::EuSlashBracketed),
            DateFormat::UsDashed => Some(DateFormat::EuSlashDashed),
            DateFormat::EuSlashBracketed => Some(DateFormat::UsBracketed),
            DateFormat::EuSlashDashed => Some(DateFormat::UsDashed),
            DateFormat::EuDotBracketed | DateFormat::EuDotDashed => None,
        }
    }

    fn regex(self) -> &'static Regex {
        &HEADER_PATTERNS[self as usize]
    }

    /// Returns chrono format strings to try, in order.
    pub fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::UsBracketed | DateFormat::UsDashed => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            DateFormat::EuDotBracketed | DateFormat::EuDotDashed => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
            DateFormat::EuSlashBracketed | DateFormat::EuSlashDashed => &[
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
        }
    }
}

/// Parse timestamp from date and time strings.
///
/// Exports carry no timezone; the local wall-clock time is stored as UTC.
/// Newer iOS exports put a narrow no-break space before `AM`/`PM`, so any
/// whitespace in the time is normalised first.
pub fn parse_whatsapp_timestamp(
    date_str: &str,
    time_str: &str,
    format: DateFormat,
) -> Option<DateTime<Utc>> {
    let time: String = time_str
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let datetime_str = format!("{date_str}, {time}");

    format
        .date_parse_formats()
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(&datetime_str, f).ok())
        .map(|naive| naive.and_utc())
}

/// What a single export line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A message header. `timestamp` is `None` when the date does not parse.
    Message {
        /// Parsed send time
        timestamp: Option<DateTime<Utc>>,
        /// Text between the timestamp and the first colon, trimmed
        sender: &'a str,
        /// Text after the first colon, trimmed
        text: &'a str,
    },
    /// A timestamped line with no `Sender:` part (Android system notice)
    Notice,
    /// Anything else: a continuation of the previous message
    Text,
}

/// Classifies lines for one detected dialect.
#[derive(Debug, Clone, Copy)]
pub struct HeaderMatcher {
    format: DateFormat,
    regex: &'static Regex,
}

impl HeaderMatcher {
    /// Creates a matcher for `format`.
    pub fn new(format: DateFormat) -> Self {
        Self {
            format,
            regex: format.regex(),
        }
    }

    /// Returns the dialect this matcher reads.
    pub fn format(&self) -> DateFormat {
        self.format
    }

    /// Classifies one line (already stripped of direction marks).
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let Some(caps) = self.regex.captures(line) else {
            return LineKind::Text;
        };

        let date_str = caps.get(1).map_or("", |m| m.as_str());
        let time_str = caps.get(2).map_or("", |m| m.as_str());
        let rest = caps.get(3).map_or("", |m| m.as_str());

        match rest.split_once(':') {
            Some((sender, text)) if !sender.trim().is_empty() => LineKind::Message {
                timestamp: parse_whatsapp_timestamp(date_str, time_str, self.format),
                sender: sender.trim(),
                text: text.trim(),
            },
            _ => LineKind::Notice,
        }
    }

    fn reads(&self, line: &str) -> bool {
        matches!(
            self.classify(line),
            LineKind::Message {
                timestamp: Some(_),
                ..
            }
        )
    }
}

/// Auto-detect the dialect by analyzing sample lines.
///
/// Each dialect scores one point per line it reads as a message with a
/// valid timestamp; the highest score wins and ties go to the earlier
/// entry of [`DateFormat::all`]. Returns `None` if no dialect reads any
/// line.
pub fn detect_whatsapp_format(lines: &[&str]) -> Option<DateFormat> {
    let matchers: Vec<HeaderMatcher> = DateFormat::all()
        .iter()
        .map(|&f| HeaderMatcher::new(f))
        .collect();

    let scores: Vec<usize> = matchers
        .iter()
        .map(|m| lines.iter().filter(|line| m.reads(line)).count())
        .collect();

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(matchers[winner_idx].format)
}

/// Settles the day/month order of a slash-dated dialect over a whole file.
///
/// A sample where every day is 12 or less reads the same in both orders.
/// The slash sibling of `format` takes over only when it reads strictly
/// more of `lines` as timestamped messages.
pub fn resolve_slash_order<I, S>(format: DateFormat, lines: I) -> DateFormat
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(sibling) = format.slash_sibling() else {
        return format;
    };
    let current = HeaderMatcher::new(format);
    let other = HeaderMatcher::new(sibling);

    let (mut ours, mut theirs) = (0usize, 0usize);
    for line in lines {
        let line = line.as_ref();
        ours += usize::from(current.reads(line));
        theirs += usize::from(other.reads(line));
    }

    if theirs > ours { sibling } else { format }
}

/// Removes Unicode direction marks that some exports put around names and
/// attachment placeholders.
pub fn strip_direction_marks(line: &str) -> Cow<'_, str> {
    const MARKS: &[char] = &[
        '\u{200E}', '\u{200F}', '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
    ];
    if line.contains(MARKS) {
        Cow::Owned(line.replace(MARKS, ""))
    } else {
        Cow::Borrowed(line)
    }
}

/// Check if message content is a WhatsApp system notice.
///
/// In one-to-one iOS exports these are attributed to the other person,
/// so they cannot be told apart by sender. Only the exact shapes WhatsApp
/// writes count: a whole-message missed-call line, a banner or
/// security-code line at the start of the text, or a notice tail at its
/// end. A message that merely quotes one of these phrases is kept.
pub fn is_system_notice(content: &str) -> bool {
    const WHOLE: &[&str] = &[
        "missed voice call",
        "missed video call",
        "missed group voice call",
        "missed group video call",
        "пропущенный аудиозвонок",
        "пропущенный видеозвонок",
    ];
    const PREFIXES: &[&str] = &[
        "messages and calls are end-to-end encrypted",
        "messages to this group are now secured with end-to-end encryption",
        "your security code with",
        "this chat is with a business account",
        "you turned on disappearing messages",
        "you turned off disappearing messages",
        "сообщения и звонки защищены сквозным шифрованием",
    ];
    const SUFFIXES: &[&str] = &[
        "security code changed. tap to learn more.",
        "changed their phone number to a new number. tap to message or add the new number.",
        "joined using this group's invite link",
        "changed this group's icon",
    ];

    let lower = content.trim().to_lowercase();
    let bare = lower.trim_end_matches('.');

    WHOLE.contains(&bare)
        || PREFIXES.iter().any(|p| lower.starts_with(p))
        || SUFFIXES.iter().any(|s| lower.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_us_bracketed() {
        let lines = vec![
            "[1/15/24, 10:30:45 AM] Alice: Hello",
            "[1/15/24, 10:31:00 AM] Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::UsBracketed));
    }

    #[test]
    fn test_detect_format_us_dashed() {
        let lines = vec![
            "12/25/21, 12:51 PM - Alice: Hello",
            "12/25/21, 12:52 PM - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::UsDashed));
    }

    #[test]
    fn test_detect_format_eu_dot_bracketed() {
        let lines = vec![
            "[15.01.24, 10:30:45] Alice: Hello",
            "[15.01.24, 10:31:00] Bob: Hi there",
        ];
        assert_eq!(
            detect_whatsapp_format(&lines),
            Some(DateFormat::EuDotBracketed)
        );
    }

    #[test]
    fn test_detect_format_eu_dot_dashed() {
        let lines = vec![
            "26.10.2025, 20:40 - Alice: Hello",
            "26.10.2025, 20:41 - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::EuDotDashed));
    }

    #[test]
    fn test_detect_format_eu_slash_by_valid_dates() {
        // Day 15 cannot be a month, so only the EU reading parses.
        let lines = vec![
            "15/01/2024, 10:30 - Alice: Hello",
            "15/01/2024, 10:31 - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::EuSlashDashed));
    }

    #[test]
    fn test_detect_ambiguous_slash_prefers_us() {
        let lines = vec!["01/02/2024, 10:30 - Alice: Hello"];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::UsDashed));
    }

    #[test]
    fn test_detect_nothing() {
        assert_eq!(detect_whatsapp_format(&["hello", "world"]), None);
        assert_eq!(detect_whatsapp_format(&[]), None);
    }

    #[test]
    fn test_parse_timestamp_us() {
        let ts = parse_whatsapp_timestamp("1/15/24", "10:30:45 AM", DateFormat::UsBracketed)
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-15T10:30:45+00:00");

        let pm = parse_whatsapp_timestamp("12/25/21", "12:51 PM", DateFormat::UsDashed).unwrap();
        assert_eq!(pm.to_rfc3339(), "2021-12-25T12:51:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_narrow_space() {
        let ts = parse_whatsapp_timestamp("1/15/24", "9:05\u{202F}PM", DateFormat::UsBracketed);
        assert_eq!(ts.unwrap().to_rfc3339(), "2024-01-15T21:05:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_eu() {
        let ts = parse_whatsapp_timestamp("15.01.24", "10:30:45", DateFormat::EuDotBracketed);
        assert!(ts.is_some());

        let ts2 = parse_whatsapp_timestamp("26.10.2025", "20:40", DateFormat::EuDotDashed);
        assert_eq!(ts2.unwrap().to_rfc3339(), "2025-10-26T20:40:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_invalid_date() {
        assert!(parse_whatsapp_timestamp("13/45/24", "10:30", DateFormat::UsDashed).is_none());
    }

    #[test]
    fn test_classify_message() {
        let matcher = HeaderMatcher::new(DateFormat::UsBracketed);
        match matcher.classify("[1/15/24, 10:30:45 AM] My Partner: see you at 10:45") {
            LineKind::Message {
                timestamp,
                sender,
                text,
            } => {
                assert!(timestamp.is_some());
                assert_eq!(sender, "My Partner");
                assert_eq!(text, "see you at 10:45");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_notice_and_text() {
        let matcher = HeaderMatcher::new(DateFormat::UsDashed);
        assert_eq!(
            matcher.classify("12/25/21, 12:51 PM - Alice added Bob"),
            LineKind::Notice
        );
        assert_eq!(matcher.classify("just a continuation"), LineKind::Text);
        assert_eq!(matcher.classify("[1/15/24, 10:30 AM] Alice: hi"), LineKind::Text);
    }

    #[test]
    fn test_classify_bad_timestamp() {
        let matcher = HeaderMatcher::new(DateFormat::UsDashed);
        assert_eq!(
            matcher.classify("13/45/24, 10:30 - Alice: hi"),
            LineKind::Message {
                timestamp: None,
                sender: "Alice",
                text: "hi"
            }
        );
    }

    #[test]
    fn test_strip_direction_marks() {
        assert_eq!(strip_direction_marks("\u{200E}[1/15/24] A: b"), "[1/15/24] A: b");
        assert!(matches!(strip_direction_marks("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_is_system_notice() {
        assert!(is_system_notice(
            "Messages and calls are end-to-end encrypted. No one outside of this chat can read them."
        ));
        assert!(is_system_notice("Missed voice call"));
        assert!(is_system_notice("Missed video call."));
        assert!(is_system_notice(
            "Your security code with Bob changed. Tap to learn more."
        ));
        assert!(is_system_notice(
            "Bob changed their phone number to a new number. Tap to message or add the new number."
        ));
        assert!(is_system_notice("Сообщения и звонки защищены сквозным шифрованием"));
        assert!(!is_system_notice("I left early today"));
        assert!(!is_system_notice("<Media omitted>"));
        assert!(!is_system_notice("Добрый вечер"));
    }

    #[test]
    fn test_notice_phrases_inside_messages_are_kept() {
        assert!(!is_system_notice("sorry, I missed video call from you"));
        assert!(!is_system_notice("why does it say missed voice call twice"));
        assert!(!is_system_notice(
            "apparently messages and calls are end-to-end encrypted now"
        ));
        assert!(!is_system_notice("did your security code change?"));
        assert!(!is_system_notice("Я видел: Пропущенный видеозвонок"));
    }

    #[test]
    fn test_slash_sibling() {
        assert_eq!(
            DateFormat::UsDashed.slash_sibling(),
            Some(DateFormat::EuSlashDashed)
        );
        assert_eq!(
            DateFormat::EuSlashBracketed.slash_sibling(),
            Some(DateFormat::UsBracketed)
        );
        assert_eq!(DateFormat::EuDotDashed.slash_sibling(), None);
    }

    #[test]
    fn test_resolve_slash_order_switches_on_late_day() {
        let lines = [
            "01/02/2024, 10:00 - Alice: one",
            "02/02/2024, 10:00 - Bob: two",
            "13/02/2024, 10:00 - Alice: three",
        ];
        assert_eq!(
            resolve_slash_order(DateFormat::UsDashed, lines),
            DateFormat::EuSlashDashed
        );
    }

    #[test]
    fn test_resolve_slash_order_keeps_tie_and_us_dates() {
        let ambiguous = ["01/02/2024, 10:00 - Alice: one"];
        assert_eq!(
            resolve_slash_order(DateFormat::UsDashed, ambiguous),
            DateFormat::UsDashed
        );

        let us = ["01/02/2024, 10:00 - Alice: one", "01/25/2024, 10:00 - Bob: two"];
        assert_eq!(
            resolve_slash_order(DateFormat::UsDashed, us),
            DateFormat::UsDashed
        );
        assert_eq!(
            resolve_slash_order(DateFormat::EuDotDashed, ["13.02.2024, 10:00 - A: b"]),
            DateFormat::EuDotDashed
        );
    }
}
