//! Reads generated documents back without losing repeated keys.
//!
//! Deserializing into a map would keep only the last `{{char}}` of each
//! entry. The visitors here walk object members in order and collect them
//! as pairs, and accept both [`OutputStyle`](crate::format::OutputStyle)
//! layouts.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};

use crate::core::dialogue::{Dialogue, Turn};
use crate::core::participants::RoleLabels;
use crate::error::{ChatseedError, Result};

/// Ordered `(label, text)` pairs of one conversation entry.
pub type LabeledTurns = Vec<(String, String)>;

#[derive(Deserialize)]
struct RawDocument {
    example_conversation: Vec<Entry>,
}

struct Entry(LabeledTurns);

struct TurnObject(LabeledTurns);

struct PairsVisitor;

impl<'de> Visitor<'de> for PairsVisitor {
    type Value = LabeledTurns;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of label/text members")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((label, text)) = map.next_entry::<String, String>()? {
            pairs.push((label, text));
        }
        Ok(pairs)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = LabeledTurns;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of turns or an array of single-turn objects")
    }

    fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        PairsVisitor.visit_map(map)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut pairs = Vec::new();
        while let Some(TurnObject(turn)) = seq.next_element()? {
            pairs.extend(turn);
        }
        Ok(pairs)
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EntryVisitor).map(Entry)
    }
}

impl<'de> Deserialize<'de> for TurnObject {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PairsVisitor).map(TurnObject)
    }
}

/// Parses a document into per-conversation `(label, text)` pairs, in order.
///
/// ```
/// use chatseed::core::output::read_document;
///
/// let doc = r#"{"example_conversation": [{"{{char}}": "a", "{{char}}": "b"}]}"#;
/// let entries = read_document(doc)?;
/// assert_eq!(entries[0].len(), 2);
/// # Ok::<(), chatseed::ChatseedError>(())
/// ```
pub fn read_document(text: &str) -> Result<Vec<LabeledTurns>> {
    let raw: RawDocument = serde_json::from_str(text)?;
    Ok(raw.example_conversation.into_iter().map(|e| e.0).collect())
}

/// Parses a document into dialogues, resolving labels to roles.
///
/// Fails if an entry uses a key that is neither label.
pub fn read_dialogues(text: &str, labels: &RoleLabels) -> Result<Vec<Dialogue>> {
    read_document(text)?
        .into_iter()
        .map(|pairs| {
            pairs
                .into_iter()
                .map(|(label, text)| {
                    labels
                        .role_for(&label)
                        .map(|role| Turn::new(role, text))
                        .ok_or_else(|| {
                            ChatseedError::invalid_document(format!("unknown role label '{label}'"))
                        })
                })
                .collect::<Result<Vec<_>>>()
                .map(Dialogue::new)
        })
        .collect()
}
