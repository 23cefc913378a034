//! Document writer that keeps repeated keys.
//!
//! Entries are emitted line by line instead of going through a map, so
//! consecutive turns by the same role keep their own key each.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::dialogue::Dialogue;
use crate::core::participants::RoleLabels;
use crate::error::Result;
use crate::format::OutputStyle;

/// Top-level member that holds the conversations.
pub const DOCUMENT_KEY: &str = "example_conversation";

const HEADER: &str = "{\n  \"example_conversation\": [\n";
const FOOTER: &str = "  ]\n}";
const ENTRY_INDENT: &str = "    ";
const TURN_INDENT: &str = "      ";

/// Renders dialogues into the output document.
///
/// # Format
///
/// ```json
/// {
///   "example_conversation": [
///     {
///       "{{char}}": "Hi!",
///       "{{char}}": "You there?",
///       "{{random_user_1}}": "Yes"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    style: OutputStyle,
    labels: RoleLabels,
}

impl DocumentWriter {
    /// Creates a writer for `style` with the given role keys.
    pub fn new(style: OutputStyle, labels: RoleLabels) -> Self {
        Self { style, labels }
    }

    /// Returns the entry style.
    pub fn style(&self) -> OutputStyle {
        self.style
    }

    /// Renders one dialogue as an indented entry, without a trailing separator.
    pub fn render_entry(&self, dialogue: &Dialogue) -> Result<String> {
        let (open, close) = match self.style {
            OutputStyle::DuplicateKeys => ('{', '}'),
            OutputStyle::TurnObjects => ('[', ']'),
        };

        if dialogue.is_empty() {
            return Ok(format!("{ENTRY_INDENT}{open}{close}"));
        }

        let mut lines = Vec::with_capacity(dialogue.len());
        for (label, text) in dialogue.labeled(&self.labels) {
            let key = serde_json::to_string(label)?;
            let value = serde_json::to_string(text)?;
            let line = match self.style {
                OutputStyle::DuplicateKeys => format!("{TURN_INDENT}{key}: {value}"),
                OutputStyle::TurnObjects => format!("{TURN_INDENT}{{{key}: {value}}}"),
            };
            lines.push(line);
        }

        Ok(format!(
            "{ENTRY_INDENT}{open}\n{}\n{ENTRY_INDENT}{close}",
            lines.join(",\n")
        ))
    }

    /// Characters one entry adds to the document, separator included.
    ///
    /// Together with [`envelope_cost`](Self::envelope_cost) this is exact:
    /// a document of entries `e1..en` (n >= 1) is
    /// `envelope_cost() + entry_cost(e1) + ... + entry_cost(en)` characters.
    pub fn entry_cost(&self, dialogue: &Dialogue) -> Result<usize> {
        Ok(self.render_entry(dialogue)?.chars().count() + 2)
    }

    /// Characters of the envelope, minus the one newline the first entry shares.
    pub fn envelope_cost(&self) -> usize {
        HEADER.chars().count() + FOOTER.chars().count() - 1
    }

    /// Length of the document with no entries.
    pub fn empty_len(&self) -> usize {
        HEADER.len() + FOOTER.len()
    }

    /// Renders the whole document.
    pub fn render(&self, dialogues: &[Dialogue]) -> Result<String> {
        let entries = dialogues
            .iter()
            .map(|d| self.render_entry(d))
            .collect::<Result<Vec<_>>>()?;

        let mut out = String::from(HEADER);
        if !entries.is_empty() {
            out.push_str(&entries.join(",\n"));
            out.push('\n');
        }
        out.push_str(FOOTER);
        Ok(out)
    }

    /// Renders the document and writes it to `output_path`.
    pub fn write(&self, dialogues: &[Dialogue], output_path: &Path) -> Result<()> {
        let document = self.render(dialogues)?;
        let mut file = File::create(output_path)?;
        file.write_all(document.as_bytes())?;
        Ok(())
    }
}

/// Renders dialogues as a document string.
///
/// Same format as [`write_document`], but returns a String instead of
/// writing to a file.
pub fn to_document(dialogues: &[Dialogue], style: OutputStyle, labels: &RoleLabels) -> Result<String> {
    DocumentWriter::new(style, labels.clone()).render(dialogues)
}

/// Writes dialogues as a document to `output_path`.
pub fn write_document(
    dialogues: &[Dialogue],
    output_path: &Path,
    style: OutputStyle,
    labels: &RoleLabels,
) -> Result<()> {
    DocumentWriter::new(style, labels.clone()).write(dialogues, output_path)
}
