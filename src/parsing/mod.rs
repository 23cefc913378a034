//! Export-format parsing.
//!
//! - [`whatsapp`] - header dialects, dialect detection and line classification
//! - [`WhatsAppParser`] / [`Records`] - lazy message iterator over an export
//! - [`read_export`] - strict UTF-8 file loading

pub mod whatsapp;

mod records;

use std::fs;
use std::path::Path;

use crate::error::{ChatseedError, Result};

pub use records::{Records, WhatsAppParser};

/// Reads an export file as UTF-8.
///
/// Undecodable bytes are a fatal [`ChatseedError::Utf8`] naming the file;
/// nothing is replaced or skipped. A leading byte-order mark is removed.
pub fn read_export(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let mut content = String::from_utf8(bytes).map_err(|e| ChatseedError::utf8(path, e))?;
    if content.starts_with('\u{feff}') {
        content.drain(..'\u{feff}'.len_utf8());
    }
    Ok(content)
}
