//! Output document writer and reader.
//!
//! This module provides:
//! - [`DocumentWriter`] / [`to_document`] / [`write_document`] - render dialogues,
//!   keeping repeated role keys in order
//! - [`read_document`] / [`read_dialogues`] - parse a document back without
//!   collapsing repeated keys
//!
//! # Example
//!
//! ```rust
//! use chatseed::core::dialogue::{Dialogue, Turn};
//! use chatseed::core::output::{read_document, to_document};
//! use chatseed::core::participants::{Role, RoleLabels};
//! use chatseed::format::OutputStyle;
//!
//! let dialogues = vec![Dialogue::new(vec![
//!     Turn::new(Role::Character, "Hi!"),
//!     Turn::new(Role::Character, "You there?"),
//!     Turn::new(Role::User, "Yes"),
//! ])];
//!
//! let doc = to_document(&dialogues, OutputStyle::DuplicateKeys, &RoleLabels::default())?;
//! let entries = read_document(&doc)?;
//! assert_eq!(entries[0][1], ("{{char}}".to_string(), "You there?".to_string()));
//! # Ok::<(), chatseed::ChatseedError>(())
//! ```

mod json_writer;
mod reader;

pub use json_writer::{DOCUMENT_KEY, DocumentWriter, to_document, write_document};
pub use reader::{LabeledTurns, read_dialogues, read_document};
