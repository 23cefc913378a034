//! Core processing stages.
//!
//! This module contains:
//! - [`filter`] - Media and link policy
//! - [`participants`] - Speaker attribution and role labels
//! - [`segment`] - Time-gap grouping into conversations
//! - [`validate`] - Minimum-size and two-speaker rules
//! - [`dialogue`] - Role-labelled turn lists
//! - [`budget`] - Randomized selection under a character limit
//! - [`output`] - Document writer and reader

pub mod budget;
pub mod dialogue;
pub mod filter;
pub mod output;
pub mod participants;
pub mod segment;
pub mod validate;

// Re-export main types for convenience
pub use budget::Budgeter;
pub use dialogue::{Dialogue, Turn};
pub use filter::{FilterPolicy, Filtered, apply_filters};
pub use output::{DocumentWriter, read_document, to_document, write_document};
pub use participants::{Participants, Role, RoleLabels};
pub use segment::{Conversation, segment};
pub use validate::{BlockValidator, Rejection};

pub use crate::Message;
