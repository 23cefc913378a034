//! # Chatseed
//!
//! A Rust library for turning WhatsApp chat exports into example
//! conversations for LLM character cards.
//!
//! ## Overview
//!
//! Chatseed reads a WhatsApp TXT export (iOS or Android, US or EU dates),
//! keeps the messages between two chosen participants, cuts the chat into
//! conversations at long silences, and writes a size-limited document:
//!
//! ```json
//! {
//!   "example_conversation": [
//!     {
//!       "{{random_user_1}}": "hey",
//!       "{{char}}": "hi!",
//!       "{{char}}": "what's up?"
//!     }
//!   ]
//! }
//! ```
//!
//! Role keys repeat inside a conversation, which is what character-card
//! templates expect.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatseed::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::new("Razanius12", "My Partner")
//!         .with_split_minutes(15)
//!         .with_character_limit(20_000);
//!
//!     let pipeline = Pipeline::new(config)?;
//!     let report = pipeline.run_file(Path::new("chat.txt"), Path::new("card.json"))?;
//!
//!     println!("{} conversations written", report.selected);
//!     Ok(())
//! }
//! ```
//!
//! ## Using the stages directly
//!
//! ```rust
//! use chatseed::prelude::*;
//!
//! let export = "[1/15/24, 10:30:00 AM] Alice: Hello\n[1/15/24, 10:31:00 AM] Bob: Hi";
//! let messages = WhatsAppParser::new().parse_str(export);
//!
//! let kept: Vec<Message> = apply_filters(messages, &FilterPolicy::default()).collect();
//! let conversations: Vec<Conversation> = segment(kept, 15).collect();
//! assert_eq!(conversations.len(), 1);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - WhatsApp export parsing
//!   - [`WhatsAppParser`](parsing::WhatsAppParser), [`Records`](parsing::Records)
//!   - [`parsing::whatsapp`] - date formats and line classification
//! - [`core`] - Pipeline stages
//!   - [`core::filter`] - [`FilterPolicy`](core::FilterPolicy), [`apply_filters`](core::apply_filters)
//!   - [`core::segment`] - [`Conversation`](core::Conversation), [`segment`](core::segment())
//!   - [`core::validate`] - [`BlockValidator`](core::BlockValidator)
//!   - [`core::dialogue`] - [`Dialogue`](core::Dialogue), [`Turn`](core::Turn)
//!   - [`core::budget`] - [`Budgeter`](core::Budgeter)
//!   - [`core::output`] - [`DocumentWriter`](core::DocumentWriter), [`read_document`](core::read_document)
//! - [`pipeline`] - [`Pipeline`](pipeline::Pipeline), [`PipelineReport`](pipeline::PipelineReport)
//! - [`config`] - [`PipelineConfig`](config::PipelineConfig), [`WhatsAppConfig`](config::WhatsAppConfig)
//! - [`format`] - [`OutputStyle`](format::OutputStyle)
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - Unified error types ([`ChatseedError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parsing;
pub mod pipeline;

// Re-export the main types at the crate root for convenience
pub use error::{ChatseedError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatseed::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatseedError, Result};

    // Configuration
    pub use crate::config::{PipelineConfig, WhatsAppConfig};

    // Parsing
    pub use crate::parsing::WhatsAppParser;

    // Stages
    pub use crate::core::{
        BlockValidator, Budgeter, Conversation, Dialogue, FilterPolicy, Participants, Role,
        RoleLabels, Turn, apply_filters, segment,
    };

    // Output
    pub use crate::core::{read_document, to_document, write_document};
    pub use crate::format::OutputStyle;

    // Pipeline
    pub use crate::pipeline::{Pipeline, PipelineOutput, PipelineReport};
}
