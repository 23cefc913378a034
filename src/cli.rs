//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`StyleArg`] - Output style options
//!
//! Every setting is optional on the command line so that values from a
//! `--config` file survive unless a flag overrides them. [`Args::to_config`]
//! merges the layers: flags, then the config file, then defaults.
//!
//! ```rust
//! use chatseed::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from([
//!     "chatseed", "chat.txt", "-o", "card.json",
//!     "--user", "Razanius12", "--char", "My Partner", "--keep-links",
//! ]);
//! let config = args.to_config()?;
//!
//! assert_eq!(config.char_name, "My Partner");
//! assert!(!config.filter.filter_links);
//! # Ok::<(), chatseed::ChatseedError>(())
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::format::OutputStyle;

/// Turn a WhatsApp chat export into example conversations for a
/// character card.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatseed")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatseed chat.txt -o card.json --user Razanius12 --char \"My Partner\"
    chatseed chat.txt -o card.json --user Me --char Bot --split-minutes 30 --seed 7
    chatseed chat.txt -o card.json --config settings.json --keep-links
    chatseed chat.txt -o card.json --config settings.json --filter-media --no-media-replacement
    chatseed chat.txt -o card.json --user Me --char Bot --media-replacement \"[photo]\"")]
pub struct Args {
    /// Path to the WhatsApp TXT export
    pub input: PathBuf,

    /// Path to the output document
    #[arg(short, long, default_value = "example_conversation.json")]
    pub output: PathBuf,

    /// Sender name that becomes the user role
    #[arg(long = "user", value_name = "NAME")]
    pub user_name: Option<String>,

    /// Sender name that becomes the character role
    #[arg(long = "char", value_name = "NAME")]
    pub char_name: Option<String>,

    /// Largest silence in minutes that still continues a conversation [default: 15]
    #[arg(long, value_name = "MINUTES")]
    pub split_minutes: Option<u32>,

    /// Maximum document length in characters [default: 20000]
    #[arg(long, value_name = "CHARS")]
    pub character_limit: Option<usize>,

    /// Smallest conversation that is kept [default: 4]
    #[arg(long = "min-messages", value_name = "N")]
    pub min_messages: Option<usize>,

    /// Keep media placeholder messages
    #[arg(long, overrides_with = "filter_media")]
    pub keep_media: bool,

    /// Filter media placeholder messages even if the config file keeps them
    #[arg(long, overrides_with = "keep_media")]
    pub filter_media: bool,

    /// Keep messages containing links
    #[arg(long, overrides_with = "filter_links")]
    pub keep_links: bool,

    /// Filter messages containing links even if the config file keeps them
    #[arg(long, overrides_with = "keep_links")]
    pub filter_links: bool,

    /// Replace media messages with this text instead of dropping them
    #[arg(long, value_name = "TEXT", conflicts_with = "no_media_replacement")]
    pub media_replacement: Option<String>,

    /// Drop media messages even if the config file sets a replacement
    #[arg(long)]
    pub no_media_replacement: bool,

    /// Replace link messages with this text instead of dropping them
    #[arg(long, value_name = "TEXT", conflicts_with = "no_link_replacement")]
    pub link_replacement: Option<String>,

    /// Drop link messages even if the config file sets a replacement
    #[arg(long)]
    pub no_link_replacement: bool,

    /// Seed for choosing conversations (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Layout of each conversation entry
    #[arg(long, value_enum)]
    pub style: Option<StyleArg>,

    /// JSON file with pipeline settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep line breaks inside messages
    #[arg(long, overrides_with = "flatten_newlines")]
    pub keep_newlines: bool,

    /// Replace line breaks with spaces even if the config file keeps them
    #[arg(long, overrides_with = "keep_newlines")]
    pub flatten_newlines: bool,

    /// Print debug diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the pipeline configuration from the config file and flags.
    ///
    /// The result is not validated; [`Pipeline::new`](crate::pipeline::Pipeline::new)
    /// does that.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(name) = &self.user_name {
            config.user_name.clone_from(name);
        }
        if let Some(name) = &self.char_name {
            config.char_name.clone_from(name);
        }
        if let Some(minutes) = self.split_minutes {
            config.split_minutes = minutes;
        }
        if let Some(limit) = self.character_limit {
            config.character_limit = limit;
        }
        if let Some(min) = self.min_messages {
            config.min_messages_per_conversation = min;
        }
        if self.keep_media {
            config.filter.filter_media = false;
        }
        if self.filter_media {
            config.filter.filter_media = true;
        }
        if self.keep_links {
            config.filter.filter_links = false;
        }
        if self.filter_links {
            config.filter.filter_links = true;
        }
        if self.no_media_replacement {
            config.filter.media_replacement = None;
        }
        if let Some(text) = &self.media_replacement {
            config.filter.media_replacement = Some(text.clone());
        }
        if self.no_link_replacement {
            config.filter.link_replacement = None;
        }
        if let Some(text) = &self.link_replacement {
            config.filter.link_replacement = Some(text.clone());
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(style) = self.style {
            config.style = style.into();
        }
        if self.keep_newlines {
            config.flatten_newlines = false;
        }
        if self.flatten_newlines {
            config.flatten_newlines = true;
        }

        Ok(config)
    }
}

/// Output style options.
///
/// - [`DuplicateKeys`](StyleArg::DuplicateKeys) - one object per conversation, keys repeat
/// - [`TurnObjects`](StyleArg::TurnObjects) - array of single-key objects per conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum StyleArg {
    /// One object per conversation with repeated role keys (default)
    #[default]
    #[value(alias = "duplicate")]
    DuplicateKeys,

    /// Array of single-key turn objects per conversation
    #[value(alias = "objects")]
    TurnObjects,
}

// Conversion to library style type
impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> OutputStyle {
        match style {
            StyleArg::DuplicateKeys => OutputStyle::DuplicateKeys,
            StyleArg::TurnObjects => OutputStyle::TurnObjects,
        }
    }
}
