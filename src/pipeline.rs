//! End-to-end conversion from an export to a character-card document.
//!
//! | Stage | Type |
//! |-------|------|
//! | parse | [`WhatsAppParser`] / [`Records`](crate::parsing::Records) |
//! | filter | [`FilterPolicy`](crate::core::FilterPolicy) |
//! | attribute | [`Participants`](crate::core::Participants) |
//! | segment | [`segment`] |
//! | validate | [`BlockValidator`] |
//! | select | [`Budgeter`] |
//! | serialize | [`DocumentWriter`] |
//!
//! Records stream lazily from the parser through segmentation. Only the
//! accepted conversations are held in memory for selection.
//!
//! # Example
//!
//! ```rust
//! use chatseed::config::PipelineConfig;
//! use chatseed::pipeline::Pipeline;
//!
//! let export = "\
//! 12/25/21, 12:51 PM - Alice: hey
//! 12/25/21, 12:52 PM - Bob: hi!
//! 12/25/21, 12:53 PM - Alice: how are you
//! 12/25/21, 12:54 PM - Bob: good";
//!
//! let pipeline = Pipeline::new(PipelineConfig::new("Alice", "Bob").with_seed(1))?;
//! let output = pipeline.run(export)?;
//!
//! assert_eq!(output.report.selected, 1);
//! assert!(output.document.contains(r#""{{char}}": "hi!""#));
//! # Ok::<(), chatseed::ChatseedError>(())
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::Message;
use crate::config::PipelineConfig;
use crate::core::budget::Budgeter;
use crate::core::dialogue::Dialogue;
use crate::core::filter::Filtered;
use crate::core::output::DocumentWriter;
use crate::core::participants::Participants;
use crate::core::segment::{Conversation, segment};
use crate::core::validate::{BlockValidator, Rejection};
use crate::error::Result;
use crate::parsing::{WhatsAppParser, read_export};

/// Counts of what each stage kept and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Records read from the export
    pub parsed: usize,
    /// Records removed by the media/link filter
    pub removed: usize,
    /// Records whose text was replaced by the filter
    pub replaced: usize,
    /// Records dropped because their text was blank
    pub blank: usize,
    /// Records from neither participant
    pub unattributed: usize,
    /// Conversation blocks found
    pub blocks: usize,
    /// Blocks with too few messages
    pub rejected_short: usize,
    /// Blocks where only one participant speaks
    pub rejected_one_sided: usize,
    /// Blocks that passed validation
    pub accepted: usize,
    /// Conversations written to the document
    pub selected: usize,
    /// Length of the document in characters
    pub output_chars: usize,
}

impl PipelineReport {
    /// Records that reached segmentation.
    pub fn attributed(&self) -> usize {
        self.parsed - self.removed - self.blank - self.unattributed
    }

    /// Blocks that failed validation.
    pub fn rejected(&self) -> usize {
        self.rejected_short + self.rejected_one_sided
    }

    /// Accepted conversations left out by the size budget.
    pub fn over_budget(&self) -> usize {
        self.accepted - self.selected
    }
}

/// Result of an in-memory run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The serialized document
    pub document: String,
    /// Selected conversations, oldest first
    pub dialogues: Vec<Dialogue>,
    /// Stage counts
    pub report: PipelineReport,
}

/// A validated, reusable pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    participants: Participants,
    parser: WhatsAppParser,
    validator: BlockValidator,
    writer: DocumentWriter,
}

impl Pipeline {
    /// Validates `config` and prepares the stages.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let participants = config.participants();
        Ok(Self {
            parser: WhatsAppParser::with_config(config.whatsapp()),
            validator: BlockValidator::new(
                config.min_messages_per_conversation,
                participants.clone(),
            ),
            writer: DocumentWriter::new(config.style, config.labels()),
            participants,
            config,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline on export text.
    ///
    /// Selection uses the configured seed, or OS entropy without one.
    pub fn run(&self, content: &str) -> Result<PipelineOutput> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with_rng(content, &mut rng)
    }

    /// Runs the pipeline on export text with a caller-supplied generator.
    pub fn run_with_rng<R>(&self, content: &str, rng: &mut R) -> Result<PipelineOutput>
    where
        R: Rng + ?Sized,
    {
        let mut report = PipelineReport::default();

        let conversations: Vec<Conversation> = {
            let records = self
                .parser
                .records(content)
                .filter_map(|msg| self.admit(msg, &mut report));
            segment(records, self.config.split_minutes).collect()
        };
        report.blocks = conversations.len();
        tracing::debug!(
            parsed = report.parsed,
            attributed = report.attributed(),
            blocks = report.blocks,
            "segmented records"
        );

        let mut candidates = Vec::new();
        for conversation in conversations {
            match self.validator.check(&conversation) {
                Ok(()) => {
                    let dialogue = Dialogue::from_conversation(
                        &conversation,
                        &self.participants,
                        self.config.flatten_newlines,
                    );
                    let cost = self.writer.entry_cost(&dialogue)?;
                    candidates.push((dialogue, cost));
                }
                Err(rejection) => {
                    tracing::debug!(
                        started_at = ?conversation.started_at(),
                        %rejection,
                        "conversation rejected"
                    );
                    match rejection {
                        Rejection::TooShort { .. } => report.rejected_short += 1,
                        Rejection::OneSided => report.rejected_one_sided += 1,
                    }
                }
            }
        }
        report.accepted = candidates.len();

        let budgeter = Budgeter::new(self.config.character_limit)
            .with_overhead(self.writer.envelope_cost());
        let dialogues: Vec<Dialogue> = budgeter
            .select(candidates, |(_, cost)| *cost, rng)
            .into_iter()
            .map(|(dialogue, _)| dialogue)
            .collect();
        report.selected = dialogues.len();

        let document = self.writer.render(&dialogues)?;
        report.output_chars = document.chars().count();
        tracing::debug!(
            accepted = report.accepted,
            selected = report.selected,
            chars = report.output_chars,
            limit = self.config.character_limit,
            "document rendered"
        );
        if report.selected == 0 && report.output_chars > self.config.character_limit {
            tracing::warn!(
                limit = self.config.character_limit,
                "character limit is smaller than an empty document"
            );
        }

        Ok(PipelineOutput {
            document,
            dialogues,
            report,
        })
    }

    /// Reads `input`, runs the pipeline and writes the document to `output`.
    ///
    /// The output file is only created once the document is complete.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<PipelineReport> {
        let content = read_export(input)?;
        let result = self.run(&content)?;

        let mut file = File::create(output)?;
        file.write_all(result.document.as_bytes())?;
        Ok(result.report)
    }

    /// Filter, blank and attribution checks for one parsed record.
    fn admit(&self, msg: Message, report: &mut PipelineReport) -> Option<Message> {
        report.parsed += 1;

        let msg = match self.config.filter.apply(msg) {
            Filtered::Unchanged(msg) => msg,
            Filtered::Replaced(msg) => {
                report.replaced += 1;
                msg
            }
            Filtered::Removed(_) => {
                report.removed += 1;
                return None;
            }
        };

        if msg.is_empty() {
            report.blank += 1;
            return None;
        }
        if !self.participants.contains(msg.sender()) {
            tracing::trace!(sender = msg.sender(), "record from neither participant");
            report.unattributed += 1;
            return None;
        }
        Some(msg)
    }
}
