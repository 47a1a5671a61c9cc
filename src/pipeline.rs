//! Entry-processing pipeline: clean, truncate, summarise, report.

use crate::agent::{AgentError, Summarize};
use crate::clean::clean;
use crate::feed::FeedEntry;
use colored::Colorize;
use std::io::{self, Write};

/// Only the first entries of a feed are summarised
pub const MAX_ENTRIES: usize = 5;

/// Content sent to the model is cut to this many characters
pub const MAX_CONTENT_CHARS: usize = 3000;

const SEPARATOR_WIDTH: usize = 50;

/// Build the text for one entry: title, a blank line, then the cleaned description,
/// cut to `MAX_CONTENT_CHARS` characters.
pub fn prepare_content(entry: &FeedEntry) -> String {
    let content = format!("{}\n\n{}", entry.title(), clean(entry.description()));
    truncate_chars(content, MAX_CONTENT_CHARS)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

/// Runs entries through a summariser and writes one block per entry.
pub struct Pipeline<S> {
    summarizer: S,
}

impl<S: Summarize> Pipeline<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer }
    }

    /// Summarise a single entry
    pub async fn process_entry(&self, entry: &FeedEntry) -> Result<String, AgentError> {
        let content = prepare_content(entry);
        self.summarizer.summarize(&content).await
    }

    /// Summarise up to `MAX_ENTRIES` entries in order, reporting each to `out`.
    ///
    /// A failing entry yields an error line and the loop moves on. Only a write
    /// failure on `out` stops the run.
    pub async fn run<W: Write>(&self, entries: &[FeedEntry], out: &mut W) -> io::Result<()> {
        let mut failed = 0;

        for (i, entry) in entries.iter().take(MAX_ENTRIES).enumerate() {
            let index = i + 1;
            match self.process_entry(entry).await {
                Ok(summary) => {
                    tracing::info!(index, "entry summarised");
                    write_block(out, index, &summary)?;
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(index, error = %e, "entry failed");
                    writeln!(
                        out,
                        "{}",
                        format!("Error processing entry {index}: {e}").red()
                    )?;
                }
            }
        }

        tracing::info!(
            processed = entries.len().min(MAX_ENTRIES),
            skipped = entries.len().saturating_sub(MAX_ENTRIES),
            failed,
            "run finished"
        );
        Ok(())
    }
}

/// Write the prepared content of up to `MAX_ENTRIES` entries without summarising
pub fn preview<W: Write>(entries: &[FeedEntry], out: &mut W) -> io::Result<()> {
    for (i, entry) in entries.iter().take(MAX_ENTRIES).enumerate() {
        write_block(out, i + 1, &prepare_content(entry))?;
    }
    Ok(())
}

fn write_block<W: Write>(out: &mut W, index: usize, body: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("📰 Entry {index}:").bold())?;
    writeln!(out, "{body}")?;
    writeln!(out, "\n{}\n", "-".repeat(SEPARATOR_WIDTH))
}
