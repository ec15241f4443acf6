//! # Rulebot Conversation Transcript
//!
//! File: cli/src/chat/transcript.rs
//!
//! ## Overview
//!
//! Appends one human-readable line per turn to a text file:
//!
//! ```text
//! [2026-10-17 09:30:00] USER: hi | BOT: Hello! ... (intent=greeting)
//! ```
//!
//! The file (and its parent directory) is created on first write and earlier
//! lines are never rewritten.
//!
//! ## Line format
//!
//! `[<timestamp>] USER: <input> | BOT: <response> (intent=<label>)`, where the
//! `[<timestamp>] ` prefix is present only when timestamps are enabled. Inside
//! `<input>` and `<response>`:
//!
//! - `\` is written as `\\`
//! - a line break (`\n`, `\r\n` or `\r`) is written as `\n`
//! - `|` is written as `\|`
//!
//! so a turn always occupies exactly one line, the first unescaped ` | `
//! separates user from bot, and a user who types a literal `\n` can be told
//! apart from a real line break.
//!
//! Write failures come back as `RulebotError::TranscriptWrite`; the session
//! reports them and keeps talking.
//!
use super::intent::Turn;
use super::TIMESTAMP_FORMAT;
use crate::common::fs::io;
use crate::core::error::{Result, RulebotError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only transcript file.
#[derive(Debug, Clone)]
pub struct TranscriptLog {
    path: PathBuf,
    timestamps: bool,
}

impl TranscriptLog {
    pub fn new(path: impl Into<PathBuf>, timestamps: bool) -> Self {
        Self {
            path: path.into(),
            timestamps,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Record Turn (`record`)
    ///
    /// Appends `turn` as a single line.
    ///
    /// ## Errors
    ///
    /// Returns `RulebotError::TranscriptWrite` (or a filesystem error when the
    /// parent directory cannot be created) if the line could not be written.
    pub fn record(&self, turn: &Turn) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            io::ensure_dir_exists(parent)?;
        }
        let line = self.format_turn(turn);
        io::append_line(&self.path, &line).map_err(|source| RulebotError::TranscriptWrite {
            path: self.path.clone(),
            source,
        })?;
        debug!("Recorded {} turn to {}", turn.intent, self.path.display());
        Ok(())
    }

    fn format_turn(&self, turn: &Turn) -> String {
        let body = format!(
            "USER: {} | BOT: {} (intent={})",
            single_line(&turn.user_input),
            single_line(&turn.bot_response),
            turn.intent
        );
        if self.timestamps {
            format!("[{}] {}", turn.timestamp.format(TIMESTAMP_FORMAT), body)
        } else {
            body
        }
    }
}

fn single_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            other => out.push(other),
        }
    }
    out
}
