//! # Rulebot Session Loop
//!
//! File: cli/src/chat/session.rs
//!
//! ## Overview
//!
//! Drives one conversation: prompt, read a line, classify it, print the
//! reply, record the turn. The loop ends when the matcher returns an exit
//! reply or the input runs dry.
//!
//! The loop is generic over `BufRead`/`Write` so tests can feed it scripted
//! input and capture what the user would see.
//!
//! ## Failure policy
//!
//! - transcript errors: printed as a warning, conversation continues
//! - input read errors (e.g. invalid UTF-8): warning, session ends normally
//! - console write errors: returned, since nobody can see the conversation
//!
use super::intent::Turn;
use super::matcher::{RuleMatcher, SessionContext};
use super::transcript::TranscriptLog;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// Why a session stopped. Neither case is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitCommand,
    EndOfInput,
}

pub struct Session<'a> {
    matcher: RuleMatcher<'a>,
    context: SessionContext,
    transcript: &'a TranscriptLog,
    turns: usize,
}

impl<'a> Session<'a> {
    pub fn new(
        matcher: RuleMatcher<'a>,
        context: SessionContext,
        transcript: &'a TranscriptLog,
    ) -> Self {
        Self {
            matcher,
            context,
            transcript,
            turns: 0,
        }
    }

    /// Number of turns answered so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// # Run Session (`run`)
    ///
    /// Prints the banner and loops until an exit command or end of input.
    ///
    /// ## Errors
    ///
    /// Only console write failures are returned; everything else is reported
    /// and absorbed.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionEnd> {
        info!("Chat session started");
        writeln!(
            output,
            "=== {}: Rule-Based Chatbot (Console) ===\nType 'help' to see commands. Type 'exit' to quit.\n",
            self.context.bot_name()
        )
        .context("Failed to write to console")?;

        let end = loop {
            write!(output, "You: ")
                .and_then(|_| output.flush())
                .context("Failed to write to console")?;

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    // Keep the shell prompt off the dangling "You: ".
                    writeln!(output).context("Failed to write to console")?;
                    break SessionEnd::EndOfInput;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    eprintln!("Warning: failed to read input: {}", e);
                    break SessionEnd::EndOfInput;
                }
            }

            let user_input = line.trim_end_matches(['\n', '\r']);
            let reply = self.matcher.classify(user_input, &mut self.context);
            writeln!(output, "Bot: {}\n", reply.text).context("Failed to write to console")?;

            let turn = Turn::new(user_input, &reply);
            if let Err(e) = self.transcript.record(&turn) {
                warn!("Transcript write failed: {:#}", e);
                eprintln!("Warning: {:#}", e);
            }
            self.turns += 1;

            if reply.ends_session() {
                break SessionEnd::ExitCommand;
            }
        };

        debug!("Session ended ({:?}) after {} turns", end, self.turns);
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::knowledge::KnowledgeStore;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn kb() -> KnowledgeStore {
        KnowledgeStore::from_pairs([("what is ai".to_string(), "Artificial intelligence.".to_string())])
    }

    fn run_script(
        kb: &KnowledgeStore,
        log: &TranscriptLog,
        script: &str,
    ) -> (SessionEnd, usize, String) {
        let mut session = Session::new(
            RuleMatcher::new(kb),
            SessionContext::new("Rulebot", log.path().display().to_string()),
            log,
        );
        let mut out = Vec::new();
        let end = session.run(Cursor::new(script), &mut out).unwrap();
        (end, session.turns(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_command_stops_reading() {
        let dir = tempdir().unwrap();
        let log = TranscriptLog::new(dir.path().join("h.txt"), false);
        let (end, turns, out) = run_script(&kb(), &log, "hi\nexit\nwhat is ai\n");

        assert_eq!(end, SessionEnd::ExitCommand);
        assert_eq!(turns, 2);
        assert!(out.contains("Bot: Goodbye!"));
        assert!(!out.contains("Artificial intelligence."));
    }

    #[test]
    fn end_of_input_is_a_normal_end() {
        let dir = tempdir().unwrap();
        let log = TranscriptLog::new(dir.path().join("h.txt"), false);
        let (end, turns, out) = run_script(&kb(), &log, "what is ai");

        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(turns, 1);
        assert!(out.contains("Bot: Artificial intelligence."));
    }

    #[test]
    fn every_turn_is_logged_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.txt");
        fs::write(&path, "previous session\n").unwrap();
        let log = TranscriptLog::new(&path, false);

        run_script(&kb(), &log, "hi\r\nwhat is ai\nnonsense\n");

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "previous session");
        assert!(lines[1].starts_with("USER: hi | BOT: Hello!"));
        assert!(lines[2].starts_with("USER: what is ai | BOT: Artificial intelligence."));
        assert!(lines[3].ends_with("(intent=unrecognized)"));
    }

    #[test]
    fn transcript_failure_does_not_stop_the_conversation() {
        let dir = tempdir().unwrap();
        // The transcript path is a directory, so every write fails.
        let log = TranscriptLog::new(dir.path(), false);
        let (end, turns, out) = run_script(&kb(), &log, "hi\nwhat is ai\nbye\n");

        assert_eq!(end, SessionEnd::ExitCommand);
        assert_eq!(turns, 3);
        assert!(out.contains("Bot: Artificial intelligence."));
    }

    #[test]
    fn invalid_utf8_ends_session_quietly() {
        let dir = tempdir().unwrap();
        let log = TranscriptLog::new(dir.path().join("h.txt"), false);
        let kb = KnowledgeStore::empty();
        let mut session = Session::new(
            RuleMatcher::new(&kb),
            SessionContext::new("Rulebot", "h.txt"),
            &log,
        );
        let mut out = Vec::new();
        let end = session
            .run(Cursor::new(vec![0xff, 0xfe, b'\n']), &mut out)
            .unwrap();
        assert_eq!(end, SessionEnd::EndOfInput);
        assert_eq!(session.turns(), 0);
    }
}
