//! # Rulebot Chat
//!
//! File: cli/src/chat/mod.rs
//!
//! ## Overview
//!
//! The conversation itself: knowledge lookup, rule matching, the console
//! loop and the transcript. `handle_chat` wires them together for one run of
//! the binary.
//!
//! ## Architecture
//!
//! - `knowledge.rs`: read-only question → answer store loaded from JSON
//! - `intent.rs`: `Intent`, `Reply` and `Turn`
//! - `replies.rs`: keyword sets and fixed reply texts
//! - `matcher.rs`: ordered rules plus knowledge fallback, `SessionContext`
//! - `transcript.rs`: append-only conversation log
//! - `session.rs`: the read / classify / print / record loop
//!
//! Startup flow:
//! 1. Load the knowledge base, falling back to an empty store with a warning
//! 2. Open the transcript (lazily, on the first turn)
//! 3. Run the session on stdin/stdout until exit or end of input
//!
use crate::core::config::{Config, ConfigOverrides};
use crate::core::error::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

pub mod intent;
pub mod knowledge;
pub mod matcher;
pub mod replies;
pub mod session;
pub mod transcript;

use knowledge::KnowledgeStore;
use matcher::{RuleMatcher, SessionContext};
use session::{Session, SessionEnd};
use transcript::TranscriptLog;

/// Local-time format shared by transcript records and the time reply.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Optional flags; running without any of them is the normal use.
#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Knowledge base JSON file [default: knowledge_base.json]
    #[arg(long, value_name = "PATH")]
    pub knowledge: Option<PathBuf>,

    /// Transcript file to append to [default: conversation_history.txt]
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Name the bot answers with
    #[arg(long, value_name = "BOT_NAME")]
    pub name: Option<String>,

    /// Write transcript lines without timestamps
    #[arg(long)]
    pub no_timestamps: bool,
}

impl ChatArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            bot_name: self.name.clone(),
            knowledge_path: self.knowledge.clone(),
            transcript_path: self.transcript.clone(),
            no_timestamps: self.no_timestamps,
        }
    }
}

/// Loads the knowledge base, degrading to an empty store on failure.
pub fn load_knowledge_or_empty(config: &Config) -> KnowledgeStore {
    match KnowledgeStore::load(&config.knowledge_path()) {
        Ok(store) => store,
        Err(e) => {
            warn!("Continuing with an empty knowledge base: {:#}", e);
            eprintln!("Warning: {:#}. Continuing with an empty knowledge base.", e);
            KnowledgeStore::empty()
        }
    }
}

/// # Handle Chat (`handle_chat`)
///
/// Runs one interactive session on the process's stdin/stdout.
///
/// ## Returns
///
/// * `Result<SessionEnd>`: how the session ended. Only console failures are
///   errors.
pub fn handle_chat(config: &Config) -> Result<SessionEnd> {
    let knowledge = load_knowledge_or_empty(config);
    let transcript = TranscriptLog::new(config.transcript_path(), config.transcript.timestamps);
    info!(
        "Starting session: {} knowledge entries, transcript at {}",
        knowledge.len(),
        transcript.path().display()
    );

    let context = SessionContext::new(
        config.bot.name.clone(),
        transcript.path().display().to_string(),
    );
    let mut session = Session::new(RuleMatcher::new(&knowledge), context, &transcript);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let end = session.run(stdin.lock(), stdout.lock())?;
    info!("Session finished after {} turns", session.turns());
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::KnowledgeConfig;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_knowledge_file_gives_empty_store() {
        let dir = tempdir().unwrap();
        let config = Config {
            knowledge: KnowledgeConfig {
                path: dir.path().join("absent.json").to_string_lossy().into_owned(),
            },
            ..Default::default()
        };
        assert!(load_knowledge_or_empty(&config).is_empty());
    }

    #[test]
    fn present_knowledge_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, r#"{ "what is ai": "AI." }"#).unwrap();
        let config = Config {
            knowledge: KnowledgeConfig {
                path: path.to_string_lossy().into_owned(),
            },
            ..Default::default()
        };
        assert_eq!(load_knowledge_or_empty(&config).lookup("What is AI"), Some("AI."));
    }

    #[test]
    fn args_map_to_overrides() {
        let args = ChatArgs {
            name: Some("Rusty".into()),
            no_timestamps: true,
            ..Default::default()
        };
        let overrides = args.overrides();
        assert_eq!(overrides.bot_name.as_deref(), Some("Rusty"));
        assert!(overrides.knowledge_path.is_none());
        assert!(overrides.no_timestamps);
    }
}
