//! # Rulebot Intents and Turns
//!
//! File: cli/src/chat/intent.rs
//!
//! The closed set of intent categories an input can fall into, the reply the
//! matcher produces, and the `Turn` record handed to the transcript.
//!
use chrono::{DateTime, Local};
use std::fmt;

/// Category assigned to one line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Greeting,
    HelpRequest,
    SmallTalk,
    KnowledgeQuery,
    ExitCommand,
    Unrecognized,
}

impl Intent {
    /// Stable lowercase label used in transcript records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::HelpRequest => "help",
            Intent::SmallTalk => "small_talk",
            Intent::KnowledgeQuery => "knowledge",
            Intent::ExitCommand => "exit",
            Intent::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The matcher's answer to one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

impl Reply {
    pub fn new(intent: Intent, text: impl Into<String>) -> Self {
        Self {
            intent,
            text: text.into(),
        }
    }

    /// True when the session should end after printing this reply.
    pub fn ends_session(&self) -> bool {
        self.intent == Intent::ExitCommand
    }
}

/// One input/response exchange. Built once, recorded, never changed.
#[derive(Debug, Clone)]
pub struct Turn {
    pub user_input: String,
    pub bot_response: String,
    pub intent: Intent,
    pub timestamp: DateTime<Local>,
}

impl Turn {
    pub fn new(user_input: &str, reply: &Reply) -> Self {
        Self {
            user_input: user_input.to_string(),
            bot_response: reply.text.clone(),
            intent: reply.intent,
            timestamp: Local::now(),
        }
    }
}
