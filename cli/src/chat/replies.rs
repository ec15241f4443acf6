//! # Rulebot Reply Texts
//!
//! File: cli/src/chat/replies.rs
//!
//! Keyword sets and the fixed replies attached to them. Keyword matching is
//! word-based and case-insensitive (see `common::text`); a multi-word entry
//! matches only as a contiguous phrase.
//!
use super::TIMESTAMP_FORMAT;
use chrono::Local;

pub const EXIT_WORDS: &[&str] = &["exit", "quit", "bye", "goodbye"];

pub const GREETING_WORDS: &[&str] = &["hi", "hello", "hey", "salam", "assalamualaikum"];

/// Phrases that introduce the user's name; the name follows the phrase.
pub const NAME_INTRODUCTIONS: &[&str] = &["my name is", "call me"];

pub const HELP_PHRASES: &[&str] = &["help", "how to use", "commands", "menu", "what can you do"];

pub const FALLBACK: &str = "I don't understand. Try asking differently or type 'help'.";

pub const GREETING: &str = "Hello! I'm a simple rule-based chatbot. Type 'help' to see what I can do.";

pub const HELP: &str = "Here are some things you can try:\n\
- Say: hi / hello\n\
- Tell me your name: 'my name is Sam'\n\
- Small talk: 'how are you', 'who are you', 'what is your name', 'thanks'\n\
- Ask a question from my knowledge base, e.g. 'what is AI' or 'define AI'\n\
- Type: time\n\
- Type: exit";

/// Small-talk topics, each with the phrases that trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    HowAreYou,
    WhoAreYou,
    BotName,
    UserName,
    Thanks,
    Time,
}

/// Checked in order; the first topic with a matching phrase answers.
pub const SMALL_TALK: &[(SmallTalk, &[&str])] = &[
    (SmallTalk::HowAreYou, &["how are you", "how r you", "how're you"]),
    (SmallTalk::WhoAreYou, &["who are you", "what are you"]),
    (SmallTalk::UserName, &["what is my name", "who am i"]),
    (SmallTalk::BotName, &["what is your name", "your name"]),
    (SmallTalk::Thanks, &["thanks", "thank you", "thx"]),
    (SmallTalk::Time, &["what time is it", "time"]),
];

pub fn greet_known(name: &str) -> String {
    format!("Hello, {}! How can I help you today?", name)
}

pub fn greet_introduced(name: &str) -> String {
    format!(
        "Nice to meet you, {}! Ask me something like 'what is AI', or type 'help'.",
        name
    )
}

pub fn farewell(transcript: &str) -> String {
    format!("Goodbye! Conversation saved in {}", transcript)
}

pub fn small_talk(topic: SmallTalk, bot_name: &str, user_name: Option<&str>) -> String {
    match topic {
        SmallTalk::HowAreYou => {
            "I'm doing good! I'm here and ready to help. What would you like to ask?".to_string()
        }
        SmallTalk::WhoAreYou => format!(
            "I'm {}, a simple rule-based chatbot. I use pattern matching and a knowledge base to answer questions.",
            bot_name
        ),
        SmallTalk::BotName => format!("My name is {}.", bot_name),
        SmallTalk::UserName => match user_name {
            Some(name) => format!("Your name is {} (as you told me).", name),
            None => "I don't know your name yet. You can say: 'my name is ...'.".to_string(),
        },
        SmallTalk::Thanks => "You're welcome! If you need more help, just type 'help'.".to_string(),
        SmallTalk::Time => format!("Current time is: {}", Local::now().format(TIMESTAMP_FORMAT)),
    }
}
