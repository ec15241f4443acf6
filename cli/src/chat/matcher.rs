//! # Rulebot Rule Matcher
//!
//! File: cli/src/chat/matcher.rs
//!
//! ## Overview
//!
//! Turns one line of user input into exactly one `Reply`. Rules are kept in
//! a fixed, ordered table and the first rule whose predicate holds produces
//! the reply:
//!
//! 1. `ExitCommand` – any exit word, even next to other keywords
//! 2. `Greeting` – a greeting word or a name introduction
//! 3. `HelpRequest`
//! 4. `SmallTalk`
//!
//! Input that passes all four is looked up in the knowledge store, giving
//! either `KnowledgeQuery` or the `Unrecognized` fallback. A leading
//! `define` is read as `what is`, so "define AI" asks for "what is ai". The only state that
//! survives between turns is the user's introduced name, held in
//! `SessionContext`.
//!
use super::intent::{Intent, Reply};
use super::knowledge::KnowledgeStore;
use super::replies::{self, SmallTalk};
use crate::common::text;
use tracing::debug;

/// Upper bound on an introduced name, in characters.
const MAX_NAME_LEN: usize = 40;
/// At most this many words are taken as the name.
const MAX_NAME_WORDS: usize = 3;
/// Words that end a name ("my name is Sam and ...").
const NAME_STOP_WORDS: &[&str] = &["and", "but", "so", "i", "im"];
/// Leading word rewritten to `what is` before a knowledge lookup.
const DEFINE_PREFIX: &str = "define ";

/// Per-session state the matcher may read and update.
#[derive(Debug, Clone)]
pub struct SessionContext {
    bot_name: String,
    transcript: String,
    user_name: Option<String>,
}

impl SessionContext {
    /// `transcript` is only used to tell the user where the log went.
    pub fn new(bot_name: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            transcript: transcript.into(),
            user_name: None,
        }
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }
}

/// One input line split into words, original casing kept.
struct Utterance<'a> {
    words: Vec<&'a str>,
    /// `clause_ends[i]` is set when punctuation closes a clause after `words[i]`.
    clause_ends: Vec<bool>,
}

impl<'a> Utterance<'a> {
    fn new(input: &'a str) -> Self {
        let (words, clause_ends) = text::words_with_breaks(input).into_iter().unzip();
        Self { words, clause_ends }
    }

    fn contains_any(&self, phrases: &[&str]) -> bool {
        text::contains_any(&self.words, phrases)
    }

    /// The name following "my name is" / "call me", if one is present.
    ///
    /// The name ends at a stop word, a non-alphabetic word, or the end of the
    /// clause ("my name is Sam. Nice day" gives "Sam").
    fn introduced_name(&self) -> Option<String> {
        let start = replies::NAME_INTRODUCTIONS
            .iter()
            .find_map(|phrase| text::find_phrase(&self.words, phrase))?;
        let mut parts = Vec::new();
        for (word, ends_clause) in self.words[start..].iter().zip(&self.clause_ends[start..]) {
            let is_stop_word = NAME_STOP_WORDS
                .iter()
                .any(|stop| word.eq_ignore_ascii_case(stop));
            if parts.len() == MAX_NAME_WORDS
                || is_stop_word
                || !word.chars().all(char::is_alphabetic)
            {
                break;
            }
            parts.push(*word);
            if *ends_clause {
                break;
            }
        }
        let name = parts.join(" ");
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return None;
        }
        Some(name)
    }

    fn small_talk_topic(&self) -> Option<SmallTalk> {
        replies::SMALL_TALK
            .iter()
            .find(|(_, phrases)| self.contains_any(phrases))
            .map(|(topic, _)| *topic)
    }
}

/// A keyword rule: when `applies` holds, `respond` builds the reply text.
struct Rule {
    intent: Intent,
    applies: fn(&Utterance) -> bool,
    respond: fn(&Utterance, &mut SessionContext) -> String,
}

const RULES: &[Rule] = &[
    Rule {
        intent: Intent::ExitCommand,
        applies: |u| u.contains_any(replies::EXIT_WORDS),
        respond: |_, ctx| replies::farewell(&ctx.transcript),
    },
    Rule {
        intent: Intent::Greeting,
        applies: |u| u.contains_any(replies::GREETING_WORDS) || u.introduced_name().is_some(),
        respond: respond_greeting,
    },
    Rule {
        intent: Intent::HelpRequest,
        applies: |u| u.contains_any(replies::HELP_PHRASES),
        respond: |_, _| replies::HELP.to_string(),
    },
    Rule {
        intent: Intent::SmallTalk,
        applies: |u| u.small_talk_topic().is_some(),
        respond: respond_small_talk,
    },
];

fn respond_greeting(utterance: &Utterance, ctx: &mut SessionContext) -> String {
    if let Some(name) = utterance.introduced_name() {
        debug!("User introduced themselves as '{}'", name);
        let reply = replies::greet_introduced(&name);
        ctx.user_name = Some(name);
        return reply;
    }
    match ctx.user_name() {
        Some(name) => replies::greet_known(name),
        None => replies::GREETING.to_string(),
    }
}

fn respond_small_talk(utterance: &Utterance, ctx: &mut SessionContext) -> String {
    match utterance.small_talk_topic() {
        Some(topic) => replies::small_talk(topic, ctx.bot_name(), ctx.user_name()),
        None => replies::FALLBACK.to_string(),
    }
}

/// Classifies input against the keyword rules, then the knowledge store.
pub struct RuleMatcher<'a> {
    knowledge: &'a KnowledgeStore,
}

impl<'a> RuleMatcher<'a> {
    pub fn new(knowledge: &'a KnowledgeStore) -> Self {
        Self { knowledge }
    }

    /// # Classify Input (`classify`)
    ///
    /// Produces the single reply for `input`. Never fails: input that no
    /// rule or knowledge entry covers gets the fixed fallback.
    pub fn classify(&self, input: &str, ctx: &mut SessionContext) -> Reply {
        let utterance = Utterance::new(input);

        if let Some(rule) = RULES.iter().find(|rule| (rule.applies)(&utterance)) {
            debug!("Input matched rule: {}", rule.intent);
            return Reply::new(rule.intent, (rule.respond)(&utterance, ctx));
        }

        match self.lookup_knowledge(input) {
            Some(answer) => Reply::new(Intent::KnowledgeQuery, answer),
            None => {
                debug!("No rule or knowledge entry for '{}'", text::normalize(input));
                Reply::new(Intent::Unrecognized, replies::FALLBACK)
            }
        }
    }

    fn lookup_knowledge(&self, input: &str) -> Option<&'a str> {
        let normalized = text::normalize(input);
        if let Some(topic) = normalized.strip_prefix(DEFINE_PREFIX) {
            let question = format!("what is {}", topic);
            debug!("Reading '{}' as '{}'", normalized, question);
            if let Some(answer) = self.knowledge.lookup(&question) {
                return Some(answer);
            }
        }
        self.knowledge.lookup(&normalized)
    }
}
