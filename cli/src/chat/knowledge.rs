//! # Rulebot Knowledge Store
//!
//! File: cli/src/chat/knowledge.rs
//!
//! ## Overview
//!
//! An immutable question → answer table, loaded once at startup from a JSON
//! file and consulted by the rule matcher after every other rule has passed.
//!
//! Two source shapes are accepted:
//!
//! ```json
//! { "what is ai": "AI is ...", "what is nlp": "NLP is ..." }
//! ```
//!
//! ```json
//! [ { "question": "What is AI", "answer": "AI is ..." } ]
//! ```
//!
//! Questions are normalized (trimmed, lowercased, whitespace collapsed) when
//! loaded and when looked up, and lookup is an exact match on that form.
//! If the exact form misses, one more exact lookup is tried with ASCII
//! punctuation removed from both sides, so `"What is AI?"` finds
//! `"what is ai"` and `"what is a rule-based chatbot?"` finds
//! `"what is a rule-based chatbot"`.
//!
use crate::common::fs::io;
use crate::common::text;
use crate::core::error::{Result, RulebotError};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// One question/answer pair as written in the array form of the source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

/// Object form of the source, keeping the file's key order so duplicate
/// detection is deterministic.
struct OrderedPairs(Vec<(String, String)>);

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = OrderedPairs;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping question strings to answer strings")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((question, answer)) = map.next_entry::<String, String>()? {
                    pairs.push((question, answer));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Read-only lookup table from normalized question to answer.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeStore {
    entries: HashMap<String, String>,
    /// Same answers keyed by the question with punctuation removed.
    unpunctuated: HashMap<String, String>,
}

impl KnowledgeStore {
    /// A store with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// # Load Knowledge Base (`load`)
    ///
    /// Reads and parses the JSON knowledge source at `path`.
    ///
    /// ## Errors
    ///
    /// Returns `RulebotError::KnowledgeLoad` when the file is missing,
    /// unreadable, or not one of the accepted JSON shapes. Callers are expected
    /// to fall back to [`KnowledgeStore::empty`].
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |reason: String| RulebotError::KnowledgeLoad {
            path: path.to_path_buf(),
            reason,
        };

        if !path.exists() {
            return Err(load_error("file not found".to_string()).into());
        }
        if path.is_dir() {
            return Err(load_error("path is a directory".to_string()).into());
        }
        let raw = io::read_file_to_string(path).map_err(|e| load_error(format!("{:#}", e)))?;
        let pairs = parse_source(&raw).map_err(|e| load_error(e.to_string()))?;

        let store = Self::from_pairs(pairs);
        if store.is_empty() {
            warn!("Knowledge base {} contains no usable entries.", path.display());
        }
        info!(
            "Loaded {} knowledge entries from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Builds a store from raw (question, answer) pairs.
    ///
    /// The first pair wins when two questions normalize to the same key.
    /// Pairs whose question is blank are skipped.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries = HashMap::new();
        let mut unpunctuated = HashMap::new();
        for (question, answer) in pairs {
            let key = text::normalize(&question);
            if key.is_empty() {
                warn!("Skipping knowledge entry with an empty question.");
                continue;
            }
            if entries.contains_key(&key) {
                warn!(
                    "Duplicate knowledge question '{}' ignored; keeping the first answer.",
                    key
                );
                continue;
            }
            let stripped = text::strip_punctuation(&key);
            if !stripped.is_empty() {
                unpunctuated.entry(stripped).or_insert_with(|| answer.clone());
            }
            entries.insert(key, answer);
        }
        Self {
            entries,
            unpunctuated,
        }
    }

    /// Exact lookup on the normalized question, retried once without punctuation.
    pub fn lookup(&self, question: &str) -> Option<&str> {
        let key = text::normalize(question);
        if let Some(answer) = self.entries.get(&key) {
            return Some(answer.as_str());
        }
        let stripped = text::strip_punctuation(&key);
        debug!("Retrying knowledge lookup without punctuation: '{}'", stripped);
        self.unpunctuated.get(&stripped).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_source(raw: &str) -> serde_json::Result<Vec<(String, String)>> {
    if raw.trim_start().starts_with('[') {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(raw)?;
        Ok(entries
            .into_iter()
            .map(|e| (e.question, e.answer))
            .collect())
    } else {
        let OrderedPairs(pairs) = serde_json::from_str(raw)?;
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn store(pairs: &[(&str, &str)]) -> KnowledgeStore {
        KnowledgeStore::from_pairs(
            pairs
                .iter()
                .map(|(q, a)| (q.to_string(), a.to_string())),
        )
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let kb = store(&[("what is ai", "Artificial Intelligence.")]);
        assert_eq!(kb.lookup("What Is AI"), Some("Artificial Intelligence."));
        assert_eq!(kb.lookup("  what   is ai "), Some("Artificial Intelligence."));
        assert_eq!(kb.lookup("what is a i"), None);
    }

    #[test]
    fn source_keys_are_normalized_too() {
        let kb = store(&[("  What IS   NLP ", "Natural language processing.")]);
        assert_eq!(kb.lookup("what is nlp"), Some("Natural language processing."));
    }

    #[test]
    fn lookup_retries_without_punctuation() {
        let kb = store(&[("what is ai", "AI.")]);
        assert_eq!(kb.lookup("What is AI?"), Some("AI."));
    }

    #[test]
    fn lookup_matches_punctuated_keys_without_punctuation() {
        let kb = store(&[("what is a rule-based chatbot", "RB answer")]);
        assert_eq!(kb.lookup("what is a rule-based chatbot"), Some("RB answer"));
        assert_eq!(kb.lookup("What is a rule-based chatbot?"), Some("RB answer"));
        assert_eq!(kb.lookup("what is a rulebased chatbot?"), Some("RB answer"));
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn unpunctuated_collisions_keep_the_first_answer() {
        let kb = store(&[("what is ai?", "first"), ("what is ai!", "second")]);
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.lookup("what is ai!"), Some("second"));
        assert_eq!(kb.lookup("what is ai"), Some("first"));
    }

    #[test]
    fn lookup_is_not_fuzzy() {
        let kb = store(&[("what is ai", "AI.")]);
        assert_eq!(kb.lookup("ai"), None);
        assert_eq!(kb.lookup("what is ai exactly"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let kb = store(&[("What is AI", "first"), ("what  is ai", "second")]);
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.lookup("what is ai"), Some("first"));
    }

    #[test]
    fn blank_questions_are_skipped() {
        let kb = store(&[("   ", "nothing"), ("q", "a")]);
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn load_object_form() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"{ "What is AI": "AI answer", "what is ai": "shadowed", "what is nlp": "NLP answer" }"#,
        )
        .unwrap();

        let kb = KnowledgeStore::load(&path).unwrap();
        assert_eq!(kb.len(), 2);
        assert_eq!(kb.lookup("what is ai"), Some("AI answer"));
    }

    #[test]
    fn load_array_form() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(
            &path,
            r#"[ { "question": "How to submit task", "answer": "Upload it." } ]"#,
        )
        .unwrap();

        let kb = KnowledgeStore::load(&path).unwrap();
        assert_eq!(kb.lookup("how to submit task"), Some("Upload it."));
    }

    #[test]
    fn load_missing_file_is_knowledge_load_error() {
        let dir = tempdir().unwrap();
        let err = KnowledgeStore::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RulebotError>(),
            Some(RulebotError::KnowledgeLoad { .. })
        ));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn load_directory_is_knowledge_load_error() {
        let dir = tempdir().unwrap();
        let err = KnowledgeStore::load(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RulebotError>(),
            Some(RulebotError::KnowledgeLoad { .. })
        ));
        assert!(err.to_string().contains("directory"));
    }

    #[test]
    fn load_malformed_file_is_knowledge_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        fs::write(&path, r#"{ "what is ai": 42 }"#).unwrap();

        let err = KnowledgeStore::load(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RulebotError>(),
            Some(RulebotError::KnowledgeLoad { .. })
        ));
    }

    #[test]
    fn empty_store_misses() {
        let kb = KnowledgeStore::empty();
        assert!(kb.is_empty());
        assert_eq!(kb.lookup("what is ai"), None);
    }
}
