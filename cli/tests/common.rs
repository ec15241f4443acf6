//! # Rulebot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs
//! the compiled `rulebot` binary inside its own temporary working directory
//! so the default `knowledge_base.json` / `conversation_history.txt` paths
//! resolve there and nothing leaks between tests.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Knowledge base written by `workspace_with_knowledge`.
pub const SAMPLE_KNOWLEDGE: &str = r#"{
    "what is ai": "AI (Artificial Intelligence) is the simulation of human intelligence by machines.",
    "what is nlp": "NLP (Natural Language Processing) lets computers understand human language.",
    "how to submit task": "Upload your file on the portal before the deadline."
}"#;

/// # Get Rulebot Command (`rulebot_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `rulebot` binary, running
/// in `workdir` with the user config directory pointed inside it.
///
/// ## Panics
/// Panics if the `rulebot` binary cannot be found via `Command::cargo_bin`.
pub fn rulebot_cmd(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rulebot").expect("Failed to find rulebot binary for testing");
    cmd.current_dir(workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// An empty temporary working directory.
pub fn workspace() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp workspace")
}

/// A temporary working directory containing `knowledge_base.json`.
pub fn workspace_with_knowledge() -> TempDir {
    let dir = workspace();
    fs::write(dir.path().join("knowledge_base.json"), SAMPLE_KNOWLEDGE)
        .expect("Failed to write knowledge base");
    dir
}

/// Path of the default transcript inside `workdir`.
pub fn transcript_path(workdir: &Path) -> PathBuf {
    workdir.join("conversation_history.txt")
}

/// Transcript lines, or an empty list when the file was never created.
pub fn transcript_lines(workdir: &Path) -> Vec<String> {
    fs::read_to_string(transcript_path(workdir))
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
