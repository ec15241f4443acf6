//! # Rulebot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module resolves the settings a chat session runs with: where the
//! knowledge base lives, where the transcript is appended, what the bot calls
//! itself, and whether transcript lines carry timestamps.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`ConfigOverrides`)
//! 2. Project-specific `.rulebot.toml` in current directory or ancestors
//! 3. User-specific `<config dir>/rulebot/config.toml`
//! 4. Default values defined in the code
//!
//! After merging, `~` in paths is expanded and the result is validated.
//! Running with no config files at all is the normal case and yields the
//! defaults: `knowledge_base.json` and `conversation_history.txt` in the
//! working directory.
//!
//! ## Examples
//!
//! ```toml
//! [bot]
//! name = "Rusty"
//!
//! [knowledge]
//! path = "~/chat/knowledge_base.json"
//!
//! [transcript]
//! path = "logs/conversation_history.txt"
//! timestamps = false
//! ```
//!
use crate::core::error::{Result, RulebotError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// The resolved settings a session runs with.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub bot: BotConfig,
    pub knowledge: KnowledgeConfig,
    pub transcript: TranscriptConfig,
}

/// Settings describing the bot itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    /// Name the bot gives when asked for it.
    pub name: String,
}

/// Location of the question/answer knowledge base.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeConfig {
    /// Path to the JSON knowledge file (can use ~). Will be expanded.
    pub path: String,
}

/// Settings for the append-only conversation transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptConfig {
    /// Path to the transcript file (can use ~). Will be expanded.
    pub path: String,
    /// Prefix each record with a local timestamp.
    pub timestamps: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            path: default_transcript_path(),
            timestamps: default_timestamps(),
        }
    }
}

fn default_bot_name() -> String {
    "Rulebot".to_string()
}
fn default_knowledge_path() -> String {
    "knowledge_base.json".to_string()
}
fn default_transcript_path() -> String {
    "conversation_history.txt".to_string()
}
fn default_timestamps() -> bool {
    true
}

/// One TOML file as written. Every key is optional; a key that is present
/// replaces the value from the layers below it, even when it equals the default.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default)]
    pub bot: BotLayer,
    #[serde(default)]
    pub knowledge: KnowledgeLayer,
    #[serde(default)]
    pub transcript: TranscriptLayer,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotLayer {
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeLayer {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TranscriptLayer {
    pub path: Option<String>,
    pub timestamps: Option<bool>,
}

impl ConfigLayer {
    /// Writes every key this layer sets onto `config`.
    fn apply_to(self, config: &mut Config) {
        if let Some(name) = self.bot.name {
            config.bot.name = name;
        }
        if let Some(path) = self.knowledge.path {
            config.knowledge.path = path;
        }
        if let Some(path) = self.transcript.path {
            config.transcript.path = path;
        }
        if let Some(timestamps) = self.transcript.timestamps {
            config.transcript.timestamps = timestamps;
        }
    }
}

/// Values supplied on the command line. `None` leaves the file/default value alone.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub bot_name: Option<String>,
    pub knowledge_path: Option<PathBuf>,
    pub transcript_path: Option<PathBuf>,
    pub no_timestamps: bool,
}

impl Config {
    pub fn knowledge_path(&self) -> PathBuf {
        PathBuf::from(&self.knowledge.path)
    }

    pub fn transcript_path(&self) -> PathBuf {
        PathBuf::from(&self.transcript.path)
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".rulebot.toml";

/// # Load Configuration (`load_config`)
///
/// Loads user and project configuration, merges them, applies command-line
/// overrides, expands paths and validates the result.
///
/// ## Errors
///
/// Returns an `Err` if a config file exists but cannot be read or parsed, or
/// if the merged configuration fails validation.
pub fn load_config(overrides: &ConfigOverrides) -> Result<Config> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let user_config = load_user_config()?;
    let project_config = load_project_config(&current_dir)?;
    let mut merged_config = merge_configs(user_config, project_config);
    apply_overrides(&mut merged_config, overrides);
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigLayer>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Rulebot", "rulebot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<ConfigLayer>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.rulebot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` up to the filesystem root looking for `.rulebot.toml`,
/// stopping early at the first directory containing `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigLayer> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Stacks the file layers on the defaults: user first, then project.
fn merge_configs(user: Option<ConfigLayer>, project: Option<ConfigLayer>) -> Config {
    let mut merged = Config::default();
    for layer in [user, project].into_iter().flatten() {
        layer.apply_to(&mut merged);
    }
    merged
}

fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(name) = &overrides.bot_name {
        config.bot.name = name.clone();
    }
    if let Some(path) = &overrides.knowledge_path {
        config.knowledge.path = path.to_string_lossy().into_owned();
    }
    if let Some(path) = &overrides.transcript_path {
        config.transcript.path = path.to_string_lossy().into_owned();
    }
    if overrides.no_timestamps {
        config.transcript.timestamps = false;
    }
}

fn expand_config_paths(config: &mut Config) {
    config.knowledge.path = shellexpand::tilde(&config.knowledge.path).into_owned();
    config.transcript.path = shellexpand::tilde(&config.transcript.path).into_owned();
    debug!(
        "Expanded paths: knowledge={}, transcript={}",
        config.knowledge.path, config.transcript.path
    );
}

fn validate_config(config: &Config) -> Result<()> {
    if config.bot.name.trim().is_empty() {
        return Err(anyhow!(RulebotError::Config(
            "Bot name cannot be empty.".to_string()
        )));
    }
    // Whether the paths are usable is decided at load/write time, where a
    // failure is only a warning.
    for (label, value) in [
        ("knowledge", &config.knowledge.path),
        ("transcript", &config.transcript.path),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(RulebotError::Config(format!(
                "The {} path cannot be empty.",
                label
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
