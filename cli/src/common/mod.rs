//! # Rulebot Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared helpers used across the chat components, kept apart from the
//! conversation logic (`chat::`) and the core infrastructure (`core::`).
//!
//! - **`fs`**: Filesystem operations (reading the knowledge base, appending transcript lines).
//! - **`text`**: Normalization and word/phrase matching.
//!

/// Utilities for filesystem operations.
pub mod fs;
/// Text normalization and keyword matching.
pub mod text;
