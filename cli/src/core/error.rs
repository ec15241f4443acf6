//! # Rulebot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Rulebot. Domain
//! failures are variants of `RulebotError`; everything is carried through the
//! application as `anyhow::Error` so call sites can attach context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `RulebotError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Only `Config` is fatal. `KnowledgeLoad` and `TranscriptWrite` are reported
//! as warnings and the conversation carries on; end of input is not an error
//! at all (see `chat::session::SessionEnd`).
//!
//! ## Examples
//!
//! ```rust
//! // Recover from a missing knowledge base
//! let store = match KnowledgeStore::load(path) {
//!     Ok(store) => store,
//!     Err(e) => {
//!         eprintln!("Warning: {:#}", e);
//!         KnowledgeStore::empty()
//!     }
//! };
//!
//! // Pattern matching on error types
//! if let Some(RulebotError::TranscriptWrite { path, .. }) = err.downcast_ref::<RulebotError>() {
//!     println!("Transcript at {} is not writable", path.display());
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the Rulebot application.
#[derive(Error, Debug)]
pub enum RulebotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load knowledge base '{}': {reason}", path.display())]
    KnowledgeLoad { path: PathBuf, reason: String },

    #[error("Failed to write transcript '{}': {source}", path.display())]
    TranscriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
