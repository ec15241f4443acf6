//! # Rulebot Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module centralizes the filesystem input/output that Rulebot needs:
//! reading the knowledge base into memory and appending transcript lines.
//! The helpers wrap `std::fs` with consistent context on errors.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) when missing, and
//!   rejects a path that exists but is not a directory.
//! - **`read_file_to_string`**: `fs::read_to_string` with the file name in the error.
//! - **`append_line`**: Opens a file in append mode (creating it if absent) and
//!   writes one `\n`-terminated line. Existing content is never touched.
//!
//! ```rust
//! use crate::common::fs::io;
//! use std::path::Path;
//!
//! let raw = io::read_file_to_string(Path::new("knowledge_base.json"))?;
//! io::append_line(Path::new("conversation_history.txt"), "USER: hi | BOT: Hello!")?;
//! ```
//!
use crate::core::error::{Result, RulebotError};
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function attempts to create the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
/// An empty path refers to the working directory and is accepted as-is.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(RulebotError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns an `Err` if the file cannot be found, opened, or read, or if it is
/// not valid UTF-8, with context indicating which file failed.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Appends `line` plus a trailing newline to the file at `path`.
///
/// The file is created if absent. Returns the raw `io::Error` so callers can
/// wrap it in their own error variant.
pub fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    file.flush()
}
