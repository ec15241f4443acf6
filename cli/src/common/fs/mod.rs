//! # Rulebot Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the chat components. Callers import the
//! specific submodule (e.g. `crate::common::fs::io::append_line`).
//!

/// Contains basic file I/O operations (`ensure_dir_exists`, `read_file_to_string`, `append_line`).
pub mod io;
