//! # Rulebot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by the chat
//! components:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, RulebotError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
