//! # Rulebot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Rulebot console chatbot.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and handing over to the chat session
//!
//! ## Examples
//!
//! ```bash
//! # Start chatting with knowledge_base.json from the current directory
//! rulebot
//!
//! # Use another knowledge base and show diagnostics
//! rulebot -vv --knowledge ~/kb/faq.json
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (diagnostics go to stderr)
//! 3. Load configuration; an invalid config file is the only fatal error
//! 4. Run the session; exit code 0 on `exit` or end of input
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod chat; // Conversation logic (knowledge, matcher, session, transcript)
mod common; // Shared utilities (fs, text)
mod core; // Core infrastructure (errors, config)

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "rulebot",
    about = "Rule-based console chatbot",
    long_about = "Chat with a rule-based bot that recognizes greetings, help requests and small talk,\n\
                  answers questions from a JSON knowledge base, and appends every exchange to a transcript.\n\
                  Type 'exit' (or send end-of-input) to leave.",
    version
)]
struct Cli {
    #[command(flatten)]
    chat: chat::ChatArgs,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let result = crate::core::config::load_config(&cli.chat.overrides())
        .and_then(|config| crate::chat::handle_chat(&config));

    match result {
        Ok(end) => tracing::debug!("Exiting after {:?}", end),
        Err(e) => {
            tracing::debug!("Rulebot failed: {:?}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
