//! retext - hotkey-driven AI text transformation
//!
//! This crate listens for global key combinations, captures the current
//! selection through the clipboard, sends it to an AI backend (OpenAI or
//! a local Ollama server), pastes the result over the selection, and
//! restores the clipboard.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Key combinations, shortcut registry, pipeline state, config
//! - **Application**: Pipeline orchestration and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (rdev, arboard, enigo, HTTP backends)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
