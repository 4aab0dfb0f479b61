//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// retext - hotkey-driven AI text transformation
#[derive(Parser, Debug)]
#[command(name = "retext")]
#[command(version)]
#[command(about = "Transform selected text with AI, triggered by global hotkeys")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/retext/config.json)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand; with none, the hotkey listener runs in the foreground
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create a starter config file
    Init,
    /// Show config file path
    Path,
    /// Validate the config file and its shortcuts
    Check,
}
