//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the clipboard, keyboard, notification daemon,
//! and the AI backends.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod hotkey;
pub mod keystroke;
pub mod notification;

// Re-export adapters
pub use backend::{BackendRouter, OllamaBackend, OpenAiBackend};
pub use clipboard::ArboardClipboard;
pub use config::JsonConfigStore;
pub use hotkey::{HookHandle, RdevListener};
pub use keystroke::EnigoChords;
pub use notification::NotifyRustNotifier;
